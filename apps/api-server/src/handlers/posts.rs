//! Post handlers.
//!
//! Writes run the body through the core pipeline (presence check, then field
//! rules) before touching the store; any rejection returns early via `?` and
//! is rendered by [`AppError`].

use actix_web::{HttpResponse, web};

use blog_core::RepoError;
use blog_core::domain::{Post, PostDraft};
use blog_core::pipeline::{self, Stage};
use blog_shared::dto::{PostPayload, PostResponse, SearchQuery};
use blog_shared::{ApiResponse, ErrorMessage};

use crate::middleware::error::{AppError, AppResult, POST_NOT_FOUND};
use crate::observability::RequestId;
use crate::state::AppState;

fn to_draft(payload: PostPayload) -> PostDraft {
    PostDraft {
        title: payload.title,
        content: payload.content,
        category: payload.category,
        tags: payload.tags,
    }
}

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        category: post.category,
        tags: post.tags,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let new_post = pipeline::create().run(to_draft(body.into_inner()))?;

    let post = state.posts.create(new_post).await?;
    tracing::info!(post_id = %post.id, request_id = %request_id, "Post created");

    Ok(HttpResponse::Created().json(ApiResponse::created(
        to_response(post),
        "Post created successfully",
    )))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .find_by_id(&path.into_inner())
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(post))))
}

/// GET /posts?term=...
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let term = query.term();
    let posts = state.posts.search(term).await?;
    tracing::debug!(term = ?term, count = posts.len(), "Listed posts");

    let data: Vec<PostResponse> = posts.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(data)))
}

/// PUT /posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<String>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let changes = pipeline::update().run(to_draft(body.into_inner()))?;

    let post = state.posts.update(&path.into_inner(), changes).await?;
    tracing::info!(post_id = %post.id, request_id = %request_id, "Post updated");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        to_response(post),
        "Post updated successfully",
    )))
}

/// DELETE /posts/{id}
///
/// Unlike the other handlers, a missing post is answered with a bare
/// `{ "error": "Post not found" }` rather than the envelope.
pub async fn delete_post(
    state: web::Data<AppState>,
    request_id: RequestId,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    match state.posts.delete(&id).await {
        Ok(()) => {
            tracing::info!(post_id = %id, request_id = %request_id, "Post deleted");
            Ok(HttpResponse::NoContent().finish())
        }
        Err(RepoError::NotFound) => {
            Ok(HttpResponse::NotFound().json(ErrorMessage::new(POST_NOT_FOUND)))
        }
        Err(e) => Err(e.into()),
    }
}
