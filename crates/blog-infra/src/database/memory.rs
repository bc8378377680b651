//! In-memory post repository - used when no document store is configured
//! and as the substitute backend in tests.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{NewPost, Post, PostChanges};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

/// In-memory store keeping posts in insertion order behind an async RwLock.
///
/// Ids are UUIDs; anything else is rejected as malformed, like a real store
/// would. Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }

    fn parse_id(id: &str) -> Result<Uuid, RepoError> {
        Uuid::parse_str(id).map_err(|_| RepoError::InvalidId(id.to_string()))
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let post = Post::from_new(Uuid::new_v4().to_string(), post, Utc::now());
        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, RepoError> {
        Self::parse_id(id)?;
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn search(&self, term: Option<&str>) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts
            .iter()
            .filter(|p| term.is_none_or(|t| p.matches(t)))
            .cloned()
            .collect())
    }

    async fn update(&self, id: &str, changes: PostChanges) -> Result<Post, RepoError> {
        Self::parse_id(id)?;
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;

        post.apply(changes, Utc::now());
        Ok(post.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), RepoError> {
        Self::parse_id(id)?;
        let mut posts = self.posts.write().await;
        let index = posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;

        posts.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::domain::PostDraft;

    fn new_post(title: &str, content: &str, category: &str) -> NewPost {
        NewPost::validate(PostDraft {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            category: Some(category.to_string()),
            tags: Some(vec!["test".to_string()]),
        })
        .unwrap()
    }

    fn changes(title: &str) -> PostChanges {
        PostChanges::validate(PostDraft {
            title: Some(title.to_string()),
            content: Some("Test Content".to_string()),
            category: Some("Test".to_string()),
            tags: None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryPostRepository::new();
        let created = repo
            .create(new_post("Test Post", "Test Content", "Test"))
            .await
            .unwrap();

        assert!(!created.id.is_empty());
        assert_eq!(created.created_at, created.updated_at);

        let found = repo.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let repo = InMemoryPostRepository::new();
        let a = repo.create(new_post("a", "a", "a")).await.unwrap();
        let b = repo.create(new_post("a", "a", "a")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_search_keeps_insertion_order() {
        let repo = InMemoryPostRepository::new();
        repo.create(new_post("Rust tips", "borrowck", "Programming")).await.unwrap();
        repo.create(new_post("Garden", "tomatoes", "Outdoors")).await.unwrap();
        repo.create(new_post("Async", "tokio RUNTIME", "Programming")).await.unwrap();

        let all = repo.search(None).await.unwrap();
        let titles: Vec<_> = all.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Rust tips", "Garden", "Async"]);

        let programming = repo.search(Some("programming")).await.unwrap();
        assert_eq!(programming.len(), 2);

        let runtime = repo.search(Some("runtime")).await.unwrap();
        assert_eq!(runtime[0].title, "Async");

        assert!(repo.search(Some("nothing here")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_refreshes_timestamp_and_keeps_tags() {
        let repo = InMemoryPostRepository::new();
        let created = repo.create(new_post("Test Post", "Test Content", "Test")).await.unwrap();

        let updated = repo.update(&created.id, changes("Updated Title")).await.unwrap();
        assert_eq!(updated.title, "Updated Title");
        assert_eq!(updated.tags, vec!["test".to_string()]);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_missing_posts_report_not_found() {
        let repo = InMemoryPostRepository::new();
        let id = Uuid::new_v4().to_string();

        assert!(repo.find_by_id(&id).await.unwrap().is_none());
        assert!(matches!(
            repo.update(&id, changes("x")).await,
            Err(RepoError::NotFound)
        ));
        assert!(matches!(repo.delete(&id).await, Err(RepoError::NotFound)));
        assert!(repo.search(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_post() {
        let repo = InMemoryPostRepository::new();
        let created = repo.create(new_post("Test Post", "Test Content", "Test")).await.unwrap();

        repo.delete(&created.id).await.unwrap();
        assert!(repo.find_by_id(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_ids_are_rejected() {
        let repo = InMemoryPostRepository::new();
        assert!(matches!(
            repo.find_by_id("nope").await,
            Err(RepoError::InvalidId(_))
        ));
        assert!(matches!(repo.delete("nope").await, Err(RepoError::InvalidId(_))));
    }
}
