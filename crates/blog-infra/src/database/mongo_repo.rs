//! MongoDB post repository.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, Document, doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};

use blog_core::domain::{NewPost, Post, PostChanges};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::connections::{self, MongoConfig};

const COLLECTION: &str = "posts";

/// A post as stored in the `posts` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

impl PostDocument {
    fn from_new(post: &NewPost, now: bson::DateTime) -> Self {
        Self {
            id: None,
            title: post.title().to_string(),
            content: post.content().to_string(),
            category: post.category().to_string(),
            tags: post.tags().to_vec(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Conversion from stored document to domain Post.
impl From<PostDocument> for Post {
    fn from(document: PostDocument) -> Self {
        Self {
            id: document.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            title: document.title,
            content: document.content,
            category: document.category,
            tags: document.tags,
            created_at: document.created_at.to_chrono(),
            updated_at: document.updated_at.to_chrono(),
        }
    }
}

/// Ids that are not 24-character hex strings never reach the server.
pub(crate) fn parse_id(id: &str) -> Result<ObjectId, RepoError> {
    ObjectId::parse_str(id).map_err(|_| RepoError::InvalidId(id.to_string()))
}

/// Filter for the list/search query. The term is matched literally.
pub(crate) fn search_filter(term: Option<&str>) -> Document {
    let Some(term) = term else {
        return Document::new();
    };
    let pattern = regex::escape(term);
    doc! {
        "$or": [
            { "title": { "$regex": pattern.as_str(), "$options": "i" } },
            { "content": { "$regex": pattern.as_str(), "$options": "i" } },
            { "category": { "$regex": pattern.as_str(), "$options": "i" } },
        ]
    }
}

/// `$set` document for a replacement.
pub(crate) fn update_document(changes: &PostChanges, now: bson::DateTime) -> Document {
    let mut set = doc! {
        "title": changes.title(),
        "content": changes.content(),
        "category": changes.category(),
        "updatedAt": now,
    };
    if let Some(tags) = changes.tags() {
        set.insert("tags", tags.to_vec());
    }
    doc! { "$set": set }
}

/// Post repository backed by a MongoDB collection.
pub struct MongoPostRepository {
    client: Client,
    collection: Collection<PostDocument>,
}

impl MongoPostRepository {
    pub fn new(client: Client, database: &Database) -> Self {
        Self {
            client,
            collection: database.collection(COLLECTION),
        }
    }

    /// Connect using `config` and bind to the `posts` collection.
    pub async fn connect(config: &MongoConfig) -> Result<Self, RepoError> {
        let (client, database) = connections::connect(config).await?;
        Ok(Self::new(client, &database))
    }
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut document = PostDocument::from_new(&post, bson::DateTime::now());

        let result = self
            .collection
            .insert_one(&document)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        document.id = result.inserted_id.as_object_id();
        tracing::debug!(post_id = ?document.id, "Inserted post");

        Ok(document.into())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, RepoError> {
        let oid = parse_id(id)?;

        let result = self
            .collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn search(&self, term: Option<&str>) -> Result<Vec<Post>, RepoError> {
        let documents: Vec<PostDocument> = self
            .collection
            .find(search_filter(term))
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: &str, changes: PostChanges) -> Result<Post, RepoError> {
        let oid = parse_id(id)?;

        let result = self
            .collection
            .find_one_and_update(
                doc! { "_id": oid },
                update_document(&changes, bson::DateTime::now()),
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        result.map(Into::into).ok_or(RepoError::NotFound)
    }

    async fn delete(&self, id: &str) -> Result<(), RepoError> {
        let oid = parse_id(id)?;

        let result = self
            .collection
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.deleted_count == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn close(&self) -> Result<(), RepoError> {
        self.client.clone().shutdown().await;
        tracing::info!("Document store connection closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::domain::PostDraft;

    fn draft(tags: Option<Vec<String>>) -> PostDraft {
        PostDraft {
            title: Some("Test Post".to_string()),
            content: Some("Test Content".to_string()),
            category: Some("Test".to_string()),
            tags,
        }
    }

    #[test]
    fn test_parse_id_rejects_malformed_ids() {
        assert!(matches!(parse_id("not-an-id"), Err(RepoError::InvalidId(_))));
        assert!(parse_id("65a1f0c2e4b0a1b2c3d4e5f6").is_ok());
    }

    #[test]
    fn test_search_filter_without_term_matches_everything() {
        assert!(search_filter(None).is_empty());
    }

    #[test]
    fn test_search_filter_escapes_pattern_characters() {
        let filter = search_filter(Some("c++ (beta)"));
        let clauses = filter.get_array("$or").unwrap();
        assert_eq!(clauses.len(), 3);

        let title = clauses[0].as_document().unwrap().get_document("title").unwrap();
        assert_eq!(title.get_str("$regex").unwrap(), r"c\+\+ \(beta\)");
        assert_eq!(title.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_update_document_leaves_tags_alone_when_absent() {
        let now = bson::DateTime::now();

        let changes = PostChanges::validate(draft(None)).unwrap();
        let update = update_document(&changes, now);
        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_str("title").unwrap(), "Test Post");
        assert!(!set.contains_key("tags"));
        assert!(!set.contains_key("createdAt"));

        let changes = PostChanges::validate(draft(Some(vec!["a".to_string()]))).unwrap();
        let update = update_document(&changes, now);
        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_array("tags").unwrap().len(), 1);
    }

    #[test]
    fn test_document_converts_to_domain_post() {
        let oid = ObjectId::new();
        let now = bson::DateTime::now();
        let post = NewPost::validate(draft(Some(vec!["test".to_string()]))).unwrap();
        let mut document = PostDocument::from_new(&post, now);
        document.id = Some(oid);

        let post: Post = document.into();
        assert_eq!(post.id, oid.to_hex());
        assert_eq!(post.tags, vec!["test".to_string()]);
        assert_eq!(post.created_at.timestamp_millis(), now.timestamp_millis());
        assert_eq!(post.created_at, post.updated_at);
    }

    #[test]
    fn test_out_of_range_dates_clamp_instead_of_resetting_to_epoch() {
        let post = NewPost::validate(draft(None)).unwrap();
        let mut document = PostDocument::from_new(&post, bson::DateTime::MAX);
        document.id = Some(ObjectId::new());

        let post: Post = document.into();
        assert!(post.created_at.timestamp_millis() > 0);
        assert_eq!(post.created_at, chrono::DateTime::<chrono::Utc>::MAX_UTC);
    }

    #[test]
    fn test_document_serializes_with_store_field_names() {
        let post = NewPost::validate(draft(None)).unwrap();
        let document = PostDocument::from_new(&post, bson::DateTime::now());
        let stored = bson::to_document(&document).unwrap();

        assert!(!stored.contains_key("_id"));
        assert!(stored.contains_key("createdAt"));
        assert!(stored.contains_key("updatedAt"));
        assert_eq!(stored.get_array("tags").unwrap().len(), 0);
    }
}
