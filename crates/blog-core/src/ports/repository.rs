use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostChanges};
use crate::error::RepoError;

/// Post repository - the document store as seen by the handlers.
///
/// Ids are opaque strings; a store that cannot parse one answers with
/// [`RepoError::InvalidId`].
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post. The store assigns the id and both timestamps.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Find a post by its id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, RepoError>;

    /// All posts when `term` is `None`, otherwise posts whose title, content
    /// or category contains `term` ignoring case. Store order, no sorting.
    async fn search(&self, term: Option<&str>) -> Result<Vec<Post>, RepoError>;

    /// Replace the mutable fields of a post and refresh `updated_at`.
    ///
    /// Returns [`RepoError::NotFound`] when no post has this id.
    async fn update(&self, id: &str, changes: PostChanges) -> Result<Post, RepoError>;

    /// Hard-delete a post.
    ///
    /// Returns [`RepoError::NotFound`] when no post has this id.
    async fn delete(&self, id: &str) -> Result<(), RepoError>;

    /// Release the underlying connection. Called once at shutdown.
    async fn close(&self) -> Result<(), RepoError> {
        Ok(())
    }
}
