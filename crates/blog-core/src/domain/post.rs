use chrono::{DateTime, Utc};

use crate::error::DomainError;

/// Post entity - a blog post as persisted by the store.
///
/// `id` is assigned by the store and opaque to the rest of the system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Build a freshly persisted post from validated fields.
    pub fn from_new(id: String, post: NewPost, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: post.title,
            content: post.content,
            category: post.category,
            tags: post.tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a validated replacement, refreshing `updated_at`.
    ///
    /// `id` and `created_at` never change. Tags are only replaced when the
    /// changes carry them.
    pub fn apply(&mut self, changes: PostChanges, now: DateTime<Utc>) {
        self.title = changes.title;
        self.content = changes.content;
        self.category = changes.category;
        if let Some(tags) = changes.tags {
            self.tags = tags;
        }
        self.updated_at = now;
    }

    /// Case-insensitive substring match against title, content or category.
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        [&self.title, &self.content, &self.category]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Unvalidated write input, as it arrives from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl PostDraft {
    /// Required fields paired with the label used in error messages.
    pub(crate) fn required_fields(&self) -> [(&'static str, Option<&str>); 3] {
        [
            ("Title", self.title.as_deref()),
            ("Content", self.content.as_deref()),
            ("Category", self.category.as_deref()),
        ]
    }
}

/// A post that satisfies every field constraint and may be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    title: String,
    content: String,
    category: String,
    tags: Vec<String>,
}

impl NewPost {
    /// Trim and check the required fields. Tags default to empty.
    pub fn validate(draft: PostDraft) -> Result<Self, DomainError> {
        let (title, content, category) = trimmed_fields(&draft)?;
        Ok(Self {
            title,
            content,
            category,
            tags: draft.tags.unwrap_or_default(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// A validated replacement for the mutable fields of an existing post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostChanges {
    title: String,
    content: String,
    category: String,
    tags: Option<Vec<String>>,
}

impl PostChanges {
    /// Same rules as [`NewPost::validate`], except absent tags stay absent
    /// so the stored tags are left alone.
    pub fn validate(draft: PostDraft) -> Result<Self, DomainError> {
        let (title, content, category) = trimmed_fields(&draft)?;
        Ok(Self {
            title,
            content,
            category,
            tags: draft.tags,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn tags(&self) -> Option<&[String]> {
        self.tags.as_deref()
    }
}

fn trimmed_fields(draft: &PostDraft) -> Result<(String, String, String), DomainError> {
    let mut errors = Vec::new();
    let [title, content, category] = draft.required_fields().map(|(label, value)| {
        let trimmed = value.map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            errors.push(format!("{label} is required"));
        }
        trimmed.to_string()
    });

    if !errors.is_empty() {
        return Err(DomainError::Validation(errors));
    }
    Ok((title, content, category))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, content: &str, category: &str) -> PostDraft {
        PostDraft {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            category: Some(category.to_string()),
            tags: None,
        }
    }

    fn sample_post() -> Post {
        let new = NewPost::validate(draft("Rust Ownership", "Borrowing explained", "Programming"))
            .unwrap();
        Post::from_new("abc".to_string(), new, Utc::now())
    }

    #[test]
    fn test_validate_trims_fields_and_defaults_tags() {
        let post = NewPost::validate(draft("  Hello  ", "\tBody\n", " News ")).unwrap();
        assert_eq!(post.title(), "Hello");
        assert_eq!(post.content(), "Body");
        assert_eq!(post.category(), "News");
        assert!(post.tags().is_empty());
    }

    #[test]
    fn test_validate_rejects_whitespace_only_fields() {
        let err = NewPost::validate(draft("   ", "Body", "\n")).unwrap_err();
        assert_eq!(
            err,
            DomainError::Validation(vec![
                "Title is required".to_string(),
                "Category is required".to_string(),
            ])
        );
    }

    #[test]
    fn test_changes_keep_absent_tags_absent() {
        let changes = PostChanges::validate(draft("T", "C", "K")).unwrap();
        assert_eq!(changes.tags(), None);
    }

    #[test]
    fn test_apply_preserves_identity_and_creation_time() {
        let mut post = sample_post();
        post.tags = vec!["rust".to_string()];
        let created_at = post.created_at;
        let later = created_at + chrono::Duration::seconds(5);

        let changes = PostChanges::validate(draft("New title", "New body", "Misc")).unwrap();
        post.apply(changes, later);

        assert_eq!(post.id, "abc");
        assert_eq!(post.title, "New title");
        assert_eq!(post.tags, vec!["rust".to_string()]);
        assert_eq!(post.created_at, created_at);
        assert_eq!(post.updated_at, later);
    }

    #[test]
    fn test_matches_any_searchable_field_ignoring_case() {
        let post = sample_post();
        assert!(post.matches("ownership"));
        assert!(post.matches("BORROW"));
        assert!(post.matches("gram"));
        assert!(!post.matches("python"));
    }
}
