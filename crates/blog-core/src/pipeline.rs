//! Write request pipeline.
//!
//! A write body passes through a fixed sequence of stages before it reaches
//! the store. Each stage either hands its output to the next one or rejects
//! the request, and a rejection ends the pipeline.
//!
//! ```text
//! PostDraft -> RequestValidator -> IntoNewPost | IntoChanges -> store
//! ```

use crate::domain::{NewPost, PostChanges, PostDraft};
use crate::error::DomainError;

/// A single request-processing step.
pub trait Stage<I> {
    type Output;

    fn run(&self, input: I) -> Result<Self::Output, DomainError>;

    /// Chain `next` after this stage.
    fn then<S>(self, next: S) -> Then<Self, S>
    where
        Self: Sized,
        S: Stage<Self::Output>,
    {
        Then { first: self, next }
    }
}

/// Two stages run back to back; the second is skipped if the first rejects.
pub struct Then<A, B> {
    first: A,
    next: B,
}

impl<I, A, B> Stage<I> for Then<A, B>
where
    A: Stage<I>,
    B: Stage<A::Output>,
{
    type Output = B::Output;

    fn run(&self, input: I) -> Result<Self::Output, DomainError> {
        let intermediate = self.first.run(input)?;
        self.next.run(intermediate)
    }
}

/// Presence check for title, content and category.
///
/// A field counts as missing when it is absent or empty. Whitespace is left
/// for the storage rules in [`NewPost::validate`] to judge.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestValidator;

impl Stage<PostDraft> for RequestValidator {
    type Output = PostDraft;

    fn run(&self, draft: PostDraft) -> Result<PostDraft, DomainError> {
        let errors: Vec<String> = draft
            .required_fields()
            .into_iter()
            .filter(|(_, value)| value.is_none_or(str::is_empty))
            .map(|(label, _)| format!("{label} is required"))
            .collect();

        if errors.is_empty() {
            Ok(draft)
        } else {
            Err(DomainError::MissingFields(errors))
        }
    }
}

/// Storage-boundary validation for inserts.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntoNewPost;

impl Stage<PostDraft> for IntoNewPost {
    type Output = NewPost;

    fn run(&self, draft: PostDraft) -> Result<NewPost, DomainError> {
        NewPost::validate(draft)
    }
}

/// Storage-boundary validation for replacements.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntoChanges;

impl Stage<PostDraft> for IntoChanges {
    type Output = PostChanges;

    fn run(&self, draft: PostDraft) -> Result<PostChanges, DomainError> {
        PostChanges::validate(draft)
    }
}

/// Pipeline for `POST /posts`.
pub fn create() -> impl Stage<PostDraft, Output = NewPost> {
    RequestValidator.then(IntoNewPost)
}

/// Pipeline for `PUT /posts/{id}`.
pub fn update() -> impl Stage<PostDraft, Output = PostChanges> {
    RequestValidator.then(IntoChanges)
}
