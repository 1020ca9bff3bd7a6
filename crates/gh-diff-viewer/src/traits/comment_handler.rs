//! Trait for publishing review comments.

use crate::state::ReviewSubmission;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during comment operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommentError {
    /// The request was rejected before reaching the remote.
    #[error("Invalid comment request: {0}")]
    Invalid(String),

    /// The comment was not found.
    #[error("Comment not found: {0}")]
    NotFound(u64),

    /// Not authorized to perform the operation.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The remote answered with an error.
    #[error("Remote error {status}: {message}")]
    Remote { status: u16, message: String },

    /// The request never got an answer.
    #[error("Network error: {0}")]
    Network(String),

    /// The comment handler is not available.
    #[error("Comment handler unavailable: {0}")]
    Unavailable(String),
}

/// Publishes reviews and changes already published comments.
///
/// # Example
///
/// ```ignore
/// if let DiffEvent::SubmitReview(submission) = event {
///     let result = handler.submit_review(submission).await;
///     state.review.finish_submit(result.is_ok());
/// }
/// ```
#[async_trait]
pub trait CommentHandler: Send + Sync {
    /// Publish a review with all of its pending comments.
    async fn submit_review(&self, submission: ReviewSubmission) -> Result<(), CommentError>;

    /// Replace the body of a published comment.
    ///
    /// # Arguments
    /// * `id` - The remote comment ID
    /// * `body` - The new comment body
    async fn edit_comment(&self, id: u64, body: String) -> Result<(), CommentError>;

    /// Delete a published comment.
    async fn delete_comment(&self, id: u64) -> Result<(), CommentError>;

    /// Check if the handler can write (e.g. has credentials).
    fn is_available(&self) -> bool;
}

/// A comment handler for read-only viewing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpCommentHandler;

#[async_trait]
impl CommentHandler for NoOpCommentHandler {
    async fn submit_review(&self, _submission: ReviewSubmission) -> Result<(), CommentError> {
        Err(CommentError::Unavailable(
            "Review submission is disabled".to_string(),
        ))
    }

    async fn edit_comment(&self, _id: u64, _body: String) -> Result<(), CommentError> {
        Err(CommentError::Unavailable(
            "Comment editing is disabled".to_string(),
        ))
    }

    async fn delete_comment(&self, _id: u64) -> Result<(), CommentError> {
        Err(CommentError::Unavailable(
            "Comment deletion is disabled".to_string(),
        ))
    }

    fn is_available(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReviewEvent;

    #[tokio::test]
    async fn test_noop_handler_refuses_everything() {
        let handler = NoOpCommentHandler;
        assert!(!handler.is_available());

        let submission = ReviewSubmission {
            event: ReviewEvent::Approve,
            body: None,
            comments: Vec::new(),
        };
        assert!(matches!(
            handler.submit_review(submission).await,
            Err(CommentError::Unavailable(_))
        ));
        assert!(handler.delete_comment(1).await.is_err());
    }
}
