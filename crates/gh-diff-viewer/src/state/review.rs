//! Review draft and submission guard.

use crate::model::{CommentPosition, PendingComment, ReviewEvent};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    /// A submission is already in flight.
    #[error("a review is already being submitted")]
    AlreadyPosting,

    /// Nothing to send for a non-approving review.
    #[error("a {0:?} review needs a summary or at least one comment")]
    EmptyReview(ReviewEvent),
}

/// Everything needed to publish a review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSubmission {
    pub event: ReviewEvent,
    /// Trimmed summary; `None` when blank.
    pub body: Option<String>,
    pub comments: Vec<PendingComment>,
}

/// Drafted review: event, summary, inline comments and the posting flag.
#[derive(Debug, Clone, Default)]
pub struct ReviewComposer {
    pub event: ReviewEvent,
    pub body: String,
    comments: Vec<PendingComment>,
    /// What the in-flight submission carried, while posting.
    in_flight: Option<ReviewSubmission>,
}

impl ReviewComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn comments(&self) -> &[PendingComment] {
        &self.comments
    }

    pub fn is_posting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Cycle Approve → RequestChanges → Comment → Approve.
    pub fn next_event(&mut self) {
        self.event = match self.event {
            ReviewEvent::Approve => ReviewEvent::RequestChanges,
            ReviewEvent::RequestChanges => ReviewEvent::Comment,
            ReviewEvent::Comment => ReviewEvent::Approve,
        };
    }

    pub fn add_comment(&mut self, comment: PendingComment) {
        self.comments.push(comment);
    }

    /// Replace the body of the comment with `id`. Returns its index.
    pub fn edit_comment(&mut self, id: Uuid, body: impl Into<String>) -> Option<usize> {
        let index = self.comments.iter().position(|c| c.id == id)?;
        self.comments[index].body = body.into();
        Some(index)
    }

    pub fn remove_comment(&mut self, index: usize) -> Option<PendingComment> {
        (index < self.comments.len()).then(|| self.comments.remove(index))
    }

    /// Index of the pending comment anchored at `(path, position)`.
    pub fn find_comment(&self, path: &str, position: CommentPosition) -> Option<usize> {
        self.comments
            .iter()
            .position(|c| c.is_at(path, position.side, position.line))
    }

    /// Start publishing. Sets the posting flag until [`Self::finish_submit`].
    pub fn begin_submit(&mut self) -> Result<ReviewSubmission, ReviewError> {
        if self.is_posting() {
            return Err(ReviewError::AlreadyPosting);
        }

        let body = Some(self.body.trim())
            .filter(|b| !b.is_empty())
            .map(str::to_string);
        if body.is_none() && self.comments.is_empty() && !self.event.allows_empty() {
            return Err(ReviewError::EmptyReview(self.event));
        }

        let submission = ReviewSubmission {
            event: self.event,
            body,
            comments: self.comments.clone(),
        };
        self.in_flight = Some(submission.clone());
        Ok(submission)
    }

    /// Clear the posting flag. On failure the draft is kept so the user can
    /// retry.
    ///
    /// On success only what was sent is dropped: comments added or edited
    /// while the review was posting stay pending, as does a summary changed
    /// in the meantime.
    pub fn finish_submit(&mut self, succeeded: bool) {
        let Some(sent) = self.in_flight.take() else {
            return;
        };
        if !succeeded {
            return;
        }

        self.comments.retain(|c| {
            !sent
                .comments
                .iter()
                .any(|s| s.id == c.id && s.body == c.body)
        });
        if sent.body.as_deref().unwrap_or("") == self.body.trim() {
            self.body.clear();
        }
        self.event = ReviewEvent::default();
    }
}
