//! Comment-related data structures for PR reviews.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A pending (not yet submitted) review comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingComment {
    /// Unique identifier for this pending comment.
    pub id: Uuid,
    /// File path.
    pub path: String,
    /// Position information.
    pub position: CommentPosition,
    /// Comment body (markdown).
    pub body: String,
    /// When the comment was created locally.
    pub created_at: DateTime<Utc>,
}

impl PendingComment {
    /// Create a new pending comment.
    pub fn new(
        path: impl Into<String>,
        position: CommentPosition,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            path: path.into(),
            position,
            body: body.into(),
            created_at: Utc::now(),
        }
    }

    /// Whether this comment is anchored at `(path, side, line)`.
    pub fn is_at(&self, path: &str, side: DiffSide, line: u32) -> bool {
        self.path == path && self.position.side == side && self.position.line == line
    }
}

/// A comment already published on the remote host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteComment {
    pub id: u64,
    pub path: String,
    /// `None` when the comment's line is no longer part of the diff.
    pub position: Option<CommentPosition>,
    pub body: String,
    pub author: String,
    pub in_reply_to: Option<u64>,
    pub created_at: DateTime<Utc>,
}

/// Where the comment is anchored in the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommentPosition {
    /// Which side of the diff.
    pub side: DiffSide,
    /// Line number (in the respective file version).
    pub line: u32,
}

impl CommentPosition {
    /// Create a single-line comment position.
    pub fn new(side: DiffSide, line: u32) -> Self {
        Self { side, line }
    }
}

/// Which side of the diff the comment is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffSide {
    /// Old file (deletions side).
    Left,
    /// New file (additions side).
    Right,
}

impl DiffSide {
    /// Convert to GitHub API string representation.
    pub fn as_github_str(&self) -> &'static str {
        match self {
            DiffSide::Left => "LEFT",
            DiffSide::Right => "RIGHT",
        }
    }
}

/// The type of review to submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewEvent {
    /// Approve the pull request.
    Approve,
    /// Request changes.
    RequestChanges,
    /// Just leave comments (neutral).
    #[default]
    Comment,
}

impl ReviewEvent {
    /// Convert to GitHub API string representation.
    pub fn as_github_str(&self) -> &'static str {
        match self {
            ReviewEvent::Approve => "APPROVE",
            ReviewEvent::RequestChanges => "REQUEST_CHANGES",
            ReviewEvent::Comment => "COMMENT",
        }
    }

    /// Whether a review of this kind may be sent without any text.
    pub fn allows_empty(&self) -> bool {
        matches!(self, ReviewEvent::Approve)
    }
}
