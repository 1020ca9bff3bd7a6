//! Data models for diff representation.

mod comment;
mod diff;
mod file_tree;

pub use comment::{CommentPosition, DiffSide, PendingComment, RemoteComment, ReviewEvent};
pub use diff::{DiffLine, FileDiff, FileStatus, Hunk, LineKind, PullRequestDiff};
pub use file_tree::{FileTreeNode, FlatFileEntry};
