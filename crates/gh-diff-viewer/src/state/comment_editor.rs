//! State for the inline comment editor.

use crate::model::{CommentPosition, DiffSide, PendingComment};
use uuid::Uuid;

/// An open comment editor anchored at one diff line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentEditor {
    /// Position in the diff where the comment is anchored.
    pub position: CommentPosition,
    /// File path for the comment.
    pub file_path: String,
    /// The comment body being edited.
    pub body: String,
    /// Set when editing an existing pending comment.
    pub editing: Option<Uuid>,
}

impl CommentEditor {
    /// Create an empty editor for a single line.
    pub fn new(file_path: impl Into<String>, side: DiffSide, line: u32) -> Self {
        Self {
            position: CommentPosition::new(side, line),
            file_path: file_path.into(),
            body: String::new(),
            editing: None,
        }
    }

    /// Create an editor prefilled with a pending comment.
    pub fn edit_existing(comment: &PendingComment) -> Self {
        Self {
            position: comment.position,
            file_path: comment.path.clone(),
            body: comment.body.clone(),
            editing: Some(comment.id),
        }
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Append text at the end of the body.
    pub fn insert_str(&mut self, s: &str) {
        self.body.push_str(s);
    }

    /// Check if the body is empty (ignoring whitespace).
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }
}
