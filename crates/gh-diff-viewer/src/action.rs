//! Diff Viewer Actions
//!
//! Tagged actions that the diff viewer can process. The host maps its own
//! input events (clicks, keys, pointer moves) to these and dispatches them to
//! [`crate::DiffViewerState::handle_action`].

use crate::event::ExpandDirection;
use crate::model::{DiffSide, ReviewEvent};

#[derive(Debug, Clone, PartialEq)]
pub enum DiffAction {
    // === Files ===
    /// Select a specific file by index
    SelectFile(usize),
    NextFile,
    PrevFile,
    /// Collapse or expand a file's hunks
    ToggleFileCollapsed(usize),
    CollapseAll,
    ExpandAll,
    /// Toggle a directory in the file explorer by its full path
    ToggleDirectory(String),

    // === Layout ===
    /// Switch display mode by name ("unified", "split")
    SetDisplayMode(String),

    // === Context Expansion ===
    ExpandContext {
        file: usize,
        hunk: usize,
        direction: ExpandDirection,
    },

    // === Comments ===
    /// Open the editor on a line
    StartComment { file: usize, side: DiffSide, line: u32 },
    /// Open the editor on a pending comment
    EditComment(usize),
    /// Replace the editor text
    SetCommentBody(String),
    /// Commit/save the current comment
    CommitComment,
    /// Cancel comment editing
    CancelComment,
    /// Remove a pending comment
    DeleteComment(usize),

    // === Review ===
    SetReviewEvent(ReviewEvent),
    NextReviewEvent,
    SetReviewBody(String),
    SubmitReview,

    // === Explorer panel resize ===
    BeginPanelDrag { x: f64, container_width: f64 },
    PanelDragTo(f64),
    PanelAnimationFrame,
    EndPanelDrag,

    // === General ===
    /// Close the diff viewer
    Close,
}

impl DiffAction {
    /// Check if this action only applies while the comment editor is open
    pub fn is_comment_action(&self) -> bool {
        matches!(
            self,
            DiffAction::SetCommentBody(_) | DiffAction::CommitComment | DiffAction::CancelComment
        )
    }

    /// Check if this action belongs to a panel drag gesture
    pub fn is_panel_action(&self) -> bool {
        matches!(
            self,
            DiffAction::BeginPanelDrag { .. }
                | DiffAction::PanelDragTo(_)
                | DiffAction::PanelAnimationFrame
                | DiffAction::EndPanelDrag
        )
    }
}
