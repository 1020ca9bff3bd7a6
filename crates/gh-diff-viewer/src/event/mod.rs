//! Events emitted by the diff viewer for the parent application to handle.

use crate::model::PendingComment;
use crate::rows::DisplayMode;
use crate::state::{ExpansionRequest, ReviewSubmission, ViewerError};

/// Events emitted by the diff viewer state.
///
/// The viewer never calls a remote API itself. It emits events and the
/// parent performs the side effects, then feeds results back (e.g.
/// [`crate::DiffViewerState::apply_expansion`]).
///
/// # Example
///
/// ```ignore
/// for event in state.handle_action(action) {
///     match event {
///         DiffEvent::RequestContext(request) => {
///             let lines = provider
///                 .fetch_lines(&request.path, &request.commit_sha, request.start_line, request.end_line())
///                 .await?;
///             state.apply_expansion(&request, lines)?;
///         }
///         DiffEvent::SubmitReview(submission) => {
///             let ok = handler.submit_review(submission).await.is_ok();
///             state.review.finish_submit(ok);
///         }
///         _ => {}
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum DiffEvent {
    /// Hidden lines should be fetched and passed back.
    RequestContext(ExpansionRequest),

    /// A comment was drafted locally.
    CommentAdded(PendingComment),

    /// A drafted comment was changed.
    CommentEdited {
        /// Index in the pending comments list.
        index: usize,
        body: String,
    },

    /// A drafted comment was removed.
    CommentDeleted(usize),

    /// The review is ready to publish; the posting flag is set.
    SubmitReview(ReviewSubmission),

    /// Another file became the selected one.
    FileSelected { file_path: String, file_index: usize },

    DisplayModeChanged(DisplayMode),

    /// The host should call `PanelAnimationFrame` on its next frame.
    ScheduleAnimationFrame,

    /// The explorer panel width (percent) changed.
    PanelResized(f64),

    /// An action could not be carried out.
    Rejected(ViewerError),

    /// User wants to close the diff viewer.
    Close,
}

/// Direction for context expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpandDirection {
    /// Load the lines directly above a hunk.
    Up,
    /// Load the lines directly below a hunk.
    Down,
}

impl ExpandDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpandDirection::Up => "up",
            ExpandDirection::Down => "down",
        }
    }
}
