//! State management for the diff viewer.
//!
//! Every piece of interactive behavior is an explicit state machine driven
//! by method calls or [`crate::DiffAction`]s: file selection and collapsing,
//! context expansion, the comment editor, the review draft, the explorer
//! panel drag and async fetch bookkeeping.

mod comment_editor;
pub mod expansion;
mod fetch;
mod panel;
mod preferences;
mod review;
mod viewer_state;

pub use comment_editor::CommentEditor;
pub use expansion::{ExpansionError, ExpansionRequest, DEFAULT_EXPAND_STEP};
pub use fetch::{FetchSlot, FetchState, FetchTicket};
pub use panel::PanelResize;
pub use preferences::{ViewerPreferences, PREFERENCES_KEY};
pub use review::{ReviewComposer, ReviewError, ReviewSubmission};
pub use viewer_state::{DiffViewerState, FileView, HunkView, ViewerError};
