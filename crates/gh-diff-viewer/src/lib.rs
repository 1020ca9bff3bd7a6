//! # gh-diff-viewer
//!
//! Diff review view-model for GitHub pull requests: split and unified rows
//! with syntax highlighting, "load more lines" context expansion, inline
//! review comments and review submission, rendered to HTML.
//!
//! ## Design Principles
//!
//! The viewer is **instrumented**: it receives data and emits events without
//! calling external APIs itself. The optional `github` feature adds adapters
//! that answer those events through [`gh_client`].
//!
//! ## Action-Based Architecture
//!
//! Instead of handling input directly, the host maps its own events to
//! [`DiffAction`] variants and dispatches them to [`DiffViewerState`]. The
//! returned [`DiffEvent`]s describe side effects for the host to perform.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gh_diff_viewer::{DiffAction, DiffEvent, DiffViewerState, HtmlHighlighter, HtmlRenderer};
//! use gh_diff_viewer::parser::parse_unified_diff;
//!
//! let diff = parse_unified_diff(diff_text, "base_sha", "head_sha")?;
//! let mut state = DiffViewerState::with_config(diff, &config)?;
//!
//! let highlighter = HtmlHighlighter::new();
//! let renderer = HtmlRenderer::new(&config.theme);
//! if let Some(view) = state.file_view(0, &highlighter) {
//!     let html = renderer.render_file(&view);
//! }
//!
//! for event in state.handle_action(DiffAction::SetDisplayMode("unified".into())) {
//!     // process DiffEvent (fetch context, submit review, ...)
//! }
//! ```

pub mod action;
pub mod event;
pub mod highlight;
pub mod model;
pub mod parser;
pub mod render;
pub mod rows;
pub mod state;
pub mod traits;

#[cfg(feature = "github")]
pub mod github;

// Re-export commonly used types
pub use action::DiffAction;
pub use event::{DiffEvent, ExpandDirection};
pub use highlight::{detect_language, HtmlHighlighter, Language, PlainHighlighter, SyntaxHighlighter};
pub use model::{
    CommentPosition, DiffLine, DiffSide, FileDiff, FileStatus, Hunk, LineKind, PendingComment,
    PullRequestDiff, RemoteComment, ReviewEvent,
};
pub use parser::parse_unified_diff;
pub use render::HtmlRenderer;
pub use rows::{line_parser_for, DisplayMode, HunkRows, LineParser, UnknownDisplayMode};
pub use state::{DiffViewerState, ExpansionRequest, ReviewSubmission, ViewerError};
pub use traits::{CommentError, CommentHandler, ContextError, ContextProvider};
