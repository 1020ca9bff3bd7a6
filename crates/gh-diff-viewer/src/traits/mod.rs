//! Seams the host implements to back the viewer's events with a remote.

mod comment_handler;
mod context_provider;

pub use comment_handler::{CommentError, CommentHandler, NoOpCommentHandler};
pub use context_provider::{ContextError, ContextProvider, NoOpContextProvider};
