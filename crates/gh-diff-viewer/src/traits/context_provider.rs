//! Trait for fetching additional context lines.

use crate::state::ExpansionRequest;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when fetching context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// The requested file was not found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A network or remote error occurred.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The context provider is not available.
    #[error("Context provider unavailable: {0}")]
    Unavailable(String),
}

/// Provides file content for context expansion.
///
/// Implement this trait to answer [`crate::DiffEvent::RequestContext`]
/// with lines from the revision the request names.
#[async_trait]
pub trait ContextProvider: Send + Sync {
    /// Fetch lines from a file at a specific commit.
    ///
    /// # Arguments
    /// * `path` - File path relative to repository root
    /// * `commit_sha` - The commit SHA to fetch from
    /// * `start_line` - 1-indexed start line (inclusive)
    /// * `end_line` - 1-indexed end line (inclusive)
    ///
    /// # Returns
    /// Line contents without newline characters. Fewer lines than asked for
    /// means the file ended.
    async fn fetch_lines(
        &self,
        path: &str,
        commit_sha: &str,
        start_line: u32,
        end_line: u32,
    ) -> Result<Vec<String>, ContextError>;

    /// Fetch the lines an expansion request asks for.
    async fn fetch_for(&self, request: &ExpansionRequest) -> Result<Vec<String>, ContextError> {
        self.fetch_lines(
            &request.path,
            &request.commit_sha,
            request.start_line,
            request.end_line(),
        )
        .await
    }

    /// Check if the provider is available (e.g., has valid credentials).
    fn is_available(&self) -> bool;
}

/// A context provider for when context expansion is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpContextProvider;

#[async_trait]
impl ContextProvider for NoOpContextProvider {
    async fn fetch_lines(
        &self,
        _path: &str,
        _commit_sha: &str,
        _start_line: u32,
        _end_line: u32,
    ) -> Result<Vec<String>, ContextError> {
        Err(ContextError::Unavailable(
            "Context expansion is disabled".to_string(),
        ))
    }

    fn is_available(&self) -> bool {
        false
    }
}
