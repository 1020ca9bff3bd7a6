//! GitHub client trait
//!
//! This module defines the core `GitHubClient` trait that all client
//! implementations must satisfy.

use crate::error::ClientError;
use crate::types::{
    DraftReviewComment, PullRequest, PullRequestRef, RepoRef, ReviewComment, ReviewEvent,
    SubmittedReview, User,
};
use async_trait::async_trait;

/// Result alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// GitHub API client trait
///
/// Defines the operations the diff viewer needs from the remote host. Every
/// call is a single request: no retries, no caching.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks and threads.
///
/// # Example
///
/// ```rust,ignore
/// use gh_client::{GitHubClient, PullRequestRef};
///
/// async fn diff_text(client: &dyn GitHubClient) -> gh_client::ClientResult<String> {
///     client.fetch_pull_request_diff(&PullRequestRef::new("rust-lang", "rust", 1)).await
/// }
/// ```
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// Fetch the authenticated user. Requires a token.
    async fn fetch_current_user(&self) -> ClientResult<User>;

    /// Fetch pull request metadata (title, author, base/head SHAs, stats).
    async fn fetch_pull_request(&self, pr: &PullRequestRef) -> ClientResult<PullRequest>;

    /// Fetch the raw unified diff of a pull request.
    async fn fetch_pull_request_diff(&self, pr: &PullRequestRef) -> ClientResult<String>;

    /// Fetch inline review comments (first page, up to 100).
    async fn fetch_review_comments(&self, pr: &PullRequestRef)
        -> ClientResult<Vec<ReviewComment>>;

    /// Fetch lines `start..=end` (1-based) of a file at a commit.
    ///
    /// Returns fewer lines when the file ends before `end`.
    async fn fetch_file_lines(
        &self,
        repo: &RepoRef,
        path: &str,
        commit_sha: &str,
        start: u32,
        end: u32,
    ) -> ClientResult<Vec<String>>;

    /// Replace the body of an inline review comment. Requires a token.
    async fn edit_review_comment(
        &self,
        repo: &RepoRef,
        comment_id: u64,
        body: &str,
    ) -> ClientResult<ReviewComment>;

    /// Delete an inline review comment. Requires a token.
    async fn delete_review_comment(&self, repo: &RepoRef, comment_id: u64) -> ClientResult<()>;

    /// Publish a review with inline comments. Requires a token.
    async fn submit_review(
        &self,
        pr: &PullRequestRef,
        commit_id: Option<&str>,
        event: ReviewEvent,
        body: Option<&str>,
        comments: &[DraftReviewComment],
    ) -> ClientResult<SubmittedReview>;
}
