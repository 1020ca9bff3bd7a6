//! GitHub-backed implementations of the viewer's seams.
//!
//! Enabled with the `github` feature. Everything goes through a
//! [`GitHubClient`], so tests can swap in a mock server or a fake client.

use crate::model::{
    CommentPosition, DiffSide, PullRequestDiff, RemoteComment, ReviewEvent as ViewerReviewEvent,
};
use crate::parser::{parse_unified_diff, ParseError};
use crate::state::{DiffViewerState, ReviewSubmission};
use crate::traits::{CommentError, CommentHandler, ContextError, ContextProvider};
use async_trait::async_trait;
use gh_client::{
    ClientError, DraftReviewComment, GitHubClient, PullRequest, PullRequestRef, RepoRef,
    ReviewComment, ReviewEvent, ReviewSide,
};
use log::{debug, info};
use std::sync::Arc;
use thiserror::Error;

impl From<ClientError> for CommentError {
    fn from(err: ClientError) -> Self {
        match err {
            other @ ClientError::MissingToken => CommentError::Unauthorized(other.to_string()),
            ClientError::Api { status: 401 | 403, message } => CommentError::Unauthorized(message),
            ClientError::Api { status, message } => CommentError::Remote { status, message },
            ClientError::Transport(message) => CommentError::Network(message),
            other if other.is_validation() => CommentError::Invalid(other.to_string()),
            other => CommentError::Network(other.to_string()),
        }
    }
}

fn context_error(path: &str, err: ClientError) -> ContextError {
    match err.status() {
        Some(404) => ContextError::FileNotFound(path.to_string()),
        _ => ContextError::NetworkError(err.to_string()),
    }
}

fn review_side(side: DiffSide) -> ReviewSide {
    match side {
        DiffSide::Left => ReviewSide::Left,
        DiffSide::Right => ReviewSide::Right,
    }
}

fn review_event(event: ViewerReviewEvent) -> ReviewEvent {
    match event {
        ViewerReviewEvent::Approve => ReviewEvent::Approve,
        ViewerReviewEvent::RequestChanges => ReviewEvent::RequestChanges,
        ViewerReviewEvent::Comment => ReviewEvent::Comment,
    }
}

/// Map a published comment onto the viewer's model.
///
/// Outdated comments (no current line) keep no position.
pub fn remote_comment(comment: ReviewComment) -> RemoteComment {
    let side = match comment.side {
        Some(ReviewSide::Left) => DiffSide::Left,
        Some(ReviewSide::Right) | None => DiffSide::Right,
    };
    RemoteComment {
        id: comment.id,
        path: comment.path,
        position: comment.line.map(|line| CommentPosition::new(side, line)),
        body: comment.body,
        author: comment.author,
        in_reply_to: comment.in_reply_to_id,
        created_at: comment.created_at,
    }
}

/// Reads expanded context from file contents on GitHub.
#[derive(Clone)]
pub struct GithubContextProvider {
    client: Arc<dyn GitHubClient>,
    repo: RepoRef,
}

impl GithubContextProvider {
    pub fn new(client: Arc<dyn GitHubClient>, repo: RepoRef) -> Self {
        Self { client, repo }
    }
}

#[async_trait]
impl ContextProvider for GithubContextProvider {
    async fn fetch_lines(
        &self,
        path: &str,
        commit_sha: &str,
        start_line: u32,
        end_line: u32,
    ) -> Result<Vec<String>, ContextError> {
        self.client
            .fetch_file_lines(&self.repo, path, commit_sha, start_line, end_line)
            .await
            .map_err(|e| context_error(path, e))
    }

    fn is_available(&self) -> bool {
        self.repo.validate().is_ok()
    }
}

/// Publishes reviews for one pull request.
#[derive(Clone)]
pub struct GithubCommentHandler {
    client: Arc<dyn GitHubClient>,
    pr: PullRequestRef,
    commit_id: String,
    can_write: bool,
}

impl GithubCommentHandler {
    /// `commit_id` is the head SHA the comments are anchored to.
    /// `can_write` is whether the client carries a token.
    pub fn new(
        client: Arc<dyn GitHubClient>,
        pr: PullRequestRef,
        commit_id: impl Into<String>,
        can_write: bool,
    ) -> Self {
        Self {
            client,
            pr,
            commit_id: commit_id.into(),
            can_write,
        }
    }
}

#[async_trait]
impl CommentHandler for GithubCommentHandler {
    async fn submit_review(&self, submission: ReviewSubmission) -> Result<(), CommentError> {
        let drafts: Vec<DraftReviewComment> = submission
            .comments
            .into_iter()
            .map(|c| DraftReviewComment {
                path: c.path,
                line: c.position.line,
                side: review_side(c.position.side),
                body: c.body,
            })
            .collect();

        let review = self
            .client
            .submit_review(
                &self.pr,
                Some(self.commit_id.as_str()).filter(|sha| !sha.is_empty()),
                review_event(submission.event),
                submission.body.as_deref(),
                &drafts,
            )
            .await?;
        info!(
            "Submitted review {} on #{} ({} comments)",
            review.id,
            self.pr.number,
            drafts.len()
        );
        Ok(())
    }

    async fn edit_comment(&self, id: u64, body: String) -> Result<(), CommentError> {
        self.client
            .edit_review_comment(&self.pr.repo, id, &body)
            .await
            .map_err(|e| match e.status() {
                Some(404) => CommentError::NotFound(id),
                _ => e.into(),
            })?;
        Ok(())
    }

    async fn delete_comment(&self, id: u64) -> Result<(), CommentError> {
        self.client
            .delete_review_comment(&self.pr.repo, id)
            .await
            .map_err(|e| match e.status() {
                Some(404) => CommentError::NotFound(id),
                _ => e.into(),
            })
    }

    fn is_available(&self) -> bool {
        self.can_write
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A pull request with its parsed diff and published comments.
#[derive(Debug, Clone)]
pub struct LoadedPullRequest {
    pub pull_request: PullRequest,
    pub diff: PullRequestDiff,
    pub comments: Vec<RemoteComment>,
}

impl LoadedPullRequest {
    /// Viewer state over the diff with the published comments attached.
    pub fn into_viewer_state(self) -> DiffViewerState {
        let mut state = DiffViewerState::new(self.diff);
        state.set_remote_comments(self.comments);
        state
    }
}

/// Fetch metadata, diff and comments concurrently and parse the diff.
pub async fn load_pull_request(
    client: &dyn GitHubClient,
    pr: &PullRequestRef,
) -> Result<LoadedPullRequest, LoadError> {
    pr.validate()?;
    let (pull_request, diff_text, comments) = tokio::try_join!(
        client.fetch_pull_request(pr),
        client.fetch_pull_request_diff(pr),
        client.fetch_review_comments(pr),
    )?;

    let diff = parse_unified_diff(
        &diff_text,
        pull_request.base_sha.clone(),
        pull_request.head_sha.clone(),
    )?;
    debug!(
        "Loaded {}/{}#{}: {} files, {} comments",
        pr.repo.owner,
        pr.repo.repo,
        pr.number,
        diff.files.len(),
        comments.len()
    );

    Ok(LoadedPullRequest {
        pull_request,
        diff,
        comments: comments.into_iter().map(remote_comment).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn review_comment(line: Option<u32>, side: Option<ReviewSide>) -> ReviewComment {
        ReviewComment {
            id: 5,
            path: "src/lib.rs".to_string(),
            line,
            original_line: Some(3),
            side,
            in_reply_to_id: None,
            body: "hm".to_string(),
            author: "octocat".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_remote_comment_position() {
        let comment = remote_comment(review_comment(Some(3), Some(ReviewSide::Left)));
        assert_eq!(comment.position, Some(CommentPosition::new(DiffSide::Left, 3)));
        assert_eq!(comment.author, "octocat");

        // outdated comment
        assert_eq!(remote_comment(review_comment(None, Some(ReviewSide::Right))).position, None);
    }

    #[test]
    fn test_client_error_mapping() {
        assert_eq!(
            CommentError::from(ClientError::MissingToken),
            CommentError::Unauthorized("missing access token for authenticated request".into())
        );
        assert_eq!(
            CommentError::from(ClientError::Api {
                status: 422,
                message: "Validation Failed".into()
            }),
            CommentError::Remote {
                status: 422,
                message: "Validation Failed".into()
            }
        );
        assert!(matches!(
            CommentError::from(ClientError::EmptyCommentBody),
            CommentError::Invalid(_)
        ));
    }
}
