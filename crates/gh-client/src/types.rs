//! GitHub API data transfer objects
//!
//! These types represent the data returned from the GitHub API.
//! They are intentionally separate from the viewer's domain models
//! to keep this crate pure and reusable.

use crate::error::ClientError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repository coordinates
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Reject empty owner or repository names
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.owner.trim().is_empty() {
            return Err(ClientError::MissingField("owner"));
        }
        if self.repo.trim().is_empty() {
            return Err(ClientError::MissingField("repo"));
        }
        Ok(())
    }
}

/// Pull request identity: repository plus PR number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PullRequestRef {
    pub repo: RepoRef,
    pub number: u64,
}

impl PullRequestRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, number: u64) -> Self {
        Self {
            repo: RepoRef::new(owner, repo),
            number,
        }
    }

    /// Reject empty owner/repo or a zero PR number
    pub fn validate(&self) -> Result<(), ClientError> {
        self.repo.validate()?;
        if self.number == 0 {
            return Err(ClientError::MissingField("number"));
        }
        Ok(())
    }
}

/// The authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub login: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// A pull request from the GitHub API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number (e.g., 123)
    pub number: u64,

    /// PR title
    pub title: String,

    /// PR body/description
    pub body: Option<String>,

    /// "open" or "closed"
    pub state: String,

    /// Author's GitHub username
    pub author: String,

    /// HEAD commit SHA
    pub head_sha: String,

    /// Base commit SHA
    pub base_sha: String,

    /// HEAD branch name (e.g., "feature/foo")
    pub head_branch: String,

    /// Base branch name (e.g., "main")
    pub base_branch: String,

    /// PR URL for opening in browser
    pub html_url: String,

    /// Number of lines added
    pub additions: u64,

    /// Number of lines deleted
    pub deletions: u64,

    /// Number of changed files
    pub changed_files: u64,

    /// When the PR was created
    pub created_at: DateTime<Utc>,

    /// When the PR was last updated
    pub updated_at: DateTime<Utc>,
}

/// Which side of the diff a comment is anchored on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewSide {
    /// Old file (deletions)
    Left,
    /// New file (additions and context)
    Right,
}

/// Review event type for PR reviews
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewEvent {
    /// Approve the PR
    Approve,
    /// Request changes
    RequestChanges,
    /// Comment only (no approval/rejection)
    Comment,
}

/// A review comment on a pull request
///
/// Represents a comment on a specific line in a PR diff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewComment {
    /// GitHub comment ID
    pub id: u64,
    /// File path the comment is on
    pub path: String,
    /// Line number in the file version selected by `side`
    pub line: Option<u32>,
    /// Line number when the comment was created
    pub original_line: Option<u32>,
    /// Which side of the diff
    pub side: Option<ReviewSide>,
    /// Comment this one replies to
    pub in_reply_to_id: Option<u64>,
    /// Comment body text
    pub body: String,
    /// Author's GitHub username
    pub author: String,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
    /// When the comment was last updated
    pub updated_at: DateTime<Utc>,
}

/// An inline comment sent as part of a review submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftReviewComment {
    pub path: String,
    pub line: u32,
    pub side: ReviewSide,
    pub body: String,
}

/// A review created on GitHub
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedReview {
    pub id: u64,
    pub state: String,
}

// === Wire formats ===

#[derive(Debug, Deserialize)]
pub(crate) struct RawUser {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawBranch {
    #[serde(rename = "ref")]
    pub ref_field: String,
    pub sha: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPullRequest {
    pub number: u64,
    pub title: Option<String>,
    pub body: Option<String>,
    pub state: String,
    pub user: Option<RawUser>,
    pub head: RawBranch,
    pub base: RawBranch,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub additions: Option<u64>,
    #[serde(default)]
    pub deletions: Option<u64>,
    #[serde(default)]
    pub changed_files: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RawPullRequest> for PullRequest {
    fn from(raw: RawPullRequest) -> Self {
        Self {
            number: raw.number,
            title: raw.title.unwrap_or_default(),
            body: raw.body,
            state: raw.state,
            author: raw
                .user
                .map(|u| u.login)
                .unwrap_or_else(|| "unknown".to_string()),
            head_sha: raw.head.sha,
            base_sha: raw.base.sha,
            head_branch: raw.head.ref_field,
            base_branch: raw.base.ref_field,
            html_url: raw.html_url.unwrap_or_default(),
            additions: raw.additions.unwrap_or(0),
            deletions: raw.deletions.unwrap_or(0),
            changed_files: raw.changed_files.unwrap_or(0),
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawReviewComment {
    pub id: u64,
    pub path: String,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub original_line: Option<u32>,
    #[serde(default)]
    pub side: Option<ReviewSide>,
    #[serde(default)]
    pub in_reply_to_id: Option<u64>,
    pub body: String,
    pub user: Option<RawUser>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RawReviewComment> for ReviewComment {
    fn from(raw: RawReviewComment) -> Self {
        Self {
            id: raw.id,
            path: raw.path,
            line: raw.line,
            original_line: raw.original_line,
            side: raw.side,
            in_reply_to_id: raw.in_reply_to_id,
            body: raw.body,
            author: raw
                .user
                .map(|u| u.login)
                .unwrap_or_else(|| "unknown".to_string()),
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ReviewRequestBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<&'a str>,
    pub event: ReviewEvent,
    pub comments: &'a [DraftReviewComment],
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pull_request_ref_validation() {
        assert!(PullRequestRef::new("owner", "repo", 1).validate().is_ok());
        assert!(matches!(
            PullRequestRef::new("", "repo", 1).validate(),
            Err(ClientError::MissingField("owner"))
        ));
        assert!(matches!(
            PullRequestRef::new("owner", " ", 1).validate(),
            Err(ClientError::MissingField("repo"))
        ));
        assert!(matches!(
            PullRequestRef::new("owner", "repo", 0).validate(),
            Err(ClientError::MissingField("number"))
        ));
    }

    #[test]
    fn test_review_event_serialization() {
        assert_eq!(
            serde_json::to_string(&ReviewEvent::RequestChanges).unwrap(),
            "\"REQUEST_CHANGES\""
        );
        assert_eq!(serde_json::to_string(&ReviewSide::Left).unwrap(), "\"LEFT\"");
    }

    #[test]
    fn test_pull_request_from_wire() {
        let raw: RawPullRequest = serde_json::from_value(serde_json::json!({
            "number": 42,
            "title": "Add feature",
            "body": null,
            "state": "open",
            "user": {"login": "octocat"},
            "head": {"ref": "feature", "sha": "head123"},
            "base": {"ref": "main", "sha": "base456"},
            "html_url": "https://github.com/o/r/pull/42",
            "additions": 10,
            "deletions": 2,
            "changed_files": 3,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-02T00:00:00Z"
        }))
        .unwrap();

        let pr = PullRequest::from(raw);
        assert_eq!(pr.number, 42);
        assert_eq!(pr.author, "octocat");
        assert_eq!(pr.head_sha, "head123");
        assert_eq!(pr.base_sha, "base456");
        assert_eq!(pr.base_branch, "main");
        assert_eq!(pr.changed_files, 3);
    }

    #[test]
    fn test_review_body_omits_missing_fields() {
        let comments = vec![DraftReviewComment {
            path: "src/lib.rs".to_string(),
            line: 7,
            side: ReviewSide::Right,
            body: "nit".to_string(),
        }];
        let body = ReviewRequestBody {
            commit_id: None,
            body: None,
            event: ReviewEvent::Comment,
            comments: &comments,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "event": "COMMENT",
                "comments": [{"path": "src/lib.rs", "line": 7, "side": "RIGHT", "body": "nit"}]
            })
        );
    }
}
