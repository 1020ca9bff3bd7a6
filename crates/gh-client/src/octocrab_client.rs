//! Octocrab-based GitHub API client
//!
//! Direct implementation of the `GitHubClient` trait using the octocrab
//! library. Requests go through octocrab's raw request methods so that every
//! non-2xx response can be turned into a [`ClientError::Api`] carrying the
//! status and the body's message.

use crate::client::{ClientResult, GitHubClient};
use crate::config::RequestConfig;
use crate::error::ClientError;
use crate::types::{
    DraftReviewComment, PullRequest, PullRequestRef, RawPullRequest, RawReviewComment, RepoRef,
    ReviewComment, ReviewEvent, ReviewRequestBody, SubmittedReview, User,
};
use async_trait::async_trait;
use http::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use log::debug;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

const MEDIA_JSON: &str = "application/vnd.github+json";
const MEDIA_DIFF: &str = "application/vnd.github.v3.diff";
const MEDIA_RAW: &str = "application/vnd.github.raw+json";
const COMMENTS_PER_PAGE: &str = "100";

/// HTTP verbs used by this client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

/// Direct GitHub API client using octocrab
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Arc<Octocrab>,
    has_token: bool,
}

impl OctocrabClient {
    /// Build a client from explicit configuration
    ///
    /// Automatic retries are disabled: each operation is a single request.
    pub fn from_config(config: &RequestConfig) -> ClientResult<Self> {
        let mut builder = Octocrab::builder()
            .base_uri(config.base_url().as_str())
            .map_err(|e| ClientError::Transport(format!("invalid base URL: {}", e)))?
            .add_retry_config(RetryConfig::None)
            .add_header(
                HeaderName::from_static("x-github-api-version"),
                config.api_version.clone(),
            );

        if let Some(token) = &config.token {
            builder = builder.personal_token(token.clone());
        }

        let octocrab = builder.build()?;
        debug!("GitHub client created for {}", config.base_url());

        Ok(Self {
            octocrab: Arc::new(octocrab),
            has_token: config.token.is_some(),
        })
    }

    /// Get a reference to the underlying octocrab instance
    pub fn octocrab(&self) -> &Octocrab {
        &self.octocrab
    }

    /// Whether authenticated calls can be made
    pub fn has_token(&self) -> bool {
        self.has_token
    }

    fn require_token(&self) -> ClientResult<()> {
        if self.has_token {
            Ok(())
        } else {
            Err(ClientError::MissingToken)
        }
    }

    /// Send one request and return the body of a 2xx response.
    async fn send<B: Serialize + Sync + ?Sized>(
        &self,
        method: Method,
        route: &str,
        accept: &'static str,
        body: Option<&B>,
    ) -> ClientResult<String> {
        debug!("{:?} {}", method, route);

        let response = match method {
            Method::Get => {
                let mut headers = HeaderMap::new();
                headers.insert(ACCEPT, HeaderValue::from_static(accept));
                self.octocrab
                    ._get_with_headers(route, Some(headers))
                    .await?
            }
            Method::Post => self.octocrab._post(route, body).await?,
            Method::Patch => self.octocrab._patch(route, body).await?,
            Method::Delete => self.octocrab._delete(route, body).await?,
        };

        let status = response.status();
        let text = self.octocrab.body_to_string(response).await?;

        if !status.is_success() {
            debug!("{:?} {} failed with {}", method, route, status);
            return Err(ClientError::from_response(
                status.as_u16(),
                status.canonical_reason(),
                &text,
            ));
        }

        Ok(text)
    }

    async fn get_json<T: DeserializeOwned>(&self, route: &str) -> ClientResult<T> {
        let text = self.send::<()>(Method::Get, route, MEDIA_JSON, None).await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Build `/seg/seg?k=v` with percent-encoded segments and query values.
fn route(segments: &[&str], query: &[(&str, &str)]) -> ClientResult<String> {
    let mut url = url::Url::parse("http://localhost/")
        .map_err(|e| ClientError::Transport(e.to_string()))?;

    url.path_segments_mut()
        .map_err(|_| ClientError::Transport("cannot build request path".to_string()))?
        .clear()
        .extend(segments);

    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }

    let mut route = url.path().to_string();
    if let Some(q) = url.query() {
        route.push('?');
        route.push_str(q);
    }
    Ok(route)
}

/// Segments for `/repos/{owner}/{repo}/...`
fn repo_segments<'a>(repo: &'a RepoRef, rest: &[&'a str]) -> Vec<&'a str> {
    let mut segments = vec!["repos", repo.owner.as_str(), repo.repo.as_str()];
    segments.extend_from_slice(rest);
    segments
}

/// Slice 1-based inclusive `start..=end` out of file content.
fn slice_lines(content: &str, start: u32, end: u32) -> Vec<String> {
    let start = start.max(1);
    if end < start {
        return Vec::new();
    }
    content
        .lines()
        .skip((start - 1) as usize)
        .take((end - start + 1) as usize)
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl GitHubClient for OctocrabClient {
    async fn fetch_current_user(&self) -> ClientResult<User> {
        self.require_token()?;
        self.get_json(&route(&["user"], &[])?).await
    }

    async fn fetch_pull_request(&self, pr: &PullRequestRef) -> ClientResult<PullRequest> {
        pr.validate()?;
        let number = pr.number.to_string();
        let route = route(&repo_segments(&pr.repo, &["pulls", &number]), &[])?;

        let raw: RawPullRequest = self.get_json(&route).await?;
        Ok(raw.into())
    }

    async fn fetch_pull_request_diff(&self, pr: &PullRequestRef) -> ClientResult<String> {
        pr.validate()?;
        let number = pr.number.to_string();
        let route = route(&repo_segments(&pr.repo, &["pulls", &number]), &[])?;

        let diff = self
            .send::<()>(Method::Get, &route, MEDIA_DIFF, None)
            .await?;
        debug!("Fetched diff for #{} ({} bytes)", pr.number, diff.len());
        Ok(diff)
    }

    async fn fetch_review_comments(
        &self,
        pr: &PullRequestRef,
    ) -> ClientResult<Vec<ReviewComment>> {
        pr.validate()?;
        let number = pr.number.to_string();
        let route = route(
            &repo_segments(&pr.repo, &["pulls", &number, "comments"]),
            &[("per_page", COMMENTS_PER_PAGE)],
        )?;

        let raw: Vec<RawReviewComment> = self.get_json(&route).await?;
        debug!("Fetched {} review comments for #{}", raw.len(), pr.number);
        Ok(raw.into_iter().map(ReviewComment::from).collect())
    }

    async fn fetch_file_lines(
        &self,
        repo: &RepoRef,
        path: &str,
        commit_sha: &str,
        start: u32,
        end: u32,
    ) -> ClientResult<Vec<String>> {
        repo.validate()?;
        if path.trim().is_empty() {
            return Err(ClientError::MissingField("path"));
        }
        if commit_sha.trim().is_empty() {
            return Err(ClientError::MissingField("commit_sha"));
        }
        if end < start.max(1) {
            return Ok(Vec::new());
        }

        let mut rest = vec!["contents"];
        rest.extend(path.split('/').filter(|s| !s.is_empty()));
        let route = route(&repo_segments(repo, &rest), &[("ref", commit_sha)])?;

        let content = self.send::<()>(Method::Get, &route, MEDIA_RAW, None).await?;
        let lines = slice_lines(&content, start, end);
        debug!(
            "Fetched {} lines of {} @ {} ({}..={})",
            lines.len(),
            path,
            commit_sha,
            start,
            end
        );
        Ok(lines)
    }

    async fn edit_review_comment(
        &self,
        repo: &RepoRef,
        comment_id: u64,
        body: &str,
    ) -> ClientResult<ReviewComment> {
        if body.trim().is_empty() {
            return Err(ClientError::EmptyCommentBody);
        }
        self.require_token()?;
        repo.validate()?;

        let id = comment_id.to_string();
        let route = route(&repo_segments(repo, &["pulls", "comments", &id]), &[])?;
        let payload = serde_json::json!({ "body": body });

        let text = self
            .send(Method::Patch, &route, MEDIA_JSON, Some(&payload))
            .await?;
        let raw: RawReviewComment = serde_json::from_str(&text)?;
        Ok(raw.into())
    }

    async fn delete_review_comment(&self, repo: &RepoRef, comment_id: u64) -> ClientResult<()> {
        self.require_token()?;
        repo.validate()?;

        let id = comment_id.to_string();
        let route = route(&repo_segments(repo, &["pulls", "comments", &id]), &[])?;

        self.send::<()>(Method::Delete, &route, MEDIA_JSON, None)
            .await?;
        debug!("Deleted review comment {}", comment_id);
        Ok(())
    }

    async fn submit_review(
        &self,
        pr: &PullRequestRef,
        commit_id: Option<&str>,
        event: ReviewEvent,
        body: Option<&str>,
        comments: &[DraftReviewComment],
    ) -> ClientResult<SubmittedReview> {
        self.require_token()?;
        pr.validate()?;
        if comments.iter().any(|c| c.body.trim().is_empty()) {
            return Err(ClientError::EmptyCommentBody);
        }

        let number = pr.number.to_string();
        let route = route(&repo_segments(&pr.repo, &["pulls", &number, "reviews"]), &[])?;
        let payload = ReviewRequestBody {
            commit_id,
            body: body.filter(|b| !b.trim().is_empty()),
            event,
            comments,
        };

        let text = self
            .send(Method::Post, &route, MEDIA_JSON, Some(&payload))
            .await?;
        let review: SubmittedReview = serde_json::from_str(&text)?;
        debug!(
            "Submitted review {} on #{} with {} comments",
            review.id,
            pr.number,
            comments.len()
        );
        Ok(review)
    }
}
