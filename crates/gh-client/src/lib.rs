//! GitHub REST client for pull request review
//!
//! This crate provides a trait-based client covering the calls a diff
//! viewer needs: pull request metadata, the raw diff, file contents for
//! context expansion, and inline review comments.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              GitHubClient trait                  │
//! │  - fetch_pull_request_diff()                     │
//! │  - fetch_file_lines()                            │
//! │  - submit_review()                               │
//! └─────────────────────────────────────────────────┘
//!                        │
//!                        ▼
//!               ┌─────────────────┐
//!               │ OctocrabClient  │◄── RequestConfig (host, token, version)
//!               └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_client::{GitHubClient, OctocrabClient, PullRequestRef, RequestConfig, TokenResolver};
//!
//! # async fn example() -> Result<(), gh_client::ClientError> {
//! let config = TokenResolver::new().apply(RequestConfig::default()).await;
//! let client = OctocrabClient::from_config(&config)?;
//!
//! let diff = client
//!     .fetch_pull_request_diff(&PullRequestRef::new("rust-lang", "rust", 1))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod octocrab_client;
pub mod token;
pub mod types;

pub use client::{ClientResult, GitHubClient};
pub use config::{RequestConfig, DEFAULT_API_VERSION};
pub use error::ClientError;
pub use octocrab_client::OctocrabClient;
pub use token::TokenResolver;
pub use types::{
    DraftReviewComment, PullRequest, PullRequestRef, RepoRef, ReviewComment, ReviewEvent,
    ReviewSide, SubmittedReview, User,
};

// Re-export octocrab so consumers don't need to depend on it directly
pub use octocrab;
