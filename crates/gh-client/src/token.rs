//! Access token lookup
//!
//! Tokens are resolved once and handed to [`RequestConfig`]; the client
//! itself never reads the environment.

use crate::config::RequestConfig;
use gh_pr_config::DEFAULT_HOST;
use log::debug;

/// Resolves GitHub tokens for different hosts
///
/// Tries multiple sources in order:
/// 1. Host-specific env var (e.g., `GITHUB_TOKEN_GHE_EXAMPLE_COM`)
/// 2. `gh auth token --hostname {host}` command
/// 3. Generic `GITHUB_TOKEN` or `GH_TOKEN` (github.com only)
#[derive(Debug, Clone, Default)]
pub struct TokenResolver {
    default_token: Option<String>,
}

impl TokenResolver {
    /// Create a resolver seeded from `GITHUB_TOKEN` / `GH_TOKEN`
    pub fn new() -> Self {
        let default_token = std::env::var("GITHUB_TOKEN")
            .or_else(|_| std::env::var("GH_TOKEN"))
            .ok()
            .filter(|t| !t.trim().is_empty());

        Self { default_token }
    }

    /// Create a resolver with an explicit fallback token
    pub fn with_default_token(token: impl Into<String>) -> Self {
        Self {
            default_token: Some(token.into()),
        }
    }

    /// Name of the host-specific token variable
    pub fn env_key(host: &str) -> String {
        format!(
            "GITHUB_TOKEN_{}",
            host.replace(['.', '-', ':', '/'], "_").to_uppercase()
        )
    }

    /// Look up a token for `host`
    ///
    /// `None` means reads go out anonymously and authenticated calls fail
    /// with a missing-token error.
    pub async fn resolve(&self, host: &str) -> Option<String> {
        let host = if host.trim().is_empty() {
            DEFAULT_HOST
        } else {
            host
        };

        let env_key = Self::env_key(host);
        if let Ok(token) = std::env::var(&env_key) {
            if !token.trim().is_empty() {
                debug!("Using token from env var {} for host {}", env_key, host);
                return Some(token);
            }
        }

        debug!("Trying gh auth token for host {}", host);
        match tokio::process::Command::new("gh")
            .args(["auth", "token", "--hostname", host])
            .output()
            .await
        {
            Ok(output) if output.status.success() => {
                let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !token.is_empty() {
                    debug!("Using token from gh CLI for host {}", host);
                    return Some(token);
                }
            }
            Ok(_) => debug!("gh auth token returned no token for {}", host),
            Err(e) => debug!("Failed to run 'gh auth token': {}", e),
        }

        if host == DEFAULT_HOST {
            if let Some(token) = &self.default_token {
                debug!("Using default token (GITHUB_TOKEN/GH_TOKEN) for github.com");
                return Some(token.clone());
            }
        }

        debug!(
            "No token found for host '{}'. Set {} or run 'gh auth login --hostname {}'",
            host, env_key, host
        );
        None
    }

    /// Fill in the token of `config` unless it already has one
    pub async fn apply(&self, config: RequestConfig) -> RequestConfig {
        if config.token.is_some() {
            return config;
        }
        match self.resolve(&config.host).await {
            Some(token) => config.with_token(token),
            None => config,
        }
    }
}
