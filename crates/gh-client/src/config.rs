//! Explicit request configuration
//!
//! Every client is built from a [`RequestConfig`]; there is no ambient
//! authentication or host state.

use gh_pr_config::{AppConfig, DEFAULT_HOST};

/// Default value of the `X-GitHub-Api-Version` header
pub const DEFAULT_API_VERSION: &str = "2022-11-28";

/// Host, credentials and API version for a client
#[derive(Clone, PartialEq, Eq)]
pub struct RequestConfig {
    /// GitHub host, or a full base URL (`http://…` / `https://…`)
    pub host: String,
    /// Bearer token; required for authenticated calls
    pub token: Option<String>,
    /// Value of the `X-GitHub-Api-Version` header
    pub api_version: String,
}

impl std::fmt::Debug for RequestConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestConfig")
            .field("host", &self.host)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            token: None,
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl RequestConfig {
    /// Configuration for `host` without a token
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// Take host and API version from the application config
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            host: config.host.clone(),
            token: None,
            api_version: config.api_version.clone(),
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = if token.trim().is_empty() {
            None
        } else {
            Some(token)
        };
        self
    }

    /// Set the API version header value
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// REST base URL for the configured host
    ///
    /// - `github.com` → `https://api.github.com`
    /// - enterprise host → `https://{host}/api/v3`
    /// - a full URL is used verbatim (trailing slash removed)
    pub fn base_url(&self) -> String {
        let host = self.host.trim();
        if host.starts_with("http://") || host.starts_with("https://") {
            host.trim_end_matches('/').to_string()
        } else if host.is_empty() || host == DEFAULT_HOST {
            "https://api.github.com".to_string()
        } else {
            format!("https://{}/api/v3", host)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_base_url() {
        assert_eq!(RequestConfig::default().base_url(), "https://api.github.com");
        assert_eq!(
            RequestConfig::new("ghe.example.com").base_url(),
            "https://ghe.example.com/api/v3"
        );
        assert_eq!(
            RequestConfig::new("http://127.0.0.1:8080/").base_url(),
            "http://127.0.0.1:8080"
        );
    }

    #[test]
    fn test_blank_token_is_none() {
        let config = RequestConfig::default().with_token("  ");
        assert!(config.token.is_none());

        let config = RequestConfig::default().with_token("ghp_abc");
        assert_eq!(config.token.as_deref(), Some("ghp_abc"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = RequestConfig::default().with_token("ghp_secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("ghp_secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_from_app_config() {
        let app = AppConfig {
            host: "ghe.corp".to_string(),
            api_version: "2024-01-01".to_string(),
            ..AppConfig::default()
        };
        let config = RequestConfig::from_app_config(&app);
        assert_eq!(config.host, "ghe.corp");
        assert_eq!(config.api_version, "2024-01-01");
        assert!(config.token.is_none());
    }
}
