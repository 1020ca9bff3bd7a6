//! Client error taxonomy
//!
//! Validation errors are raised before any request is sent. Remote errors
//! carry the HTTP status and a best-effort message from the response body.

use thiserror::Error;

/// Errors returned by [`crate::GitHubClient`] implementations
#[derive(Debug, Error)]
pub enum ClientError {
    /// An authenticated call was made without a token
    #[error("missing access token for authenticated request")]
    MissingToken,

    /// A required pull request identity field is empty or zero
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A comment edit with a blank body
    #[error("comment body must not be empty")]
    EmptyCommentBody,

    /// The API answered with a non-2xx status
    #[error("GitHub API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The request could not be built or sent
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body did not have the expected shape
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status of a remote error
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the error was raised before any request was sent
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClientError::MissingToken
                | ClientError::MissingField(_)
                | ClientError::EmptyCommentBody
        )
    }

    /// Build an API error from a status and raw response body.
    ///
    /// The message is the body's JSON `message` field, else the status'
    /// canonical reason, else `HTTP <status>`.
    pub fn from_response(status: u16, reason: Option<&str>, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .filter(|m| !m.is_empty())
            .or_else(|| reason.map(str::to_string))
            .unwrap_or_else(|| format!("HTTP {}", status));

        ClientError::Api { status, message }
    }
}

impl From<octocrab::Error> for ClientError {
    fn from(err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => ClientError::Api {
                status: source.status_code.as_u16(),
                message: source.message.clone(),
            },
            other => ClientError::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_message_from_json_body() {
        let err = ClientError::from_response(
            422,
            Some("Unprocessable Entity"),
            r#"{"message":"Validation Failed","documentation_url":"https://docs.github.com"}"#,
        );
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.to_string(), "GitHub API error 422: Validation Failed");
    }

    #[test]
    fn test_message_falls_back_to_reason_for_non_json() {
        let err = ClientError::from_response(502, Some("Bad Gateway"), "<html>oops</html>");
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_message_falls_back_when_json_lacks_message() {
        let err = ClientError::from_response(404, Some("Not Found"), r#"{"error":"nope"}"#);
        assert_eq!(err.to_string(), "GitHub API error 404: Not Found");
    }

    #[test]
    fn test_message_without_reason() {
        let err = ClientError::from_response(599, None, "");
        assert_eq!(err.to_string(), "GitHub API error 599: HTTP 599");
    }

    #[test]
    fn test_validation_classification() {
        assert!(ClientError::MissingToken.is_validation());
        assert!(ClientError::MissingField("owner").is_validation());
        assert!(ClientError::EmptyCommentBody.is_validation());
        assert!(!ClientError::Transport("io".into()).is_validation());
        assert_eq!(ClientError::MissingToken.status(), None);
    }
}
