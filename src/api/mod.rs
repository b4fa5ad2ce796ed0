//! Client for the search endpoint: transport, guest-token handling and
//! the paginated traversal engine.

mod client;
pub mod mock;
mod search;

pub use client::Client;
pub use mock::MockApi;
pub use search::{search_all, SearchOptions, SearchResult};

use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;

use crate::models::Adaptive;

/// Operations the traversal engine needs from the upstream service.
///
/// [`Client`] is the HTTP implementation; [`MockApi`] replays scripted
/// responses for tests.
#[async_trait]
pub trait SearchApi: Send + Sync + 'static {
    /// Obtain a fresh guest token from the activation endpoint.
    async fn activate_guest_token(&self) -> Result<String, ApiError>;

    /// Fetch a single page of search results.
    async fn search(&self, opts: &SearchOptions) -> Result<Adaptive, ApiError>;

    /// Retry budget for recoverable upstream errors. Zero disables retry.
    fn max_retry_attempts(&self) -> u32;
}

/// One `{code, message}` pair from an upstream error body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorItem {
    pub code: i64,
    pub message: String,
}

/// Structured error list the service returns with a non-2xx status.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ErrorResponse {
    pub errors: Vec<ErrorItem>,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.code, e.message))
            .collect();

        write!(f, "{}", lines.join("\n"))
    }
}

/// Errors from a single API call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// Connection or decode failure. Fatal; the traversal never retries these.
    #[error("network error: {0}")]
    Network(String),

    /// Structured error response from the service. Recoverable by
    /// refreshing the guest token, regardless of the reported codes.
    #[error("{0}")]
    Upstream(ErrorResponse),
}

impl ApiError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Upstream(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

/// Terminal failures of a paginated traversal, emitted as the last
/// element of the result stream.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// Guest-token activation failed. Never retried.
    #[error("failed to get guest token: {0}")]
    GuestToken(#[source] ApiError),

    /// A page fetch failed and was not (or could not be) retried.
    #[error("failed to search: {0}")]
    Search(#[source] ApiError),

    /// The retry budget ran out; wraps the last upstream error.
    #[error("retry limit exceeded: {0}")]
    RetryLimitExceeded(#[source] ApiError),

    /// A non-empty page carried no pagination cursor.
    #[error("failed to find cursor")]
    CursorNotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_display() {
        let res = ErrorResponse {
            errors: vec![ErrorItem {
                code: 200,
                message: "forbidden".to_string(),
            }],
        };

        assert_eq!(res.to_string(), "200: forbidden");
    }

    #[test]
    fn test_error_response_display_multiple() {
        let res = ErrorResponse {
            errors: vec![
                ErrorItem {
                    code: 88,
                    message: "rate limit exceeded".to_string(),
                },
                ErrorItem {
                    code: 200,
                    message: "forbidden".to_string(),
                },
            ],
        };

        assert_eq!(res.to_string(), "88: rate limit exceeded\n200: forbidden");
    }

    #[test]
    fn test_retryable_classification() {
        let upstream = ApiError::Upstream(ErrorResponse::default());
        assert!(upstream.is_retryable());

        let network = ApiError::Network("connection refused".to_string());
        assert!(!network.is_retryable());
    }

    #[test]
    fn test_search_error_messages() {
        let err = SearchError::RetryLimitExceeded(ApiError::Upstream(ErrorResponse {
            errors: vec![ErrorItem {
                code: 200,
                message: "forbidden".to_string(),
            }],
        }));

        assert_eq!(err.to_string(), "retry limit exceeded: 200: forbidden");
        assert_eq!(
            SearchError::CursorNotFound.to_string(),
            "failed to find cursor"
        );
    }
}
