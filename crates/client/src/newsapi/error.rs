//! News API client error types.

use std::sync::Arc;

/// Errors from the news search API client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NewsError {
    /// No API key configured.
    #[error("missing API key: LIFTOFF_NEWS_API_KEY not set")]
    MissingApiKey,

    /// The configured base URL could not be joined with the endpoint path.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The API answered with a status other than "ok".
    #[error("API error ({}): {}", .code.as_deref().unwrap_or("unknown"), .message.as_deref().unwrap_or("Unknown error"))]
    Api { code: Option<String>, message: Option<String> },

    /// Non-success HTTP response without a readable API body.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for NewsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { NewsError::Timeout } else { NewsError::Network(Arc::new(err)) }
    }
}

impl NewsError {
    /// True when the API itself rejected the request (bad key, quota, bad query).
    pub fn is_api_rejection(&self) -> bool {
        matches!(self, NewsError::Api { .. } | NewsError::HttpError { .. })
    }
}
