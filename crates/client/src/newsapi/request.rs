//! News API request parameters.

use serde::Serialize;

/// Query parameters for the `/everything` endpoint.
///
/// Field names follow the API's camelCase wire names.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SearchRequest {
    /// Full search expression, already composed from preferences.
    pub q: String,

    /// ISO 639-1 language filter (e.g., "en").
    pub language: String,

    /// Sort order: relevancy | popularity | publishedAt.
    #[serde(rename = "sortBy")]
    pub sort_by: String,
}

impl SearchRequest {
    pub fn new(q: impl Into<String>, language: impl Into<String>, sort_by: impl Into<String>) -> Self {
        Self { q: q.into(), language: language.into(), sort_by: sort_by.into() }
    }
}

/// Wire form including the credential; kept separate so the key never shows up in `Debug` output.
#[derive(Serialize)]
pub(crate) struct AuthenticatedRequest<'a> {
    q: &'a str,
    language: &'a str,
    #[serde(rename = "sortBy")]
    sort_by: &'a str,
    #[serde(rename = "apiKey")]
    api_key: &'a str,
}

impl<'a> AuthenticatedRequest<'a> {
    pub(crate) fn new(request: &'a SearchRequest, api_key: &'a str) -> Self {
        Self { q: &request.q, language: &request.language, sort_by: &request.sort_by, api_key }
    }
}
