//! News search API client.
//!
//! Provides a client for the NewsAPI `everything` endpoint and the
//! [`ArticleSource`] trait the fetcher is written against.
//!
//! ### Specification
//!
//! - **Endpoint**: `https://newsapi.org/v2/everything`
//! - **Authentication**: `apiKey` query parameter.
//! - **Parameters**: `q`, `language`, `sortBy`.
//! - **Outcome**: decided by the body's `status` field, not the HTTP code.
//!   The API reports bad keys, quota and bad queries as `{"status": "error"}`
//!   bodies with a 4xx code.

pub mod error;
pub mod request;
pub mod response;

pub use error::NewsError;
pub use request::SearchRequest;
pub use response::NewsApiResponse;

use async_trait::async_trait;
use liftoff_core::{AppConfig, Article};
use request::AuthenticatedRequest;
use reqwest::header;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default base URL for the news API.
const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "liftoff/0.1";

/// Longest slice of a response body copied into failure logs.
const BODY_LOG_LIMIT: usize = 1024;

/// Lossy UTF-8 view of `bytes`, cut at [`BODY_LOG_LIMIT`] characters.
fn body_excerpt(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    match text.char_indices().nth(BODY_LOG_LIMIT) {
        Some((cut, _)) => format!("{}... ({} bytes)", &text[..cut], bytes.len()),
        None => text.into_owned(),
    }
}

/// Anything that can answer a search query with a list of articles.
///
/// [`NewsApiClient`] is the production implementation.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Article>, NewsError>;
}

/// News API client configuration.
#[derive(Clone)]
pub struct NewsConfig {
    pub api_key: String,
    /// Base URL (default: https://newsapi.org/v2).
    pub base_url: String,
    /// Article language filter (default: en).
    pub language: String,
    /// Sort order (default: publishedAt).
    pub sort_by: String,
    /// Request timeout (default: 20s).
    pub timeout: Duration,
    pub user_agent: String,
}

impl std::fmt::Debug for NewsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("language", &self.language)
            .field("sort_by", &self.sort_by)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            language: "en".to_string(),
            sort_by: "publishedAt".to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl NewsConfig {
    /// Build a client configuration from the loaded application config.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, NewsError> {
        let api_key = config.require_news_api_key().map_err(|_| NewsError::MissingApiKey)?;

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: config.news_api_base_url.clone(),
            language: config.language.clone(),
            sort_by: config.sort_by.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        })
    }
}

/// News search API client.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    http: reqwest::Client,
    config: Arc<NewsConfig>,
    endpoint: url::Url,
}

impl NewsApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: NewsConfig) -> Result<Self, NewsError> {
        if config.api_key.is_empty() {
            return Err(NewsError::MissingApiKey);
        }

        let endpoint = url::Url::parse(&format!("{}/everything", config.base_url.trim_end_matches('/')))
            .map_err(|e| NewsError::InvalidBaseUrl(format!("{}: {}", config.base_url, e)))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| NewsError::Network(Arc::new(e)))?;

        Ok(Self { http, config: Arc::new(config), endpoint })
    }

    /// Create a client from the application configuration.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, NewsError> {
        Self::new(NewsConfig::from_app_config(config)?)
    }

    /// The request that [`ArticleSource::search`] sends for `query`.
    pub fn request_for(&self, query: &str) -> SearchRequest {
        SearchRequest::new(query, &self.config.language, &self.config.sort_by)
    }

    /// Execute one search against the API.
    ///
    /// Makes exactly one HTTP request; retrying is the caller's job.
    pub async fn execute(&self, req: &SearchRequest) -> Result<Vec<Article>, NewsError> {
        let start = Instant::now();

        tracing::debug!(endpoint = %self.endpoint, query = %req.q, "searching news API");

        let http_response = self
            .http
            .get(self.endpoint.clone())
            .header(header::ACCEPT, "application/json")
            .query(&AuthenticatedRequest::new(req, &self.config.api_key))
            .send()
            .await?;

        let status = http_response.status();
        tracing::info!(status = status.as_u16(), "news API response status");

        let bytes = http_response.bytes().await?;

        let body: NewsApiResponse = match serde_json::from_slice(&bytes) {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(status = status.as_u16(), body = %body_excerpt(&bytes), "unreadable news API response");
                if !status.is_success() {
                    return Err(NewsError::HttpError { status: status.as_u16() });
                }
                return Err(NewsError::Parse(e.to_string()));
            }
        };

        if !body.is_ok() {
            tracing::error!(
                status = status.as_u16(),
                api_code = body.code.as_deref().unwrap_or("unknown"),
                api_message = body.message.as_deref().unwrap_or("Unknown error"),
                "news API returned an error"
            );
            tracing::debug!(body = %body_excerpt(&bytes), "full news API error response");
        }

        tracing::debug!(
            api_status = %body.status,
            total_results = ?body.total_results,
            articles = body.articles.len(),
            elapsed = ?start.elapsed(),
            "news API response body"
        );

        body.into_articles()
    }
}

#[async_trait]
impl ArticleSource for NewsApiClient {
    async fn search(&self, query: &str) -> Result<Vec<Article>, NewsError> {
        self.execute(&self.request_for(query)).await
    }
}
