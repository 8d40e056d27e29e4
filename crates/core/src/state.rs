//! In-memory fetch state.
//!
//! Holds the most recently fetched article list together with the time of
//! the fetch that produced it. There is exactly one [`SharedState`] per
//! process; the scheduler, HTTP handlers and CLI all receive a clone of the
//! same handle rather than reaching for a global.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A single article as returned by the news API.
///
/// Articles are passed through untouched, so unknown fields survive.
pub type Article = serde_json::Value;

/// The cached result of the last successful fetch.
#[derive(Debug, Clone, Default)]
pub struct FetchState {
    /// When the current `articles` were fetched. `None` until the first success.
    pub last_fetch_time: Option<DateTime<Utc>>,
    /// Articles from the last successful fetch, in API order.
    pub articles: Vec<Article>,
}

/// Summary served by the `/status` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    /// RFC 3339 timestamp of the last successful fetch, or null.
    pub last_fetch_time: Option<String>,
    pub articles_count: usize,
}

/// Lock-protected handle to the process-wide [`FetchState`].
///
/// Cloning is cheap and every clone observes the same state.
#[derive(Debug, Clone, Default)]
pub struct SharedState {
    inner: Arc<RwLock<FetchState>>,
}

impl SharedState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the article list and stamp it with the current time.
    ///
    /// Both fields are written under a single write guard.
    pub async fn replace(&self, articles: Vec<Article>) -> DateTime<Utc> {
        let fetched_at = Utc::now();
        let mut guard = self.inner.write().await;
        guard.articles = articles;
        guard.last_fetch_time = Some(fetched_at);
        fetched_at
    }

    /// Clone of the current article list.
    pub async fn articles(&self) -> Vec<Article> {
        self.inner.read().await.articles.clone()
    }

    /// Clone of the whole state.
    pub async fn snapshot(&self) -> FetchState {
        self.inner.read().await.clone()
    }

    /// Timestamp and article count, read together.
    pub async fn status(&self) -> StatusSnapshot {
        let guard = self.inner.read().await;
        StatusSnapshot {
            last_fetch_time: guard.last_fetch_time.map(|t| t.to_rfc3339()),
            articles_count: guard.articles.len(),
        }
    }
}
