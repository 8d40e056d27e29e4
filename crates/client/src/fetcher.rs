//! Fetch-and-cache routine.
//!
//! [`Fetcher::refresh`] composes the search query from preferences, runs it
//! against an [`ArticleSource`] under a [`RetryPolicy`], and on success
//! replaces the shared state. On failure the previous state is left alone so
//! readers keep seeing the last good result.

use std::sync::Arc;

use liftoff_core::{AppConfig, Preferences, SharedState, compose_query};

use crate::newsapi::{ArticleSource, NewsApiClient, NewsError};
use crate::retry::{RetryError, RetryPolicy, retry};

/// Errors returned by [`Fetcher::refresh`].
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Every attempt failed; the state was not touched.
    #[error("failed to fetch news after {attempts} attempts: {last_error}")]
    Exhausted { attempts: u32, last_error: NewsError },

    /// The retry policy allows zero attempts.
    #[error("fetcher is configured with zero attempts")]
    NoAttempts,
}

impl FetchError {
    /// True when the last attempt was refused by the API rather than lost in transit.
    pub fn is_api_rejection(&self) -> bool {
        matches!(self, FetchError::Exhausted { last_error, .. } if last_error.is_api_rejection())
    }
}

impl From<RetryError<NewsError>> for FetchError {
    fn from(err: RetryError<NewsError>) -> Self {
        match err {
            RetryError::Exhausted { attempts, last_error } => FetchError::Exhausted { attempts, last_error },
            RetryError::NoAttempts => FetchError::NoAttempts,
        }
    }
}

impl From<FetchError> for liftoff_core::Error {
    fn from(err: FetchError) -> Self {
        liftoff_core::Error::FetchFailed(err.to_string())
    }
}

/// Fetches articles and stores them in the shared state.
///
/// Cheap to clone; clones share the source and the state.
#[derive(Clone)]
pub struct Fetcher {
    source: Arc<dyn ArticleSource>,
    state: SharedState,
    policy: RetryPolicy,
    base_query: String,
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("policy", &self.policy)
            .field("base_query", &self.base_query)
            .finish_non_exhaustive()
    }
}

impl Fetcher {
    pub fn new(
        source: Arc<dyn ArticleSource>, state: SharedState, policy: RetryPolicy, base_query: impl Into<String>,
    ) -> Self {
        Self { source, state, policy, base_query: base_query.into() }
    }

    /// Build a fetcher backed by the real news API client.
    pub fn from_app_config(config: &AppConfig, state: SharedState) -> Result<Self, NewsError> {
        let client = NewsApiClient::from_app_config(config)?;
        let policy = RetryPolicy::exponential(config.max_retries, config.initial_delay());

        let worst_case = policy.worst_case_delay();
        if worst_case >= config.fetch_interval() {
            tracing::warn!(
                worst_case_backoff_secs = worst_case.as_secs(),
                fetch_interval_secs = config.fetch_interval_secs,
                "Retry backoff can outlast the fetch interval; scheduled fetches may overlap"
            );
        }

        Ok(Self::new(Arc::new(client), state, policy, config.base_query.clone()))
    }

    /// The state this fetcher writes to.
    pub fn state(&self) -> &SharedState {
        &self.state
    }

    /// Query that [`Fetcher::refresh`] would send for `prefs`.
    pub fn query_for(&self, prefs: &Preferences) -> String {
        compose_query(&self.base_query, prefs)
    }

    /// Fetch with the given preferences and replace the cached articles.
    ///
    /// Returns the number of articles stored. On error the cached state is
    /// unchanged.
    pub async fn refresh(&self, prefs: &Preferences) -> Result<usize, FetchError> {
        let query = self.query_for(prefs);
        tracing::info!(query = %query, max_attempts = self.policy.max_attempts, "fetching news");

        let outcome = retry(&self.policy, |_attempt| {
            let source = Arc::clone(&self.source);
            let query = query.clone();
            async move { source.search(&query).await }
        })
        .await;

        match outcome {
            Ok(articles) => {
                let count = articles.len();
                let fetched_at = self.state.replace(articles).await;
                tracing::info!(articles = count, fetched_at = %fetched_at, "successfully fetched news");
                Ok(count)
            }
            Err(e) => {
                let attempts = e.attempts();
                let err = FetchError::from(e);
                if err.is_api_rejection() {
                    tracing::error!(attempts, error = %err, "news API rejected every attempt");
                } else {
                    tracing::error!(attempts, error = %err, "failed to fetch news after all retries");
                }
                Err(err)
            }
        }
    }

    /// [`Fetcher::refresh`] with no topic filter and no custom search.
    pub async fn refresh_default(&self) -> Result<usize, FetchError> {
        self.refresh(&Preferences::default()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use liftoff_core::Article;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::time::Instant;

    /// Plays back a fixed script of responses and records every query.
    struct ScriptedSource {
        script: Mutex<VecDeque<Result<Vec<Article>, NewsError>>>,
        queries: Mutex<Vec<String>>,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<Vec<Article>, NewsError>>) -> Arc<Self> {
            Arc::new(Self { script: Mutex::new(script.into()), queries: Mutex::new(Vec::new()) })
        }

        fn calls(&self) -> usize {
            self.queries.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ArticleSource for ScriptedSource {
        async fn search(&self, query: &str) -> Result<Vec<Article>, NewsError> {
            self.queries.lock().unwrap().push(query.to_string());
            self.script.lock().unwrap().pop_front().unwrap_or(Err(NewsError::Timeout))
        }
    }

    fn api_error() -> NewsError {
        NewsError::Api { code: Some("rateLimited".into()), message: Some("slow down".into()) }
    }

    fn fetcher(source: Arc<ScriptedSource>, max_attempts: u32) -> Fetcher {
        Fetcher::new(source, SharedState::new(), RetryPolicy::exponential(max_attempts, Duration::from_secs(1)), "SpaceX")
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_first_attempt() {
        let source = ScriptedSource::new(vec![Ok(vec![json!({"title": "A"}), json!({"title": "B"})])]);
        let fetcher = fetcher(source.clone(), 3);

        let count = fetcher.refresh_default().await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(source.calls(), 1);
        let snapshot = fetcher.state().snapshot().await;
        assert_eq!(snapshot.articles.len(), 2);
        assert!(snapshot.last_fetch_time.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fail_twice_then_succeed() {
        let source = ScriptedSource::new(vec![
            Err(NewsError::Timeout),
            Err(api_error()),
            Ok(vec![json!({"title": "A"})]),
        ]);
        let fetcher = fetcher(source.clone(), 3);
        let start = Instant::now();

        fetcher.refresh_default().await.unwrap();

        assert_eq!(source.calls(), 3);
        assert_eq!(fetcher.state().articles().await, vec![json!({"title": "A"})]);
        assert!(start.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_on_nth_attempt_for_each_n() {
        for n in 1..=4usize {
            let mut script: Vec<Result<Vec<Article>, NewsError>> = (1..n).map(|_| Err(api_error())).collect();
            script.push(Ok(vec![json!({"n": n})]));
            let source = ScriptedSource::new(script);
            let fetcher = fetcher(source.clone(), 4);

            fetcher.refresh_default().await.unwrap();

            assert_eq!(source.calls(), n);
            assert_eq!(fetcher.state().articles().await, vec![json!({"n": n})]);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_leaves_state_untouched() {
        let source = ScriptedSource::new(vec![
            Ok(vec![json!({"title": "cached"})]),
            Err(NewsError::Timeout),
            Err(api_error()),
            Err(NewsError::Parse("unexpected eof".into())),
            Ok(vec![json!({"title": "never reached"})]),
        ]);
        let fetcher = fetcher(source.clone(), 3);

        fetcher.refresh_default().await.unwrap();
        let before = fetcher.state().snapshot().await;

        let start = Instant::now();
        let err = fetcher.refresh_default().await.unwrap_err();

        assert!(matches!(err, FetchError::Exhausted { attempts: 3, last_error: NewsError::Parse(_) }));
        assert_eq!(source.calls(), 4);
        assert!(start.elapsed() >= Duration::from_secs(1 + 2));

        let after = fetcher.state().snapshot().await;
        assert_eq!(after.articles, before.articles);
        assert_eq!(after.last_fetch_time, before.last_fetch_time);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_on_empty_state_keeps_null_time() {
        let source = ScriptedSource::new(vec![]);
        let fetcher = fetcher(source.clone(), 2);

        assert!(fetcher.refresh_default().await.is_err());
        assert_eq!(source.calls(), 2);

        let status = fetcher.state().status().await;
        assert!(status.last_fetch_time.is_none());
        assert_eq!(status.articles_count, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_preferences_shape_the_query() {
        let source = ScriptedSource::new(vec![Ok(vec![])]);
        let fetcher = fetcher(source.clone(), 1);
        let prefs = Preferences::new(vec!["Starship".into(), "Starlink".into()], Some("launch".into()));

        fetcher.refresh(&prefs).await.unwrap();

        let queries = source.queries.lock().unwrap().clone();
        assert_eq!(queries, vec!["SpaceX AND (Starship OR Starlink) AND launch"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_success_still_replaces() {
        let source = ScriptedSource::new(vec![Ok(vec![json!({"title": "A"})]), Ok(vec![])]);
        let fetcher = fetcher(source, 1);

        fetcher.refresh_default().await.unwrap();
        fetcher.refresh_default().await.unwrap();

        assert_eq!(fetcher.state().status().await.articles_count, 0);
        assert!(fetcher.state().status().await.last_fetch_time.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_classifies_last_error() {
        let source = ScriptedSource::new(vec![Err(NewsError::Timeout), Err(api_error())]);
        let err = fetcher(source, 2).refresh_default().await.unwrap_err();
        assert!(err.is_api_rejection());

        let source = ScriptedSource::new(vec![Err(api_error()), Err(NewsError::Timeout)]);
        let err = fetcher(source, 2).refresh_default().await.unwrap_err();
        assert!(!err.is_api_rejection());
    }

    #[test]
    fn test_from_app_config_builds_policy() {
        let config = AppConfig {
            news_api_key: Some("k".into()),
            max_retries: 5,
            initial_delay_secs: 2,
            ..Default::default()
        };
        let fetcher = Fetcher::from_app_config(&config, SharedState::new()).unwrap();
        assert_eq!(fetcher.policy, RetryPolicy::exponential(5, Duration::from_secs(2)));
        assert_eq!(fetcher.base_query, "SpaceX");
    }

    #[test]
    fn test_fetch_error_into_core_error() {
        let err: liftoff_core::Error = FetchError::NoAttempts.into();
        assert_eq!(err.code(), "FETCH_FAILED");
    }
}
