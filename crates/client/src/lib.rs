//! Client code for liftoff.
//!
//! This crate provides the news search API client, the bounded retry helper,
//! and the [`Fetcher`] that ties them to the shared fetch state.

pub mod fetcher;
pub mod newsapi;
pub mod retry;

pub use fetcher::{FetchError, Fetcher};
pub use newsapi::{ArticleSource, NewsApiClient, NewsConfig, NewsError, SearchRequest};
pub use retry::{Backoff, RetryError, RetryPolicy, retry};
