//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use std::net::SocketAddr;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field: field.into(), reason: reason.into() }
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// The API key is not checked here; binaries that need it call
    /// [`AppConfig::require_news_api_key`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `news_api_base_url` is not an absolute http(s) URL
    /// - `base_query`, `language`, `sort_by` or `user_agent` is empty
    /// - `max_retries` is outside 1..=10
    /// - `initial_delay_secs` exceeds 60
    /// - `fetch_interval_secs` is 0
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `bind_addr` is not a socket address
    pub fn validate(&self) -> Result<(), ConfigError> {
        match url::Url::parse(&self.news_api_base_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => return Err(invalid("news_api_base_url", format!("unsupported scheme: {}", url.scheme()))),
            Err(e) => return Err(invalid("news_api_base_url", e.to_string())),
        }

        for (field, value) in [
            ("base_query", &self.base_query),
            ("language", &self.language),
            ("sort_by", &self.sort_by),
            ("user_agent", &self.user_agent),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(field, "must not be empty"));
            }
        }

        if !(1..=10).contains(&self.max_retries) {
            return Err(invalid("max_retries", "must be between 1 and 10"));
        }

        if self.initial_delay_secs > 60 {
            return Err(invalid("initial_delay_secs", "must not exceed 60 seconds"));
        }

        if self.fetch_interval_secs == 0 {
            return Err(invalid("fetch_interval_secs", "must be greater than 0"));
        }

        if self.timeout_ms < 100 {
            return Err(invalid("timeout_ms", "must be at least 100ms"));
        }
        if self.timeout_ms > 300_000 {
            return Err(invalid("timeout_ms", "must not exceed 5 minutes (300000ms)"));
        }

        if let Err(e) = self.bind_addr.parse::<SocketAddr>() {
            return Err(invalid("bind_addr", e.to_string()));
        }

        Ok(())
    }
}
