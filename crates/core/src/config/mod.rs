//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (LIFTOFF_*)
//! 2. TOML config file (if LIFTOFF_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (LIFTOFF_*)
/// 2. TOML config file (if LIFTOFF_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// NewsAPI key sent as the `apiKey` query parameter.
    ///
    /// Set via LIFTOFF_NEWS_API_KEY environment variable.
    #[serde(default)]
    pub news_api_key: Option<String>,

    /// Base URL of the news search API.
    ///
    /// Set via LIFTOFF_NEWS_API_BASE_URL environment variable.
    #[serde(default = "default_base_url")]
    pub news_api_base_url: String,

    /// Fixed search term every query starts from.
    #[serde(default = "default_base_query")]
    pub base_query: String,

    /// Article language filter.
    #[serde(default = "default_language")]
    pub language: String,

    /// Sort order requested from the API.
    #[serde(default = "default_sort_by")]
    pub sort_by: String,

    /// Attempts per fetch before giving up.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry, doubled on every subsequent retry.
    #[serde(default = "default_initial_delay_secs")]
    pub initial_delay_secs: u64,

    /// Seconds between scheduled fetches.
    #[serde(default = "default_fetch_interval_secs")]
    pub fetch_interval_secs: u64,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via LIFTOFF_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent string for outbound requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Socket address the HTTP server binds to.
    ///
    /// Set via LIFTOFF_BIND_ADDR environment variable.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Directory holding `index.html` and front-end assets.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// Emit logs as JSON lines instead of human-readable text.
    #[serde(default)]
    pub log_json: bool,
}

fn default_base_url() -> String {
    "https://newsapi.org/v2".into()
}

fn default_base_query() -> String {
    "SpaceX".into()
}

fn default_language() -> String {
    "en".into()
}

fn default_sort_by() -> String {
    "publishedAt".into()
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_delay_secs() -> u64 {
    1
}

fn default_fetch_interval_secs() -> u64 {
    3600
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_user_agent() -> String {
    "liftoff/0.1".into()
}

fn default_bind_addr() -> String {
    "0.0.0.0:5000".into()
}

fn default_static_dir() -> String {
    "./static".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            news_api_key: None,
            news_api_base_url: default_base_url(),
            base_query: default_base_query(),
            language: default_language(),
            sort_by: default_sort_by(),
            max_retries: default_max_retries(),
            initial_delay_secs: default_initial_delay_secs(),
            fetch_interval_secs: default_fetch_interval_secs(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            bind_addr: default_bind_addr(),
            static_dir: default_static_dir(),
            log_json: false,
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Base retry delay as a Duration.
    pub fn initial_delay(&self) -> Duration {
        Duration::from_secs(self.initial_delay_secs)
    }

    /// Scheduler period as a Duration.
    pub fn fetch_interval(&self) -> Duration {
        Duration::from_secs(self.fetch_interval_secs)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `LIFTOFF_`
    /// 2. TOML file from `LIFTOFF_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("LIFTOFF_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment.merge(
            Env::prefixed("LIFTOFF_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        )
    }

    /// Return the news API key or explain how to set it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the key is absent or blank.
    pub fn require_news_api_key(&self) -> Result<&str, ConfigError> {
        self.news_api_key.as_deref().filter(|key| !key.trim().is_empty()).ok_or_else(|| {
            ConfigError::Missing {
                field: "news_api_key".into(),
                hint: "Set LIFTOFF_NEWS_API_KEY environment variable".into(),
            }
        })
    }
}
