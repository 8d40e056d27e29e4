//! Core types and shared functionality for liftoff.
//!
//! This crate provides:
//! - Layered application configuration
//! - Unified error types
//! - The in-memory fetch state shared by the scheduler and HTTP handlers
//! - Preferences and search query composition

pub mod config;
pub mod error;
pub mod query;
pub mod state;

pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use query::{ALL_TOPICS, Preferences, compose_query};
pub use state::{Article, FetchState, SharedState, StatusSnapshot};
