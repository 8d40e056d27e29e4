//! HTTP surface for liftoff.
//!
//! Serves the cached articles, the fetch status, and the two routes that
//! trigger an on-demand fetch. Front-end assets are served from a static
//! directory.

use std::path::Path;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;
pub mod scheduler;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

/// Build the application router.
pub fn create_app(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let static_dir = static_dir.as_ref();

    Router::new()
        .route("/api/news", get(handlers::get_news))
        .route("/api/preferences", post(handlers::set_preferences))
        .route("/status", get(handlers::get_status))
        .route("/fetch_news", get(handlers::manual_fetch))
        .route("/health", get(handlers::health))
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
