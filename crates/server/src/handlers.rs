//! Route handlers.
//!
//! The two trigger routes run the fetch inline and always answer
//! `{"status": "success"}`: the reply confirms a fetch was attempted, not
//! that it succeeded. Callers that care compare `/status` before and after.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use liftoff_core::{Article, Preferences, StatusSnapshot};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{ApiError, AppState};

/// Body returned by the fetch-triggering routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerResponse {
    pub status: String,
    pub message: String,
}

impl TriggerResponse {
    fn success(message: &str) -> Self {
        Self { status: "success".into(), message: message.into() }
    }
}

/// `GET /api/news`
pub async fn get_news(State(state): State<AppState>) -> Json<Vec<Article>> {
    Json(state.cache().articles().await)
}

/// `GET /status`
pub async fn get_status(State(state): State<AppState>) -> Json<StatusSnapshot> {
    Json(state.cache().status().await)
}

/// `POST /api/preferences`
pub async fn set_preferences(
    State(state): State<AppState>, payload: Result<Json<Preferences>, JsonRejection>,
) -> Result<Json<TriggerResponse>, ApiError> {
    let Json(prefs) = payload?;
    tracing::info!(topics = ?prefs.topics, custom_search = ?prefs.custom_search, "preferences received");

    if let Err(e) = state.fetcher.refresh(&prefs).await {
        tracing::warn!(error = %e, "fetch triggered by preferences did not succeed");
    }

    Ok(Json(TriggerResponse::success("Preferences updated and news fetched")))
}

/// `GET /fetch_news`
pub async fn manual_fetch(State(state): State<AppState>) -> Json<TriggerResponse> {
    tracing::info!("manual news fetch requested");

    if let Err(e) = state.fetcher.refresh_default().await {
        tracing::warn!(error = %e, "manual fetch did not succeed");
    }

    Json(TriggerResponse::success("News fetch initiated"))
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}
