//! `/api/env` - runtime environment info for the frontend.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::json;

use crate::state::AppState;

/// Reports the environment name and the upstream base URL.
///
/// Secrets never appear here; the frontend only needs to know which
/// environment it is talking to and where the upstream lives.
pub async fn env_info(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "environment": state.config.environment,
        "upstream_base_url": state.config.upstream_base_url,
    }))
}
