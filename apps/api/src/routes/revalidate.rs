//! `/api/revalidate-products` - secret-gated brands cache refresh.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::cache;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RevalidateParams {
    pub secret: Option<String>,
}

/// Refreshes the brands cache from upstream.
///
/// The secret check runs before anything touches the network or the disk:
/// a wrong or missing secret is a plain 401 with no side effects.
pub async fn revalidate(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RevalidateParams>,
) -> ApiResult<Json<serde_json::Value>> {
    if params.secret.as_deref() != Some(state.config.revalidation_secret.as_str()) {
        return Err(ApiError::AuthFailed("Invalid revalidation secret".to_string()));
    }

    let brands = state.upstream.fetch_brands().await?;
    cache::write_brands(&state.brands_cache_path(), &brands)
        .await
        .map_err(|e| ApiError::Internal(format!("Cache write failed: {}", e)))?;

    info!(count = brands.len(), "Brands cache revalidated");

    Ok(Json(json!({ "revalidated": true, "brands": brands.len() })))
}
