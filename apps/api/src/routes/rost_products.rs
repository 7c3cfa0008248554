//! `/api/rost-products/{id}` - proxy to the upstream rost product feed.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::error::ApiResult;
use crate::state::AppState;

/// Proxies a single product from the upstream feed.
///
/// The fetch goes through the session retry helper; an upstream 404 maps
/// straight to a 404 here. The payload is upstream-owned JSON and is passed
/// through untouched.
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let product = state.upstream.fetch_rost_product(&id).await?;
    Ok(Json(product))
}
