//! `/api/catalog` and `/api/catalog-structure` - the storefront trees.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::error::ApiResult;
use crate::state::AppState;
use rost_core::CategoryTree;

/// Full catalog: categories, subcategories, and their active products.
pub async fn full(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<CategoryTree>>> {
    let tree = state.db.catalog().full_catalog().await?;
    Ok(Json(tree))
}

/// Lightweight navigation tree: categories and subcategories only.
pub async fn structure(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<CategoryTree>>> {
    let tree = state.db.catalog().structure().await?;
    Ok(Json(tree))
}
