//! `/api/products/*` - storefront product listings.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::state::AppState;
use rost_core::{validation, Product, DEFAULT_LATEST_LIMIT};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SpecificRequest {
    pub ids: Vec<String>,
}

/// Newest active products for the home page.
pub async fn latest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Product>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LATEST_LIMIT);
    let products = state.db.products().list_latest(limit).await?;
    Ok(Json(products))
}

/// Products currently on offer.
pub async fn offers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Product>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LATEST_LIMIT);
    let products = state.db.products().list_offers(limit).await?;
    Ok(Json(products))
}

/// Products for an explicit id list (wishlist, cart restore).
pub async fn specific(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SpecificRequest>,
) -> ApiResult<Json<Vec<Product>>> {
    validation::validate_id_list(&request.ids)?;

    let products = state.db.products().list_by_ids(&request.ids).await?;
    Ok(Json(products))
}
