//! `/api/search` - substring product search.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::state::AppState;
use rost_core::{validation, Product, ValidationError};

/// Default cap on search results.
const DEFAULT_SEARCH_LIMIT: u32 = 50;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<u32>,
}

/// Case-insensitive substring search across name, description, and code.
///
/// Queries under the minimum length return an empty list rather than an
/// error; the storefront search box fires on every keystroke.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<Product>>> {
    let query = match validation::validate_search_query(&params.q) {
        Ok(normalized) => normalized,
        Err(ValidationError::TooShort { .. }) => return Ok(Json(Vec::new())),
        Err(other) => return Err(other.into()),
    };

    let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    let products = state.db.products().search(&query, limit).await?;

    Ok(Json(products))
}
