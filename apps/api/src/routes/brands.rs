//! `/api/brands` - upstream brand list with a file-cache fallback.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use tracing::{info, warn};

use crate::cache;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use rost_core::Brand;

/// Serves the brand list.
///
/// Live upstream data is preferred and refreshed into the cache; a dead
/// upstream falls back to the last persisted copy. Only when both fail does
/// the client see an error.
pub async fn list(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Brand>>> {
    let cache_path = state.brands_cache_path();

    match state.upstream.fetch_brands().await {
        Ok(brands) => {
            if let Err(e) = cache::write_brands(&cache_path, &brands).await {
                // A stale cache is worse than a missing one, but not worth
                // failing the request over
                warn!(error = %e, "Failed to refresh brands cache");
            }
            Ok(Json(brands))
        }
        Err(upstream_err) => {
            warn!(error = %upstream_err, "Upstream brands fetch failed, trying cache");

            match cache::read_brands(&cache_path).await {
                Ok(brands) => {
                    info!(count = brands.len(), "Serving brands from cache");
                    Ok(Json(brands))
                }
                Err(cache_err) => {
                    warn!(error = %cache_err, "Brands cache unavailable");
                    Err(ApiError::Upstream(upstream_err))
                }
            }
        }
    }
}
