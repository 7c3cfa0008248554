//! `/api/orders/user` - the authenticated customer's order history.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use tracing::debug;

use crate::auth;
use crate::error::ApiResult;
use crate::state::AppState;
use rost_core::OrderWithItems;

/// Lists the caller's orders with their item snapshots.
///
/// The token subject is the customer email; no valid token means 401.
/// Admin tokens get an empty history, not an error - the admin login is
/// not a customer account.
pub async fn for_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<OrderWithItems>>> {
    let claims = auth::require_claims(&state, &headers)?;

    debug!(customer = %claims.sub, "Listing orders");

    let orders = state.db.orders().list_for_customer(&claims.sub).await?;
    Ok(Json(orders))
}
