//! `/admin/*` - the admin area behind the route guard.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::auth::AUTH_COOKIE;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use rost_core::{Product, UserRole};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

/// Full inventory listing, inactive products included.
///
/// The guard already verified an admin token; there is nothing left to
/// check here.
pub async fn inventory(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Product>>> {
    let products = state.db.products().list_inventory().await?;
    Ok(Json(products))
}

/// Login page endpoint.
///
/// Serves as the guard's redirect target; an already-authenticated admin
/// never reaches this (the guard bounces them to the inventory).
pub async fn login_page() -> Json<serde_json::Value> {
    Json(json!({ "page": "admin-login" }))
}

/// Credential check and token issue.
///
/// Compares against the configured admin login pair and answers with a
/// token in the body plus an `auth_token` cookie for browser navigation.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Response> {
    if request.login != state.config.admin_login
        || request.password != state.config.admin_password
    {
        warn!(login = %request.login, "Rejected admin login attempt");
        return Err(ApiError::AuthFailed("Invalid credentials".to_string()));
    }

    let token = state.jwt.generate_token(&request.login, UserRole::Admin)?;

    info!(login = %request.login, "Admin logged in");

    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Strict; Max-Age={}",
        AUTH_COOKIE, token, state.config.jwt_access_lifetime_secs
    );

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "token": token })),
    )
        .into_response())
}
