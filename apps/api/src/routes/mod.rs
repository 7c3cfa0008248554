//! # Route Layer
//!
//! Router assembly and the route handler modules.
//!
//! ## Route Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Rost API Routes                                │
//! │                                                                         │
//! │  Public storefront                                                      │
//! │    GET  /api/brands               upstream brands (file-cache fallback) │
//! │    GET  /api/catalog              full category/subcategory/product tree│
//! │    GET  /api/catalog-structure    navigation tree, no products          │
//! │    GET  /api/search?q=            substring product search              │
//! │    GET  /api/products/latest      newest products                       │
//! │    GET  /api/products/offers      discounted products                   │
//! │    POST /api/products/specific    products for an id list               │
//! │    GET  /api/orders/user          caller's orders (auth required)       │
//! │    GET  /api/rost-products/{id}   proxy to the upstream feed            │
//! │    GET  /api/revalidate-products  secret-gated cache refresh            │
//! │    GET  /api/env                  runtime environment info              │
//! │    GET  /health                   liveness + DB ping                    │
//! │                                                                         │
//! │  Admin (behind the route guard)                                         │
//! │    GET  /admin/inventar           full inventory, inactive included     │
//! │    GET  /admin/login              login page endpoint                   │
//! │    POST /admin/login              credential check, token issue         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod admin;
pub mod brands;
pub mod catalog;
pub mod env;
pub mod orders;
pub mod products;
pub mod revalidate;
pub mod rost_products;
pub mod search;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::auth;
use crate::state::AppState;

/// Builds the full application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let admin_routes = Router::new()
        .route("/admin/inventar", get(admin::inventory))
        .route("/admin/login", get(admin::login_page).post(admin::login))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::admin_guard,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/api/brands", get(brands::list))
        .route("/api/catalog", get(catalog::full))
        .route("/api/catalog-structure", get(catalog::structure))
        .route("/api/search", get(search::search))
        .route("/api/products/latest", get(products::latest))
        .route("/api/products/offers", get(products::offers))
        .route("/api/products/specific", axum::routing::post(products::specific))
        .route("/api/orders/user", get(orders::for_user))
        .route("/api/rost-products/{id}", get(rost_products::get_product))
        .route("/api/revalidate-products", get(revalidate::revalidate))
        .route("/api/env", get(env::env_info))
        .merge(admin_routes)
        .with_state(state)
}

/// Liveness probe with a database ping.
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    if state.db.health_check().await {
        (StatusCode::OK, Json(json!({ "status": "ok" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "degraded", "database": "down" })),
        )
    }
}
