//! HTTP-level tests for the storefront router.
//!
//! Every test builds the real router over an in-memory SQLite database and
//! drives it with `tower::ServiceExt::oneshot`. The upstream URL points at a
//! closed port so upstream-dependent routes exercise their failure paths.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::Utc;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use rost_api::auth::AUTH_COOKIE;
use rost_api::upstream::UpstreamClient;
use rost_api::{build_router, ApiConfig, AppState};
use rost_core::{Order, OrderItem, OrderStatus, Product, UserRole};
use rost_db::{Database, DbConfig};

// Nothing listens here; connects fail fast.
const DEAD_UPSTREAM: &str = "http://127.0.0.1:9/api";

struct TestApp {
    state: Arc<AppState>,
    router: axum::Router,
    _cache_dir: TempDir,
}

async fn test_app() -> TestApp {
    let cache_dir = TempDir::new().unwrap();
    let cache_path = cache_dir.path().join("brands.json");

    let config = ApiConfig {
        http_port: 0,
        database_path: ":memory:".to_string(),
        upstream_base_url: DEAD_UPSTREAM.to_string(),
        ultra_api_url: None,
        admin_login: "admin".to_string(),
        admin_password: "hunter2".to_string(),
        revalidation_secret: "refresh-me".to_string(),
        jwt_secret: "test-secret".to_string(),
        jwt_access_lifetime_secs: 3600,
        brands_cache_path: cache_path.to_string_lossy().into_owned(),
        environment: "test".to_string(),
    };

    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    let mut state = AppState::new(config, db);
    state.upstream = UpstreamClient::new(DEAD_UPSTREAM, DEAD_UPSTREAM)
        .with_retry_delay(Duration::from_millis(1));
    let state = Arc::new(state);

    TestApp {
        router: build_router(state.clone()),
        state,
        _cache_dir: cache_dir,
    }
}

fn product(code: &str, name: &str, price: i64, discount: Option<i64>) -> Product {
    let now = Utc::now();
    Product {
        id: uuid::Uuid::new_v4().to_string(),
        code: code.to_string(),
        name: name.to_string(),
        slug: format!("{}-slug", code.to_lowercase()),
        description: None,
        brand: None,
        subcategory_id: None,
        price_cents: price,
        discount_price_cents: discount,
        stock: 5,
        image_url: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

async fn get(router: &axum::Router, uri: &str) -> axum::response::Response {
    router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn get_with_token(router: &axum::Router, uri: &str, token: &str) -> axum::response::Response {
    router
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

// =============================================================================
// Admin Route Guard
// =============================================================================

#[tokio::test]
async fn unauthenticated_admin_request_redirects_to_login() {
    let app = test_app().await;

    let response = get(&app.router, "/admin/inventar").await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/admin/login");
}

#[tokio::test]
async fn invalid_token_behaves_like_no_token() {
    let app = test_app().await;

    let response = get_with_token(&app.router, "/admin/inventar", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/admin/login");
}

#[tokio::test]
async fn customer_token_on_admin_route_redirects_home() {
    let app = test_app().await;
    let token = app
        .state
        .jwt
        .generate_token("ana@example.com", UserRole::Customer)
        .unwrap();

    let response = get_with_token(&app.router, "/admin/inventar", &token).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn admin_token_on_login_page_redirects_to_inventory() {
    let app = test_app().await;
    let token = app.state.jwt.generate_token("admin", UserRole::Admin).unwrap();

    let response = get_with_token(&app.router, "/admin/login", &token).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/admin/inventar");
}

#[tokio::test]
async fn login_page_passes_without_token() {
    let app = test_app().await;

    let response = get(&app.router, "/admin/login").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn admin_token_reaches_inventory() {
    let app = test_app().await;
    app.state
        .db
        .products()
        .insert(&product("ROST-1001", "Polizor", 12999, None))
        .await
        .unwrap();

    let hidden = product("ROST-1002", "Ascuns", 5000, None);
    app.state.db.products().insert(&hidden).await.unwrap();
    app.state.db.products().soft_delete(&hidden.id).await.unwrap();

    let token = app.state.jwt.generate_token("admin", UserRole::Admin).unwrap();
    let response = get_with_token(&app.router, "/admin/inventar", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Inventory shows inactive products too
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn guard_accepts_token_from_cookie() {
    let app = test_app().await;
    let token = app.state.jwt.generate_token("admin", UserRole::Admin).unwrap();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/admin/inventar")
                .header(header::COOKIE, format!("{}={}", AUTH_COOKIE, token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Admin Login
// =============================================================================

#[tokio::test]
async fn login_issues_working_token() {
    let app = test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"login":"admin","password":"hunter2"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(header::SET_COOKIE));

    let body = json_body(response).await;
    let token = body["token"].as_str().unwrap().to_string();

    let response = get_with_token(&app.router, "/admin/inventar", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_rejects_wrong_credentials() {
    let app = test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/admin/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"login":"admin","password":"wrong"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn short_query_returns_empty_list() {
    let app = test_app().await;
    app.state
        .db
        .products()
        .insert(&product("ROST-1001", "Polizor", 12999, None))
        .await
        .unwrap();

    let response = get(&app.router, "/api/search?q=p").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn search_matches_substring_case_insensitive() {
    let app = test_app().await;
    app.state
        .db
        .products()
        .insert(&product("BSH-0042", "Bosch GSB 13 RE", 45999, None))
        .await
        .unwrap();
    app.state
        .db
        .products()
        .insert(&product("MAK-2001", "Makita HR2470", 38999, None))
        .await
        .unwrap();

    let response = get(&app.router, "/api/search?q=BOSCH").await;
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["code"], "BSH-0042");

    // Substring match against the code
    let response = get(&app.router, "/api/search?q=2001").await;
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["code"], "MAK-2001");
}

// =============================================================================
// Product Listings
// =============================================================================

#[tokio::test]
async fn offers_excludes_non_qualifying_discounts() {
    let app = test_app().await;
    let products = app.state.db.products();

    products
        .insert(&product("R-1", "Real offer", 1000, Some(799)))
        .await
        .unwrap();
    products
        .insert(&product("R-2", "No discount", 1000, None))
        .await
        .unwrap();
    products
        .insert(&product("R-3", "Zero discount", 1000, Some(0)))
        .await
        .unwrap();
    products
        .insert(&product("R-4", "Equal price", 1000, Some(1000)))
        .await
        .unwrap();

    let response = get(&app.router, "/api/products/offers").await;
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["code"], "R-1");
}

#[tokio::test]
async fn latest_defaults_to_eight() {
    let app = test_app().await;
    let products = app.state.db.products();

    for i in 0..12 {
        products
            .insert(&product(&format!("R-{i}"), &format!("Produs {i}"), 1000, None))
            .await
            .unwrap();
    }

    let response = get(&app.router, "/api/products/latest").await;
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 8);

    let response = get(&app.router, "/api/products/latest?limit=3").await;
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn specific_returns_requested_products() {
    let app = test_app().await;
    let a = product("R-1", "A", 1000, None);
    let b = product("R-2", "B", 2000, None);
    app.state.db.products().insert(&a).await.unwrap();
    app.state.db.products().insert(&b).await.unwrap();

    let missing = uuid::Uuid::new_v4().to_string();
    let body = serde_json::json!({ "ids": [a.id, missing] }).to_string();
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/products/specific")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["code"], "R-1");
}

#[tokio::test]
async fn specific_rejects_malformed_ids() {
    let app = test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/products/specific")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"ids":["not-a-uuid"]}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn specific_rejects_empty_id_list() {
    let app = test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/products/specific")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"ids":[]}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Orders
// =============================================================================

#[tokio::test]
async fn orders_require_authentication() {
    let app = test_app().await;

    let response = get(&app.router, "/api/orders/user").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn orders_return_callers_history() {
    let app = test_app().await;

    let bought = product("ROST-1001", "Polizor", 45999, None);
    app.state.db.products().insert(&bought).await.unwrap();

    let now = Utc::now();
    let order = Order {
        id: uuid::Uuid::new_v4().to_string(),
        customer_email: "ana@example.com".to_string(),
        status: OrderStatus::Pending,
        subtotal_cents: 45999,
        shipping_cents: 1500,
        total_cents: 47499,
        created_at: now,
        updated_at: now,
    };
    let item = OrderItem {
        id: uuid::Uuid::new_v4().to_string(),
        order_id: order.id.clone(),
        product_id: bought.id.clone(),
        code_snapshot: bought.code.clone(),
        name_snapshot: bought.name.clone(),
        unit_price_cents: bought.price_cents,
        quantity: 1,
        line_total_cents: bought.price_cents,
    };
    app.state.db.orders().insert(&order, &[item]).await.unwrap();

    let token = app
        .state
        .jwt
        .generate_token("ana@example.com", UserRole::Customer)
        .unwrap();

    let response = get_with_token(&app.router, "/api/orders/user", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["customer_email"], "ana@example.com");
    assert_eq!(body[0]["items"][0]["code_snapshot"], "ROST-1001");

    // A different customer sees nothing
    let other = app
        .state
        .jwt
        .generate_token("ion@example.com", UserRole::Customer)
        .unwrap();
    let response = get_with_token(&app.router, "/api/orders/user", &other).await;
    assert_eq!(json_body(response).await.as_array().unwrap().len(), 0);
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn catalog_structure_has_no_products() {
    let app = test_app().await;

    let now = Utc::now();
    let category = rost_core::Category {
        id: "c1".to_string(),
        name: "Scule electrice".to_string(),
        slug: "scule-electrice".to_string(),
        icon: None,
        position: 0,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    let subcategory = rost_core::Subcategory {
        id: "s1".to_string(),
        category_id: "c1".to_string(),
        name: "Polizoare".to_string(),
        slug: "polizoare".to_string(),
        position: 0,
        is_active: true,
    };
    app.state.db.catalog().insert_category(&category).await.unwrap();
    app.state
        .db
        .catalog()
        .insert_subcategory(&subcategory)
        .await
        .unwrap();

    let mut listed = product("ROST-1001", "Polizor", 12999, None);
    listed.subcategory_id = Some("s1".to_string());
    app.state.db.products().insert(&listed).await.unwrap();

    let response = get(&app.router, "/api/catalog").await;
    let body = json_body(response).await;
    assert_eq!(body[0]["subcategories"][0]["products"].as_array().unwrap().len(), 1);

    let response = get(&app.router, "/api/catalog-structure").await;
    let body = json_body(response).await;
    assert_eq!(body[0]["slug"], "scule-electrice");
    assert_eq!(body[0]["subcategories"][0]["products"].as_array().unwrap().len(), 0);
}

// =============================================================================
// Revalidation, Brands, Env, Health
// =============================================================================

#[tokio::test]
async fn revalidate_without_secret_is_401_and_mutates_nothing() {
    let app = test_app().await;
    let cache_path = app.state.brands_cache_path();

    let response = get(&app.router, "/api/revalidate-products").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get(&app.router, "/api/revalidate-products?secret=wrong").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert!(!cache_path.exists(), "cache must not be touched");
}

#[tokio::test]
async fn revalidate_with_secret_reports_upstream_failure() {
    let app = test_app().await;

    // Secret accepted, but the upstream is down: the gate is passed and the
    // failure comes from the refresh itself.
    let response = get(&app.router, "/api/revalidate-products?secret=refresh-me").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn brands_fall_back_to_cache_when_upstream_is_down() {
    let app = test_app().await;

    let cached = vec![rost_core::Brand {
        id: 1,
        name: "Bosch".to_string(),
        slug: "bosch".to_string(),
        logo_url: None,
    }];
    rost_api::cache::write_brands(&app.state.brands_cache_path(), &cached)
        .await
        .unwrap();

    let response = get(&app.router, "/api/brands").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body[0]["name"], "Bosch");
}

#[tokio::test]
async fn brands_without_upstream_or_cache_is_bad_gateway() {
    let app = test_app().await;

    let response = get(&app.router, "/api/brands").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn rost_product_proxy_reports_dead_upstream() {
    let app = test_app().await;

    let response = get(&app.router, "/api/rost-products/42").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn env_reports_environment_and_upstream() {
    let app = test_app().await;

    let response = get(&app.router, "/api/env").await;
    let body = json_body(response).await;
    assert_eq!(body["environment"], "test");
    assert_eq!(body["upstream_base_url"], DEAD_UPSTREAM);
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app().await;

    let response = get(&app.router, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}
