//! Shared application state.

use std::path::PathBuf;

use rost_db::Database;

use crate::auth::JwtManager;
use crate::config::ApiConfig;
use crate::upstream::UpstreamClient;

/// State shared across all request handlers via `axum::extract::State`.
pub struct AppState {
    pub db: Database,
    pub config: ApiConfig,
    pub jwt: JwtManager,
    pub upstream: UpstreamClient,
}

impl AppState {
    /// Builds the state from a loaded configuration and an open database.
    pub fn new(config: ApiConfig, db: Database) -> Self {
        let jwt = JwtManager::new(config.jwt_secret.clone(), config.jwt_access_lifetime_secs);
        let upstream = UpstreamClient::new(
            config.upstream_base_url.clone(),
            config.product_feed_base().to_string(),
        );

        AppState {
            db,
            config,
            jwt,
            upstream,
        }
    }

    /// Path of the brands cache file.
    pub fn brands_cache_path(&self) -> PathBuf {
        PathBuf::from(&self.config.brands_cache_path)
    }
}
