//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::env;

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// HTTP server port
    pub http_port: u16,

    /// SQLite database file path
    pub database_path: String,

    /// Base URL of the sibling HTTP service (brands + rost product feed)
    pub upstream_base_url: String,

    /// Override for the rost product feed base URL, when it lives elsewhere
    pub ultra_api_url: Option<String>,

    /// Admin login name
    pub admin_login: String,

    /// Admin password
    pub admin_password: String,

    /// Shared secret gating the revalidation endpoint
    pub revalidation_secret: String,

    /// JWT secret key for signing tokens
    pub jwt_secret: String,

    /// JWT access token lifetime in seconds
    pub jwt_access_lifetime_secs: i64,

    /// File path for the brands cache
    pub brands_cache_path: String,

    /// Runtime environment name ("development" / "production")
    pub environment: String,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ApiConfig {
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_PORT".to_string()))?,

            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "./rost_dev.db".to_string()),

            upstream_base_url: env::var("NEXT_PUBLIC_API_URL")
                .unwrap_or_else(|_| "http://localhost:3001/api".to_string()),

            ultra_api_url: env::var("ULTRA_API_URL").ok(),

            admin_login: env::var("LOGIN")
                .map_err(|_| ConfigError::MissingRequired("LOGIN".to_string()))?,

            admin_password: env::var("PASSWORD")
                .map_err(|_| ConfigError::MissingRequired("PASSWORD".to_string()))?,

            revalidation_secret: env::var("REVALIDATION_SECRET")
                .map_err(|_| ConfigError::MissingRequired("REVALIDATION_SECRET".to_string()))?,

            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| {
                // In production this MUST be set via environment variable
                "rost-dev-secret-change-in-production".to_string()
            }),

            jwt_access_lifetime_secs: env::var("JWT_ACCESS_LIFETIME_SECS")
                .unwrap_or_else(|_| "3600".to_string()) // 1 hour
                .parse()
                .map_err(|_| ConfigError::InvalidValue("JWT_ACCESS_LIFETIME_SECS".to_string()))?,

            brands_cache_path: env::var("BRANDS_CACHE_PATH")
                .unwrap_or_else(|_| "server/.cache/brands.json".to_string()),

            environment: env::var("NODE_ENV").unwrap_or_else(|_| "development".to_string()),
        };

        Ok(config)
    }

    /// Returns the base URL of the rost product feed.
    ///
    /// `ULTRA_API_URL` points the feed at a different host when set; brands
    /// always come from the main upstream base.
    pub fn product_feed_base(&self) -> &str {
        self.ultra_api_url
            .as_deref()
            .unwrap_or(&self.upstream_base_url)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
