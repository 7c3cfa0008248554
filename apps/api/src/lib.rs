//! # Rost API
//!
//! HTTP JSON backend for the Rost storefront.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Rost API Server                               │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  Storefront    │  │  Admin Area    │  │  Upstream Proxy            ││
//! │  │                │  │                │  │                            ││
//! │  │ • catalog      │  │ • route guard  │  │ • brands (+ file cache)    ││
//! │  │ • search       │  │ • login / JWT  │  │ • rost product feed        ││
//! │  │ • offers       │  │ • inventory    │  │ • session retry helper     ││
//! │  │ • orders       │  │                │  │                            ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      Infrastructure                               │  │
//! │  │                                                                   │  │
//! │  │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────────────┐│  │
//! │  │  │  SQLite      │  │  Config      │  │  JWT Auth                ││  │
//! │  │  │  (rost-db)   │  │  (env vars)  │  │  (HS256 tokens)          ││  │
//! │  │  └──────────────┘  └──────────────┘  └──────────────────────────┘│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `HTTP_PORT` - server port (default 3000)
//! - `DATABASE_PATH` - SQLite file path
//! - `NEXT_PUBLIC_API_URL` - upstream base URL (brands, feed default)
//! - `ULTRA_API_URL` - override for the rost product feed base
//! - `LOGIN` / `PASSWORD` - admin credentials
//! - `REVALIDATION_SECRET` - shared secret for cache revalidation
//! - `JWT_SECRET` / `JWT_ACCESS_LIFETIME_SECS` - token settings
//! - `BRANDS_CACHE_PATH` - brands cache file (default server/.cache/brands.json)
//! - `NODE_ENV` - environment name

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod upstream;

pub use config::ApiConfig;
pub use routes::build_router;
pub use state::AppState;
