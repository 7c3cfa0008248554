//! # rost-db: Database Layer for the Rost Storefront
//!
//! This crate provides database access for the storefront backend.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Data Flow                               │
//! │                                                                         │
//! │  HTTP route (/api/search)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      rost-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (product.rs,  │    │  (embedded)  │  │   │
//! │  │   │               │    │  catalog.rs,  │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│  order.rs)    │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │    │               │    │ 002_idx.sql  │  │   │
//! │  │   │ Management    │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (DATABASE_PATH)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (product, catalog, order)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rost_db::{Database, DbConfig};
//!
//! let config = DbConfig::new("path/to/rost.db");
//! let db = Database::new(config).await?;
//!
//! let offers = db.products().list_offers(20).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::catalog::CatalogRepository;
pub use repository::order::OrderRepository;
pub use repository::product::ProductRepository;
