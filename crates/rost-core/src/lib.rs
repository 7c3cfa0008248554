//! # rost-core: Pure Business Logic for the Rost Storefront
//!
//! This crate is the **heart** of the storefront backend. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Rost Storefront Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   Storefront Frontend                           │   │
//! │  │    Catalog UI ──► Search UI ──► Offers UI ──► Admin UI         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP JSON                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/api (axum routes)                       │   │
//! │  │    /api/catalog, /api/search, /api/products/offers, /admin/*   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ rost-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   money   │  │ validation│                  │   │
//! │  │   │  Product  │  │   Money   │  │   rules   │                  │   │
//! │  │   │  Category │  │  Offers   │  │  checks   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   rost-db (Database Layer)                      │   │
//! │  │             SQLite queries, migrations, repositories            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, Order, Brand, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input and business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use rost_core::Money` instead of
// `use rost_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum search query length before the catalog search runs.
///
/// Queries shorter than this return an empty result set instead of scanning
/// the whole product table for one-character substrings.
pub const MIN_SEARCH_QUERY_LEN: usize = 2;

/// Default number of products returned by the "latest products" listing.
pub const DEFAULT_LATEST_LIMIT: u32 = 8;

/// Maximum number of ids accepted by the "specific products" lookup.
///
/// Prevents a single request from binding an unbounded IN-list.
pub const MAX_SPECIFIC_IDS: usize = 100;
