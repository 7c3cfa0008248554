//! # Repository Module
//!
//! Database repository implementations for the Rost storefront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Route handler                                                         │
//! │       │                                                                 │
//! │       │  db.products().search("bosch", 20)                             │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── search(&self, query, limit)                                       │
//! │  ├── list_offers(&self, limit)                                         │
//! │  ├── list_latest(&self, limit)                                         │
//! │  └── list_by_ids(&self, ids)                                           │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • Handlers stay declarative                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Product listings, search, inventory
//! - [`catalog::CatalogRepository`] - Category/subcategory trees
//! - [`order::OrderRepository`] - Orders with item snapshots

pub mod catalog;
pub mod order;
pub mod product;
