//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Case-insensitive substring search across name, description, code
//! - Storefront listings: latest, offers, explicit id lists
//! - Admin inventory (includes inactive products)
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Catalog Search Works                             │
//! │                                                                         │
//! │  User types: "bosch"                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LIKE '%bosch%' against: name, description, code                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ products                                │                           │
//! │  │                                         │                           │
//! │  │ BSH-0042 | Bosch GSB 13 RE    | ...    │ ← MATCH (name)            │
//! │  │ BSH-0117 | Polizor unghiular  | "..    │ ← MATCH (description)     │
//! │  │ MAK-2001 | Makita HR2470      | ...    │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │                                                                         │
//! │  SQLite LIKE is case-insensitive for ASCII, which is exactly the       │
//! │  contract the storefront search promises.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{QueryBuilder, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use rost_core::Product;

/// Columns selected for every product query, kept in one place so the
/// FromRow mapping cannot drift between queries.
const PRODUCT_COLUMNS: &str = "id, code, name, slug, description, brand, subcategory_id, \
     price_cents, discount_price_cents, stock, image_url, is_active, created_at, updated_at";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let hits = repo.search("bosch", 20).await?;
/// let offers = repo.list_offers(20).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Searches active products with a case-insensitive substring match
    /// across name, description, and code.
    ///
    /// ## Arguments
    /// * `query` - Search term; `%` and `_` are escaped so they match literally
    /// * `limit` - Maximum results to return
    pub async fn search(&self, query: &str, limit: u32) -> DbResult<Vec<Product>> {
        let query = query.trim();

        debug!(query = %query, limit = %limit, "Searching products");

        let pattern = format!("%{}%", escape_like(query));

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE is_active = 1 \
             AND (name LIKE ?1 ESCAPE '\\' \
                  OR description LIKE ?1 ESCAPE '\\' \
                  OR code LIKE ?1 ESCAPE '\\') \
             ORDER BY name \
             LIMIT ?2"
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(&pattern)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Lists the newest active products.
    ///
    /// Backs `/api/products/latest` on the storefront home page.
    pub async fn list_latest(&self, limit: u32) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE is_active = 1 \
             ORDER BY created_at DESC \
             LIMIT ?1"
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Lists active products that qualify as offers.
    ///
    /// ## The Offer Filter
    /// A product is an offer only when the discounted price is ALL of:
    /// non-null, greater than zero, and strictly less than the regular price.
    /// The filter runs in SQL so paging stays correct; `Product::is_offer`
    /// is the same rule for in-process checks.
    pub async fn list_offers(&self, limit: u32) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE is_active = 1 \
             AND discount_price_cents IS NOT NULL \
             AND discount_price_cents > 0 \
             AND discount_price_cents < price_cents \
             ORDER BY created_at DESC \
             LIMIT ?1"
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Fetches active products for an explicit id list.
    ///
    /// Backs `POST /api/products/specific`. Ids that don't exist are simply
    /// absent from the result; the order of the result follows the database,
    /// not the request.
    pub async fn list_by_ids(&self, ids: &[String]) -> DbResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE is_active = 1 AND id IN ("
        ));

        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(")");

        let products = builder
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Gets a product by its business code (e.g., "ROST-1001").
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE code = ?1");

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Lists the full inventory for the admin area.
    ///
    /// Unlike the storefront listings this includes inactive products:
    /// the admin needs to see what is hidden.
    pub async fn list_inventory(&self) -> DbResult<Vec<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY code");

        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(())` - Inserted
    /// * `Err(DbError::UniqueViolation)` - Code or slug already exists
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(code = %product.code, "Inserting product");

        sqlx::query(
            "INSERT INTO products (
                id, code, name, slug, description, brand, subcategory_id,
                price_cents, discount_price_cents, stock, image_url,
                is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        )
        .bind(&product.id)
        .bind(&product.code)
        .bind(&product.name)
        .bind(&product.slug)
        .bind(&product.description)
        .bind(&product.brand)
        .bind(&product.subcategory_id)
        .bind(product.price_cents)
        .bind(product.discount_price_cents)
        .bind(product.stock)
        .bind(&product.image_url)
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates product stock level by a signed delta.
    ///
    /// ## Arguments
    /// * `id` - Product ID
    /// * `delta` - Change in stock (negative for orders, positive for restocking)
    pub async fn update_stock(&self, id: &str, delta: i64) -> DbResult<()> {
        debug!(id = %id, delta = %delta, "Updating stock");

        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE products SET stock = stock + ?2, updated_at = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(delta)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Soft-deletes a product by setting is_active = false.
    ///
    /// Historical order items still reference this product, so rows are
    /// never physically removed.
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting product");

        let now = Utc::now();

        let result =
            sqlx::query("UPDATE products SET is_active = 0, updated_at = ?2 WHERE id = ?1")
                .bind(id)
                .bind(now)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts active products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Escapes LIKE wildcards so user input matches literally.
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}
