//! # Order Repository
//!
//! Database operations for orders, their line items, and customers.
//!
//! ## The Snapshot Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                Why Order Items Carry Snapshots                          │
//! │                                                                         │
//! │  Day 1: Customer orders "Bosch GSB 13 RE" at 459.99 lei                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  order_items row: code_snapshot = "BSH-0042"                           │
//! │                   name_snapshot = "Bosch GSB 13 RE"                    │
//! │                   unit_price_cents = 45999                             │
//! │                                                                         │
//! │  Day 30: Admin renames the product and raises the price.               │
//! │                                                                         │
//! │  The order history still shows what the customer actually bought       │
//! │  and what they actually paid. Live product rows are never consulted    │
//! │  when rendering past orders.                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use rost_core::{Customer, Order, OrderItem, OrderWithItems};

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts an order and its line items in one transaction.
    ///
    /// Either the whole order lands or none of it does. Items are written
    /// with fresh UUIDs; the caller only provides snapshot data.
    pub async fn insert(&self, order: &Order, items: &[OrderItem]) -> DbResult<()> {
        debug!(id = %order.id, items = items.len(), "Inserting order");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO orders (
                id, customer_email, status, subtotal_cents, shipping_cents,
                total_cents, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&order.id)
        .bind(&order.customer_email)
        .bind(order.status)
        .bind(order.subtotal_cents)
        .bind(order.shipping_cents)
        .bind(order.total_cents)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await?;

        for item in items {
            sqlx::query(
                "INSERT INTO order_items (
                    id, order_id, product_id, code_snapshot, name_snapshot,
                    unit_price_cents, quantity, line_total_cents
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )
            .bind(&item.id)
            .bind(&order.id)
            .bind(&item.product_id)
            .bind(&item.code_snapshot)
            .bind(&item.name_snapshot)
            .bind(item.unit_price_cents)
            .bind(item.quantity)
            .bind(item.line_total_cents)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Gets an order with its items by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<OrderWithItems> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT id, customer_email, status, subtotal_cents, shipping_cents, \
                    total_cents, created_at, updated_at \
             FROM orders WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Order", id))?;

        let items = self.items_for(&order.id).await?;

        Ok(OrderWithItems { order, items })
    }

    /// Lists a customer's orders, newest first, each with its items.
    ///
    /// Backs `/api/orders/user`. An unknown email is simply an empty
    /// history, not an error.
    pub async fn list_for_customer(&self, email: &str) -> DbResult<Vec<OrderWithItems>> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT id, customer_email, status, subtotal_cents, shipping_cents, \
                    total_cents, created_at, updated_at \
             FROM orders \
             WHERE customer_email = ?1 \
             ORDER BY created_at DESC",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        let mut result = Vec::with_capacity(orders.len());
        for order in orders {
            let items = self.items_for(&order.id).await?;
            result.push(OrderWithItems { order, items });
        }

        Ok(result)
    }

    /// Updates an order's status.
    pub async fn update_status(&self, id: &str, status: rost_core::OrderStatus) -> DbResult<()> {
        debug!(id = %id, status = ?status, "Updating order status");

        let now = chrono::Utc::now();

        let result = sqlx::query("UPDATE orders SET status = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(id)
            .bind(status)
            .bind(now)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        Ok(())
    }

    /// Gets a customer record by email.
    pub async fn get_customer_by_email(&self, email: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, email, name, phone, created_at FROM customers WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Upserts a customer record by email.
    ///
    /// Orders are keyed by email, so the customer row is bookkeeping: created
    /// on first order, refreshed on later ones.
    pub async fn upsert_customer(&self, customer: &Customer) -> DbResult<()> {
        sqlx::query(
            "INSERT INTO customers (id, email, name, phone, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5) \
             ON CONFLICT(email) DO UPDATE SET name = excluded.name, phone = excluded.phone",
        )
        .bind(&customer.id)
        .bind(&customer.email)
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(customer.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn items_for(&self, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT id, order_id, product_id, code_snapshot, name_snapshot, \
                    unit_price_cents, quantity, line_total_cents \
             FROM order_items \
             WHERE order_id = ?1 \
             ORDER BY rowid",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}

/// Helper to generate a new order or item ID.
pub fn generate_order_id() -> String {
    Uuid::new_v4().to_string()
}
