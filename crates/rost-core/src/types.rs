//! # Domain Types
//!
//! Core domain types used throughout the Rost storefront backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │   Subcategory   │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  slug           │◄──│  category_id    │◄──│  subcategory_id │       │
//! │  │  is_active      │   │  slug           │   │  code (business)│       │
//! │  └─────────────────┘   └─────────────────┘   │  price_cents    │       │
//! │                                              │  discount_price │       │
//! │  ┌─────────────────┐   ┌─────────────────┐   └─────────────────┘       │
//! │  │     Order       │   │    OrderItem    │                             │
//! │  │  ─────────────  │   │  ─────────────  │   ┌─────────────────┐       │
//! │  │  id (UUID)      │◄──│  order_id       │   │     Brand       │       │
//! │  │  customer_email │   │  code_snapshot  │   │  (from upstream │       │
//! │  │  status         │   │  unit_price     │   │   service/cache)│       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business ID: (code, slug, email) - human-readable, potentially mutable

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{is_offer, Money};

// =============================================================================
// Category
// =============================================================================

/// A main catalog category shown in the storefront navigation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, e.g. "Scule electrice".
    pub name: String,

    /// URL slug - business identifier.
    pub slug: String,

    /// Optional icon asset path.
    pub icon: Option<String>,

    /// Sort position in the navigation (ascending).
    pub position: i64,

    /// Whether the category is visible (soft delete).
    pub is_active: bool,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Subcategory
// =============================================================================

/// A subcategory nested under a main category.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Subcategory {
    pub id: String,

    /// Parent category.
    pub category_id: String,

    pub name: String,

    /// URL slug - business identifier.
    pub slug: String,

    /// Sort position within the parent category (ascending).
    pub position: i64,

    /// Whether the subcategory is visible (soft delete).
    pub is_active: bool,
}

// =============================================================================
// Product
// =============================================================================

/// A product in the storefront catalog.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Product code - business identifier, e.g. "ROST-1001".
    pub code: String,

    /// Display name shown in listings and product pages.
    pub name: String,

    /// URL slug.
    pub slug: String,

    /// Optional long description.
    pub description: Option<String>,

    /// Brand name, when known.
    pub brand: Option<String>,

    /// Subcategory this product is listed under.
    pub subcategory_id: Option<String>,

    /// Regular price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Discounted price in cents, when the product is on offer.
    pub discount_price_cents: Option<i64>,

    /// Units in stock.
    pub stock: i64,

    /// Main image URL.
    pub image_url: Option<String>,

    /// Whether product is visible in the storefront (soft delete).
    pub is_active: bool,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the regular price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the discounted price, when present.
    #[inline]
    pub fn discount_price(&self) -> Option<Money> {
        self.discount_price_cents.map(Money::from_cents)
    }

    /// Checks whether the product qualifies for the offers listing.
    ///
    /// True only when the discounted price is present, positive, and
    /// strictly below the regular price.
    pub fn is_offer(&self) -> bool {
        is_offer(self.price(), self.discount_price())
    }

    /// Returns the price a customer actually pays right now.
    pub fn effective_price(&self) -> Money {
        if self.is_offer() {
            // is_offer guarantees the discount is present
            self.discount_price().unwrap_or_else(|| self.price())
        } else {
            self.price()
        }
    }

    /// Checks if the product can currently be ordered.
    pub fn in_stock(&self) -> bool {
        self.is_active && self.stock > 0
    }
}

// =============================================================================
// Brand
// =============================================================================

/// A brand entry, sourced from the sibling HTTP service and cached on disk.
///
/// Not a database entity: `/api/brands` proxies the upstream feed and falls
/// back to `server/.cache/brands.json` when the upstream is unreachable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Brand {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of a customer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order received, not yet confirmed.
    Pending,
    /// Order confirmed and being prepared.
    Processing,
    /// Order delivered.
    Completed,
    /// Order cancelled.
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

// =============================================================================
// Order
// =============================================================================

/// A customer order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Order {
    pub id: String,

    /// Email of the customer who placed the order.
    pub customer_email: String,

    pub status: OrderStatus,

    pub subtotal_cents: i64,
    pub shipping_cents: i64,
    pub total_cents: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Returns the order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item in an order.
/// Uses snapshot pattern to freeze product data at time of purchase.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    /// Product code at time of purchase (frozen).
    pub code_snapshot: String,
    /// Product name at time of purchase (frozen).
    pub name_snapshot: String,
    /// Unit price in cents at time of purchase (frozen).
    pub unit_price_cents: i64,
    /// Quantity ordered.
    pub quantity: i64,
    /// Line total (unit_price × quantity).
    pub line_total_cents: i64,
}

/// An order together with its line items.
///
/// The shape `/api/orders/user` returns: the customer sees the frozen
/// snapshots, not the live product rows.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderWithItems {
    #[serde(flatten)]
    #[ts(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

// =============================================================================
// Customer
// =============================================================================

/// A registered storefront customer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Customer {
    pub id: String,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// User Role
// =============================================================================

/// Role carried inside the auth token.
///
/// The admin guard redirects based on this value; everything else in the
/// system treats tokens as opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Customer,
}

// =============================================================================
// Catalog Trees
// =============================================================================

/// A main category with its subcategories and their products.
///
/// Returned by `/api/catalog` - the full storefront listing in one payload.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryTree {
    #[serde(flatten)]
    #[ts(flatten)]
    pub category: Category,
    pub subcategories: Vec<SubcategoryTree>,
}

/// A subcategory with its active products.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubcategoryTree {
    #[serde(flatten)]
    #[ts(flatten)]
    pub subcategory: Subcategory,
    pub products: Vec<Product>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price_cents: i64, discount: Option<i64>) -> Product {
        Product {
            id: "p-1".to_string(),
            code: "ROST-1001".to_string(),
            name: "Ciocan rotopercutor".to_string(),
            slug: "ciocan-rotopercutor".to_string(),
            description: None,
            brand: Some("Makita".to_string()),
            subcategory_id: None,
            price_cents,
            discount_price_cents: discount,
            stock: 3,
            image_url: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_product_offer_rule() {
        assert!(product(1000, Some(799)).is_offer());
        assert!(!product(1000, None).is_offer());
        assert!(!product(1000, Some(0)).is_offer());
        assert!(!product(1000, Some(1000)).is_offer());
        assert!(!product(1000, Some(1500)).is_offer());
    }

    #[test]
    fn test_effective_price() {
        assert_eq!(product(1000, Some(799)).effective_price().cents(), 799);
        assert_eq!(product(1000, Some(1500)).effective_price().cents(), 1000);
        assert_eq!(product(1000, None).effective_price().cents(), 1000);
    }

    #[test]
    fn test_in_stock() {
        let mut p = product(1000, None);
        assert!(p.in_stock());

        p.stock = 0;
        assert!(!p.in_stock());

        p.stock = 5;
        p.is_active = false;
        assert!(!p.in_stock());
    }

    #[test]
    fn test_order_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }
}
