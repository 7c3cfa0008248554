//! # Catalog Repository
//!
//! Database operations for categories and subcategories, plus the composed
//! catalog trees the storefront renders from.
//!
//! ## Two Shapes, One Source
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Catalog Payloads                                  │
//! │                                                                         │
//! │  /api/catalog-structure          /api/catalog                           │
//! │  ──────────────────────          ────────────                           │
//! │  Category                        Category                               │
//! │   └─ Subcategory                  └─ Subcategory                        │
//! │   └─ Subcategory                      └─ Product, Product, ...          │
//! │                                   └─ Subcategory                        │
//! │  (navigation menu - light)            └─ Product, ...                   │
//! │                                  (full listing - heavy)                 │
//! │                                                                         │
//! │  Both are built from the same three queries; structure() simply         │
//! │  leaves the product lists empty.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use rost_core::{Category, CategoryTree, Product, Subcategory, SubcategoryTree};

/// Repository for catalog navigation data.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Lists active categories in navigation order.
    pub async fn list_categories(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, slug, icon, position, is_active, created_at, updated_at \
             FROM categories \
             WHERE is_active = 1 \
             ORDER BY position, name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Lists active subcategories across all categories, in display order.
    pub async fn list_subcategories(&self) -> DbResult<Vec<Subcategory>> {
        let subcategories = sqlx::query_as::<_, Subcategory>(
            "SELECT id, category_id, name, slug, position, is_active \
             FROM subcategories \
             WHERE is_active = 1 \
             ORDER BY position, name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(subcategories)
    }

    /// Builds the lightweight navigation tree: categories with their
    /// subcategories, no products.
    pub async fn structure(&self) -> DbResult<Vec<CategoryTree>> {
        let categories = self.list_categories().await?;
        let subcategories = self.list_subcategories().await?;

        Ok(compose_tree(categories, subcategories, HashMap::new()))
    }

    /// Builds the full catalog tree: categories, subcategories, and every
    /// active product grouped under its subcategory.
    ///
    /// Products without a subcategory are not part of the tree; they remain
    /// reachable through search and the flat listings.
    pub async fn full_catalog(&self) -> DbResult<Vec<CategoryTree>> {
        let categories = self.list_categories().await?;
        let subcategories = self.list_subcategories().await?;

        let products = sqlx::query_as::<_, Product>(
            "SELECT id, code, name, slug, description, brand, subcategory_id, \
                    price_cents, discount_price_cents, stock, image_url, \
                    is_active, created_at, updated_at \
             FROM products \
             WHERE is_active = 1 AND subcategory_id IS NOT NULL \
             ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(
            categories = categories.len(),
            subcategories = subcategories.len(),
            products = products.len(),
            "Composing full catalog tree"
        );

        let mut by_subcategory: HashMap<String, Vec<Product>> = HashMap::new();
        for product in products {
            if let Some(sub_id) = product.subcategory_id.clone() {
                by_subcategory.entry(sub_id).or_default().push(product);
            }
        }

        Ok(compose_tree(categories, subcategories, by_subcategory))
    }

    /// Inserts a category.
    pub async fn insert_category(&self, category: &Category) -> DbResult<()> {
        sqlx::query(
            "INSERT INTO categories (id, name, slug, icon, position, is_active, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(&category.slug)
        .bind(&category.icon)
        .bind(category.position)
        .bind(category.is_active)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Inserts a subcategory.
    pub async fn insert_subcategory(&self, subcategory: &Subcategory) -> DbResult<()> {
        sqlx::query(
            "INSERT INTO subcategories (id, category_id, name, slug, position, is_active) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&subcategory.id)
        .bind(&subcategory.category_id)
        .bind(&subcategory.name)
        .bind(&subcategory.slug)
        .bind(subcategory.position)
        .bind(subcategory.is_active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Groups subcategories under their categories and attaches product lists.
///
/// Input lists arrive already sorted; grouping preserves that order.
fn compose_tree(
    categories: Vec<Category>,
    subcategories: Vec<Subcategory>,
    mut products_by_subcategory: HashMap<String, Vec<Product>>,
) -> Vec<CategoryTree> {
    let mut subs_by_category: HashMap<String, Vec<SubcategoryTree>> = HashMap::new();

    for subcategory in subcategories {
        let products = products_by_subcategory
            .remove(&subcategory.id)
            .unwrap_or_default();

        subs_by_category
            .entry(subcategory.category_id.clone())
            .or_default()
            .push(SubcategoryTree {
                subcategory,
                products,
            });
    }

    categories
        .into_iter()
        .map(|category| {
            let subcategories = subs_by_category.remove(&category.id).unwrap_or_default();
            CategoryTree {
                category,
                subcategories,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn category(id: &str, position: i64) -> Category {
        Category {
            id: id.to_string(),
            name: format!("Category {id}"),
            slug: format!("category-{id}"),
            icon: None,
            position,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn subcategory(id: &str, category_id: &str) -> Subcategory {
        Subcategory {
            id: id.to_string(),
            category_id: category_id.to_string(),
            name: format!("Sub {id}"),
            slug: format!("sub-{id}"),
            position: 0,
            is_active: true,
        }
    }

    #[test]
    fn test_compose_tree_groups_subcategories() {
        let tree = compose_tree(
            vec![category("c1", 0), category("c2", 1)],
            vec![
                subcategory("s1", "c1"),
                subcategory("s2", "c1"),
                subcategory("s3", "c2"),
            ],
            HashMap::new(),
        );

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].subcategories.len(), 2);
        assert_eq!(tree[1].subcategories.len(), 1);
        assert_eq!(tree[1].subcategories[0].subcategory.id, "s3");
    }

    #[test]
    fn test_compose_tree_orphan_subcategory_dropped() {
        let tree = compose_tree(
            vec![category("c1", 0)],
            vec![subcategory("s1", "c1"), subcategory("s2", "missing")],
            HashMap::new(),
        );

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].subcategories.len(), 1);
    }

    #[tokio::test]
    async fn test_full_catalog_groups_products() {
        use crate::pool::{Database, DbConfig};

        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let cat = category("c1", 0);
        let sub = subcategory("s1", "c1");
        db.catalog().insert_category(&cat).await.unwrap();
        db.catalog().insert_subcategory(&sub).await.unwrap();

        let now = Utc::now();
        let product = Product {
            id: "p1".to_string(),
            code: "ROST-1001".to_string(),
            name: "Polizor".to_string(),
            slug: "polizor".to_string(),
            description: None,
            brand: None,
            subcategory_id: Some(sub.id.clone()),
            price_cents: 12999,
            discount_price_cents: None,
            stock: 3,
            image_url: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        db.products().insert(&product).await.unwrap();

        let tree = db.catalog().full_catalog().await.unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].subcategories.len(), 1);
        assert_eq!(tree[0].subcategories[0].products.len(), 1);
        assert_eq!(tree[0].subcategories[0].products[0].code, "ROST-1001");

        // The navigation structure carries no products
        let structure = db.catalog().structure().await.unwrap();
        assert!(structure[0].subcategories[0].products.is_empty());
    }
}
