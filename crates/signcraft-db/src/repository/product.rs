//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Key Operations
//! - Full-text search over sku/name using FTS5 (prefix matching, so "ban"
//!   finds "13oz Vinyl Banner" and "BAN-MESH")
//! - CRUD with variant hydration: a product always comes back with its
//!   variants and their option pairs attached

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use signcraft_core::{PricingMode, Product, Variant, VariantOption};

// =============================================================================
// Row Types
// =============================================================================

/// Raw products row; variants are hydrated separately.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    sku: String,
    name: String,
    description: Option<String>,
    pricing_mode: PricingMode,
    base_price_cents: i64,
    discount_starts_at: f64,
    discount_ends_at: f64,
    max_discount_bps: u32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self, variants: Vec<Variant>) -> Product {
        Product {
            id: self.id,
            sku: self.sku,
            name: self.name,
            description: self.description,
            pricing_mode: self.pricing_mode,
            base_price_cents: self.base_price_cents,
            discount_starts_at: self.discount_starts_at,
            discount_ends_at: self.discount_ends_at,
            max_discount_bps: self.max_discount_bps,
            variants,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct VariantRow {
    id: String,
    product_id: String,
    label: String,
    price_cents: i64,
    position: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct OptionRow {
    variant_id: String,
    name: String,
    value: String,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Searches active products with FTS5 prefix matching.
    ///
    /// An empty query lists active products sorted by name. The query term
    /// is quoted before the `*` suffix so punctuation can't break FTS5
    /// syntax.
    pub async fn search(&self, query: &str, limit: u32) -> DbResult<Vec<Product>> {
        let query = query.trim();

        debug!(query = %query, limit = %limit, "Searching products");

        if query.is_empty() {
            return self.list_active(limit).await;
        }

        let fts_query = format!("\"{}\"*", query.replace('"', ""));

        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT p.id, p.sku, p.name, p.description, p.pricing_mode,
                   p.base_price_cents, p.discount_starts_at, p.discount_ends_at,
                   p.max_discount_bps, p.is_active, p.created_at, p.updated_at
            FROM products p
            INNER JOIN products_fts fts ON p.rowid = fts.rowid
            WHERE products_fts MATCH ?1
              AND p.is_active = 1
            ORDER BY rank
            LIMIT ?2
            "#,
        )
        .bind(&fts_query)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Search returned products");
        self.hydrate_all(rows).await
    }

    /// Lists active products sorted by name (empty-query fallback).
    async fn list_active(&self, limit: u32) -> DbResult<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, sku, name, description, pricing_mode,
                   base_price_cents, discount_starts_at, discount_ends_at,
                   max_discount_bps, is_active, created_at, updated_at
            FROM products
            WHERE is_active = 1
            ORDER BY name
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        self.hydrate_all(rows).await
    }

    /// Gets a product by its UUID, with variants.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let row: Option<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, sku, name, description, pricing_mode,
                   base_price_cents, discount_starts_at, discount_ends_at,
                   max_discount_bps, is_active, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let variants = self.load_variants(&row.id).await?;
                Ok(Some(row.into_product(variants)))
            }
            None => Ok(None),
        }
    }

    /// Gets a product by its SKU, with variants.
    pub async fn get_by_sku(&self, sku: &str) -> DbResult<Option<Product>> {
        let row: Option<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, sku, name, description, pricing_mode,
                   base_price_cents, discount_starts_at, discount_ends_at,
                   max_discount_bps, is_active, created_at, updated_at
            FROM products
            WHERE sku = ?1
            "#,
        )
        .bind(sku)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let variants = self.load_variants(&row.id).await?;
                Ok(Some(row.into_product(variants)))
            }
            None => Ok(None),
        }
    }

    /// Inserts a product with its variants and options in one transaction.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(sku = %product.sku, variants = product.variants.len(), "Inserting product");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO products (
                id, sku, name, description, pricing_mode,
                base_price_cents, discount_starts_at, discount_ends_at,
                max_discount_bps, is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&product.id)
        .bind(&product.sku)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.pricing_mode)
        .bind(product.base_price_cents)
        .bind(product.discount_starts_at)
        .bind(product.discount_ends_at)
        .bind(product.max_discount_bps)
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&mut *tx)
        .await?;

        for variant in &product.variants {
            sqlx::query(
                r#"
                INSERT INTO product_variants (id, product_id, label, price_cents, position)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(&variant.id)
            .bind(&product.id)
            .bind(&variant.label)
            .bind(variant.price_cents)
            .bind(variant.position)
            .execute(&mut *tx)
            .await?;

            for option in &variant.options {
                sqlx::query(
                    "INSERT INTO variant_options (variant_id, name, value) VALUES (?1, ?2, ?3)",
                )
                .bind(&variant.id)
                .bind(&option.name)
                .bind(&option.value)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Updates a product, replacing its variant set.
    ///
    /// Variant replacement keeps catalog edits simple; submitted orders are
    /// unaffected because order items carry frozen snapshots.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE products SET
                sku = ?2,
                name = ?3,
                description = ?4,
                pricing_mode = ?5,
                base_price_cents = ?6,
                discount_starts_at = ?7,
                discount_ends_at = ?8,
                max_discount_bps = ?9,
                is_active = ?10,
                updated_at = ?11
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.sku)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.pricing_mode)
        .bind(product.base_price_cents)
        .bind(product.discount_starts_at)
        .bind(product.discount_ends_at)
        .bind(product.max_discount_bps)
        .bind(product.is_active)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        // Options cascade with their variants
        sqlx::query("DELETE FROM product_variants WHERE product_id = ?1")
            .bind(&product.id)
            .execute(&mut *tx)
            .await?;

        for variant in &product.variants {
            sqlx::query(
                r#"
                INSERT INTO product_variants (id, product_id, label, price_cents, position)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(&variant.id)
            .bind(&product.id)
            .bind(&variant.label)
            .bind(variant.price_cents)
            .bind(variant.position)
            .execute(&mut *tx)
            .await?;

            for option in &variant.options {
                sqlx::query(
                    "INSERT INTO variant_options (variant_id, name, value) VALUES (?1, ?2, ?3)",
                )
                .bind(&variant.id)
                .bind(&option.name)
                .bind(&option.value)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Soft-deletes a product (is_active = false).
    ///
    /// Historical order items reference the product id, so rows are never
    /// physically removed.
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting product");

        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE products SET is_active = 0, updated_at = ?2 WHERE id = ?1",
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts active products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // -------------------------------------------------------------------------
    // Variant hydration
    // -------------------------------------------------------------------------

    /// Loads a product's variants with their option pairs (two queries,
    /// grouped in memory).
    async fn load_variants(&self, product_id: &str) -> DbResult<Vec<Variant>> {
        let variant_rows: Vec<VariantRow> = sqlx::query_as(
            r#"
            SELECT id, product_id, label, price_cents, position
            FROM product_variants
            WHERE product_id = ?1
            ORDER BY position, label
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        if variant_rows.is_empty() {
            return Ok(Vec::new());
        }

        let option_rows: Vec<OptionRow> = sqlx::query_as(
            r#"
            SELECT vo.variant_id, vo.name, vo.value
            FROM variant_options vo
            INNER JOIN product_variants pv ON pv.id = vo.variant_id
            WHERE pv.product_id = ?1
            ORDER BY vo.id
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        let variants = variant_rows
            .into_iter()
            .map(|row| {
                let options = option_rows
                    .iter()
                    .filter(|o| o.variant_id == row.id)
                    .map(|o| VariantOption {
                        name: o.name.clone(),
                        value: o.value.clone(),
                    })
                    .collect();
                Variant {
                    id: row.id,
                    product_id: row.product_id,
                    label: row.label,
                    price_cents: row.price_cents,
                    position: row.position,
                    options,
                }
            })
            .collect();

        Ok(variants)
    }

    async fn hydrate_all(&self, rows: Vec<ProductRow>) -> DbResult<Vec<Product>> {
        let mut products = Vec::with_capacity(rows.len());
        for row in rows {
            let variants = self.load_variants(&row.id).await?;
            products.push(row.into_product(variants));
        }
        Ok(products)
    }
}

/// Generates a new product id.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn banner_product() -> Product {
        let id = generate_product_id();
        let now = Utc::now();
        Product {
            id: id.clone(),
            sku: "BAN-VINYL-13OZ".to_string(),
            name: "13oz Vinyl Banner".to_string(),
            description: Some("Full-color outdoor banner".to_string()),
            pricing_mode: PricingMode::SquareFeet,
            base_price_cents: 450,
            discount_starts_at: 20.0,
            discount_ends_at: 100.0,
            max_discount_bps: 2000,
            variants: vec![
                Variant {
                    id: generate_product_id(),
                    product_id: id.clone(),
                    label: "Single-sided".to_string(),
                    price_cents: 450,
                    position: 0,
                    options: vec![VariantOption {
                        name: "Sides".to_string(),
                        value: "Single".to_string(),
                    }],
                },
                Variant {
                    id: generate_product_id(),
                    product_id: id,
                    label: "Double-sided".to_string(),
                    price_cents: 700,
                    position: 1,
                    options: vec![VariantOption {
                        name: "Sides".to_string(),
                        value: "Double".to_string(),
                    }],
                },
            ],
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_with_variants() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let product = banner_product();
        repo.insert(&product).await.unwrap();

        let fetched = repo.get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(fetched.sku, "BAN-VINYL-13OZ");
        assert_eq!(fetched.pricing_mode, PricingMode::SquareFeet);
        assert_eq!(fetched.variants.len(), 2);
        assert_eq!(fetched.variants[0].label, "Single-sided");
        assert_eq!(fetched.variants[1].price_cents, 700);
        assert_eq!(fetched.variants[0].options[0].value, "Single");
    }

    #[tokio::test]
    async fn test_get_by_sku() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        repo.insert(&banner_product()).await.unwrap();

        let fetched = repo.get_by_sku("BAN-VINYL-13OZ").await.unwrap();
        assert!(fetched.is_some());
        assert!(repo.get_by_sku("NOPE").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_sku_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        repo.insert(&banner_product()).await.unwrap();
        let err = repo.insert(&banner_product()).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_search_prefix_match() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        repo.insert(&banner_product()).await.unwrap();

        let results = repo.search("vinyl", 20).await.unwrap();
        assert_eq!(results.len(), 1);

        let results = repo.search("BAN", 20).await.unwrap();
        assert_eq!(results.len(), 1);

        let results = repo.search("coroplast", 20).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_empty_query_lists_active() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        repo.insert(&banner_product()).await.unwrap();
        let results = repo.search("", 20).await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_soft_delete_hides_from_search() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let product = banner_product();
        repo.insert(&product).await.unwrap();
        repo.soft_delete(&product.id).await.unwrap();

        assert!(repo.search("vinyl", 20).await.unwrap().is_empty());
        // Direct lookup still works: order history needs the row
        let fetched = repo.get_by_id(&product.id).await.unwrap().unwrap();
        assert!(!fetched.is_active);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_replaces_variants() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let mut product = banner_product();
        repo.insert(&product).await.unwrap();

        product.name = "13oz Vinyl Banner (Outdoor)".to_string();
        product.variants.truncate(1);
        repo.update(&product).await.unwrap();

        let fetched = repo.get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "13oz Vinyl Banner (Outdoor)");
        assert_eq!(fetched.variants.len(), 1);
    }
}
