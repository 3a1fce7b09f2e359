//! # Catalog Commands
//!
//! Tauri commands for product search and retrieval.
//!
//! ## Search Flow
//! The POS search box debounces input, then invokes `search_products`. If
//! the query is a well-formed SKU an exact lookup runs first (staff often
//! paste SKUs straight off job tickets); otherwise FTS5 prefix search over
//! sku and name.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tauri::State;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::DbState;
use signcraft_core::validation::{validate_search_query, validate_sku};
use signcraft_core::{PricingMode, Product, Variant, VariantOption};
use signcraft_db::Database;

// =============================================================================
// DTOs
// =============================================================================

/// Product DTO for the frontend.
///
/// Decouples the domain model from the API contract and renames fields to
/// camelCase for JS consumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub pricing_mode: PricingMode,
    pub base_price_cents: i64,
    pub discount_starts_at: f64,
    pub discount_ends_at: f64,
    pub max_discount_bps: u32,
    pub variants: Vec<VariantDto>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantDto {
    pub id: String,
    pub label: String,
    pub price_cents: i64,
    pub options: Vec<VariantOptionDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantOptionDto {
    pub name: String,
    pub value: String,
}

impl From<VariantOption> for VariantOptionDto {
    fn from(o: VariantOption) -> Self {
        VariantOptionDto {
            name: o.name,
            value: o.value,
        }
    }
}

impl From<Variant> for VariantDto {
    fn from(v: Variant) -> Self {
        VariantDto {
            id: v.id,
            label: v.label,
            price_cents: v.price_cents,
            options: v.options.into_iter().map(VariantOptionDto::from).collect(),
        }
    }
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        ProductDto {
            id: p.id,
            sku: p.sku,
            name: p.name,
            description: p.description,
            pricing_mode: p.pricing_mode,
            base_price_cents: p.base_price_cents,
            discount_starts_at: p.discount_starts_at,
            discount_ends_at: p.discount_ends_at,
            max_discount_bps: p.max_discount_bps,
            variants: p.variants.into_iter().map(VariantDto::from).collect(),
            is_active: p.is_active,
        }
    }
}

// =============================================================================
// Commands
// =============================================================================

/// Searches the catalog.
///
/// ## Arguments
/// * `query` - Search term (searches SKU and name; empty lists actives)
/// * `limit` - Maximum results (default 20, capped at 100)
#[tauri::command]
pub async fn search_products(
    db: State<'_, DbState>,
    query: String,
    limit: Option<u32>,
) -> Result<Vec<ProductDto>, ApiError> {
    let start = Instant::now();
    let query = validate_search_query(&query).map_err(|e| ApiError::validation(e.to_string()))?;
    let limit = limit.unwrap_or(20).min(100);

    debug!(query = %query, limit = %limit, "search_products command");

    let db_inner: &Database = (*db).inner();

    // Exact SKU fast path: a pasted SKU should hit instantly without
    // depending on FTS tokenization of hyphens
    if validate_sku(&query).is_ok() {
        if let Some(product) = db_inner.products().get_by_sku(&query).await? {
            if product.is_active {
                info!(
                    elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                    count = 1,
                    "search_products exact SKU hit"
                );
                return Ok(vec![ProductDto::from(product)]);
            }
        }
    }

    let products = db_inner.products().search(&query, limit).await?;
    let dtos: Vec<ProductDto> = products.into_iter().map(ProductDto::from).collect();

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count = dtos.len(),
        query = %query,
        "search_products complete"
    );

    Ok(dtos)
}

/// Gets a single product by its UUID.
#[tauri::command]
pub async fn get_product_by_id(db: State<'_, DbState>, id: String) -> Result<ProductDto, ApiError> {
    debug!(id = %id, "get_product_by_id command");
    let db_inner: &Database = (*db).inner();
    let product = db_inner
        .products()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &id))?;
    Ok(ProductDto::from(product))
}

/// Gets a single product by its SKU.
#[tauri::command]
pub async fn get_product_by_sku(
    db: State<'_, DbState>,
    sku: String,
) -> Result<ProductDto, ApiError> {
    debug!(sku = %sku, "get_product_by_sku command");
    let db_inner: &Database = (*db).inner();
    let product = db_inner
        .products()
        .get_by_sku(&sku)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &sku))?;
    Ok(ProductDto::from(product))
}
