//! # Draft Commands
//!
//! Tauri commands for building the order draft.
//!
//! ## Draft Lifecycle
//! ```text
//!   empty ──add_line_item──► lines ──submit_order (checkout.rs)──► cleared
//!                 │
//!            update_line_quantity / remove_line_item / clear_draft
//! ```
//!
//! `price_line_preview` is the dependency-triggered recompute: the POS
//! right panel invokes it on every keystroke that touches quantity, width,
//! height, or variant, before the line is ever added. It validates the same
//! way `add_line_item` does, so the preview price always matches the price
//! the line will get.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tauri::State;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{DbState, DraftLine, DraftState, OrderDraft};
use signcraft_core::pricing::{
    quote_flat, quote_square_feet, DiscountRamp, Dimensions, LineQuote,
};
use signcraft_core::{CoreError, DiscountRate, PricingMode, Product};
use signcraft_db::Database;

// =============================================================================
// DTOs
// =============================================================================

/// One draft line as the frontend sees it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftLineDto {
    pub line_id: String,
    pub product_id: String,
    pub sku: String,
    pub name: String,
    pub pricing_mode: PricingMode,
    pub variant_id: Option<String>,
    pub variant_label: Option<String>,
    pub unit_price_cents: i64,
    pub quantity: i64,
    pub width_in: Option<f64>,
    pub height_in: Option<f64>,
    pub quote: LineQuote,
}

impl From<&DraftLine> for DraftLineDto {
    fn from(line: &DraftLine) -> Self {
        DraftLineDto {
            line_id: line.line_id.clone(),
            product_id: line.product_id.clone(),
            sku: line.sku.clone(),
            name: line.name.clone(),
            pricing_mode: line.pricing_mode,
            variant_id: line.variant_id.clone(),
            variant_label: line.variant_label.clone(),
            unit_price_cents: line.unit_price_cents,
            quantity: line.quantity,
            width_in: line.dimensions.map(|d| d.width_in()),
            height_in: line.dimensions.map(|d| d.height_in()),
            quote: line.quote,
        }
    }
}

/// Draft totals summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftTotalsDto {
    pub line_count: usize,
    pub total_quantity: i64,
    pub subtotal_cents: i64,
    pub coupon_code: Option<String>,
    pub coupon_discount_cents: i64,
    pub grand_total_cents: i64,
}

/// Full draft response: lines plus totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftResponse {
    pub lines: Vec<DraftLineDto>,
    pub totals: DraftTotalsDto,
}

impl From<&OrderDraft> for DraftResponse {
    fn from(draft: &OrderDraft) -> Self {
        let totals = draft.totals(Utc::now());
        DraftResponse {
            lines: draft.lines.iter().map(DraftLineDto::from).collect(),
            totals: DraftTotalsDto {
                line_count: draft.line_count(),
                total_quantity: draft.total_quantity(),
                subtotal_cents: totals.subtotal_cents,
                coupon_code: draft.coupon.as_ref().map(|c| c.code.clone()),
                coupon_discount_cents: totals.coupon_discount_cents,
                grand_total_cents: totals.grand_total_cents,
            },
        }
    }
}

/// Line-item input shared by preview and add.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    pub product_id: String,
    pub variant_id: Option<String>,
    /// Defaults to 1.
    pub quantity: Option<i64>,
    pub width_in: Option<f64>,
    pub height_in: Option<f64>,
    /// Admin price override in cents; defaults from product/variant.
    pub unit_price_cents: Option<i64>,
}

// =============================================================================
// Helpers
// =============================================================================

/// Builds validated `Dimensions` for a square-feet product from optional
/// raw inputs. Missing measurements surface as the boundary error the POS
/// shows as a blocking dialog.
fn dimensions_for(product: &Product, input: &LineItemInput) -> Result<Option<Dimensions>, ApiError> {
    match product.pricing_mode {
        PricingMode::SquareFeet => {
            let (width, height) = match (input.width_in, input.height_in) {
                (Some(w), Some(h)) => (w, h),
                _ => {
                    return Err(CoreError::DimensionsRequired {
                        sku: product.sku.clone(),
                    }
                    .into())
                }
            };
            let dims = Dimensions::new(width, height)
                .map_err(|e| ApiError::validation(e.to_string()))?;
            Ok(Some(dims))
        }
        PricingMode::Flat => Ok(None),
    }
}

async fn fetch_product(db: &Database, product_id: &str) -> Result<Product, ApiError> {
    let product = db
        .products()
        .get_by_id(product_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", product_id))?;

    if !product.is_active {
        return Err(ApiError::validation("Product is not available for sale"));
    }

    Ok(product)
}

// =============================================================================
// Commands
// =============================================================================

/// Gets the current draft contents and totals.
#[tauri::command]
pub fn get_draft(draft: State<'_, DraftState>) -> DraftResponse {
    debug!("get_draft command");
    draft.with_draft(DraftResponse::from)
}

/// Prices a prospective line without adding it.
///
/// Recomputed on every relevant input change in the POS panel; pure and
/// side-effect free apart from the product fetch.
#[tauri::command]
pub async fn price_line_preview(
    db: State<'_, DbState>,
    input: LineItemInput,
) -> Result<LineQuote, ApiError> {
    debug!(product_id = %input.product_id, "price_line_preview command");

    let product = fetch_product((*db).inner(), &input.product_id).await?;
    let quantity = input.quantity.unwrap_or(1);

    let unit_price = match input.unit_price_cents {
        Some(cents) => signcraft_core::Money::from_cents(cents),
        None => product.effective_unit_price(input.variant_id.as_deref())?,
    };

    let ramp = DiscountRamp::new(
        product.discount_starts_at,
        product.discount_ends_at,
        DiscountRate::from_bps(product.max_discount_bps),
    )
    .map_err(CoreError::from)?;

    let quote = match dimensions_for(&product, &input)? {
        Some(dims) => quote_square_feet(unit_price, dims, quantity, &ramp)?,
        None => quote_flat(unit_price, quantity, &ramp)?,
    };

    Ok(quote)
}

/// Adds a line item to the draft.
///
/// ## Boundary Validation
/// This is where the original surfaced its blocking dialogs, and the rules
/// are unchanged: a variant must be selected when the product has variants,
/// and square-feet products need positive width and height. The calculator
/// itself never sees invalid input.
#[tauri::command]
pub async fn add_line_item(
    db: State<'_, DbState>,
    draft: State<'_, DraftState>,
    input: LineItemInput,
) -> Result<DraftResponse, ApiError> {
    debug!(product_id = %input.product_id, "add_line_item command");

    let product = fetch_product((*db).inner(), &input.product_id).await?;
    let quantity = input.quantity.unwrap_or(1);
    let dimensions = dimensions_for(&product, &input)?;

    draft.with_draft_mut(|d| {
        d.add_line(
            &product,
            input.variant_id.as_deref(),
            quantity,
            dimensions,
            input.unit_price_cents,
        )?;
        Ok(DraftResponse::from(&*d))
    })
}

/// Updates a line's quantity (0 removes the line).
#[tauri::command]
pub fn update_line_quantity(
    draft: State<'_, DraftState>,
    line_id: String,
    quantity: i64,
) -> Result<DraftResponse, ApiError> {
    debug!(line_id = %line_id, quantity = %quantity, "update_line_quantity command");

    draft.with_draft_mut(|d| {
        d.update_quantity(&line_id, quantity)?;
        Ok(DraftResponse::from(&*d))
    })
}

/// Removes a line from the draft.
#[tauri::command]
pub fn remove_line_item(
    draft: State<'_, DraftState>,
    line_id: String,
) -> Result<DraftResponse, ApiError> {
    debug!(line_id = %line_id, "remove_line_item command");

    draft.with_draft_mut(|d| {
        d.remove_line(&line_id)?;
        Ok(DraftResponse::from(&*d))
    })
}

/// Clears the draft (cancelled order or post-submit reset).
#[tauri::command]
pub fn clear_draft(draft: State<'_, DraftState>) -> DraftResponse {
    debug!("clear_draft command");

    draft.with_draft_mut(|d| {
        d.clear();
        DraftResponse::from(&*d)
    })
}
