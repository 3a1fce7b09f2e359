//! # Checkout Commands
//!
//! Submitting the draft as a persisted order, and order retrieval.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tauri::State;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::{ConfigState, DbState, DraftState};
use signcraft_core::validation::validate_uuid;
use signcraft_core::{Order, OrderItem, OrderStatus};
use signcraft_db::Database;

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummaryDto {
    pub order_id: String,
    pub order_number: String,
    pub status: OrderStatus,
    pub subtotal_cents: i64,
    pub coupon_code: Option<String>,
    pub coupon_discount_cents: i64,
    pub total_cents: i64,
    pub created_at: String,
}

impl From<Order> for OrderSummaryDto {
    fn from(o: Order) -> Self {
        OrderSummaryDto {
            order_id: o.id,
            order_number: o.order_number,
            status: o.status,
            subtotal_cents: o.subtotal_cents,
            coupon_code: o.coupon_code,
            coupon_discount_cents: o.coupon_discount_cents,
            total_cents: o.total_cents,
            created_at: o.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub sku: String,
    pub name: String,
    pub variant_label: Option<String>,
    pub quantity: i64,
    pub width_in: Option<f64>,
    pub height_in: Option<f64>,
    pub unit_price_cents: i64,
    pub gross_cents: i64,
    pub discount_cents: i64,
    pub line_total_cents: i64,
}

impl From<OrderItem> for OrderItemDto {
    fn from(i: OrderItem) -> Self {
        OrderItemDto {
            sku: i.sku_snapshot,
            name: i.name_snapshot,
            variant_label: i.variant_label,
            quantity: i.quantity,
            width_in: i.width_in,
            height_in: i.height_in,
            unit_price_cents: i.unit_price_cents,
            gross_cents: i.gross_cents,
            discount_cents: i.discount_cents,
            line_total_cents: i.line_total_cents,
        }
    }
}

/// A full order: summary, items, and the shop header for printing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailDto {
    pub shop_name: String,
    pub summary: OrderSummaryDto,
    pub items: Vec<OrderItemDto>,
}

// =============================================================================
// Commands
// =============================================================================

/// Submits the current draft as a completed order.
///
/// The draft's lines and totals are frozen into order/item snapshots,
/// written in one transaction, and the draft is cleared for the next
/// customer.
#[tauri::command]
pub async fn submit_order(
    db: State<'_, DbState>,
    draft: State<'_, DraftState>,
    config: State<'_, ConfigState>,
    notes: Option<String>,
) -> Result<OrderDetailDto, ApiError> {
    debug!("submit_order command");

    let (lines, coupon, totals) =
        draft.with_draft(|d| (d.lines.clone(), d.coupon.clone(), d.totals(Utc::now())));

    if lines.is_empty() {
        return Err(ApiError::draft("Order is empty"));
    }

    let db_inner: &Database = (*db).inner();

    let order_id = Uuid::new_v4().to_string();
    let order_number = generate_order_number(&config.order_number_prefix);
    let now = Utc::now();

    let order = Order {
        id: order_id.clone(),
        order_number: order_number.clone(),
        status: OrderStatus::Completed,
        subtotal_cents: totals.subtotal_cents,
        coupon_code: coupon.map(|c| c.code),
        coupon_discount_cents: totals.coupon_discount_cents,
        total_cents: totals.grand_total_cents,
        notes,
        created_at: now,
        updated_at: now,
        completed_at: Some(now),
    };

    let items: Vec<OrderItem> = lines
        .iter()
        .map(|line| OrderItem {
            id: Uuid::new_v4().to_string(),
            order_id: order_id.clone(),
            product_id: line.product_id.clone(),
            sku_snapshot: line.sku.clone(),
            name_snapshot: line.name.clone(),
            variant_label: line.variant_label.clone(),
            pricing_mode: line.pricing_mode,
            unit_price_cents: line.unit_price_cents,
            quantity: line.quantity,
            width_in: line.dimensions.map(|d| d.width_in()),
            height_in: line.dimensions.map(|d| d.height_in()),
            gross_cents: line.quote.gross_cents,
            discount_bps: line.quote.discount_bps,
            discount_cents: line.quote.discount_cents,
            line_total_cents: line.quote.net_cents,
            created_at: now,
        })
        .collect();

    db_inner.orders().insert_order(&order, &items).await?;

    draft.with_draft_mut(|d| d.clear());

    info!(
        order_id = %order_id,
        order_number = %order_number,
        total = totals.grand_total_cents,
        items = items.len(),
        "Order submitted"
    );

    Ok(OrderDetailDto {
        shop_name: config.shop_name.clone(),
        summary: OrderSummaryDto::from(order),
        items: items.into_iter().map(OrderItemDto::from).collect(),
    })
}

/// Gets a submitted order with its items.
#[tauri::command]
pub async fn get_order(
    db: State<'_, DbState>,
    config: State<'_, ConfigState>,
    id: String,
) -> Result<OrderDetailDto, ApiError> {
    debug!(id = %id, "get_order command");
    validate_uuid(&id).map_err(|e| ApiError::validation(e.to_string()))?;

    let db_inner: &Database = (*db).inner();

    let order = db_inner
        .orders()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Order", &id))?;
    let items = db_inner.orders().get_items(&id).await?;

    Ok(OrderDetailDto {
        shop_name: config.shop_name.clone(),
        summary: OrderSummaryDto::from(order),
        items: items.into_iter().map(OrderItemDto::from).collect(),
    })
}

/// Lists the most recent orders.
#[tauri::command]
pub async fn list_recent_orders(
    db: State<'_, DbState>,
    limit: Option<u32>,
) -> Result<Vec<OrderSummaryDto>, ApiError> {
    let limit = limit.unwrap_or(20).min(100);
    debug!(limit = %limit, "list_recent_orders command");

    let db_inner: &Database = (*db).inner();
    let orders = db_inner.orders().list_recent(limit).await?;

    Ok(orders.into_iter().map(OrderSummaryDto::from).collect())
}

/// Generates an order number: `{prefix}-{yymmdd-HHMMSS}-{4 digits}`.
fn generate_order_number(prefix: &str) -> String {
    let now = Utc::now();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    let suffix = nanos % 10000;
    format!("{}-{}-{:04}", prefix, now.format("%y%m%d-%H%M%S"), suffix)
}
