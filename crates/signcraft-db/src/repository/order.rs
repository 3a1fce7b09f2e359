//! # Order Repository
//!
//! Database operations for submitted orders and their line items.
//!
//! ## Order Lifecycle
//! ```text
//!   draft (in-memory, app layer) ──submit──► completed ──void──► voided
//! ```
//! The in-progress draft never touches the database; `insert_order`
//! receives the fully priced order with frozen line snapshots in a single
//! transaction.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use signcraft_core::{Order, OrderItem, OrderStatus, PricingMode};

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    order_number: String,
    status: OrderStatus,
    subtotal_cents: i64,
    coupon_code: Option<String>,
    coupon_discount_cents: i64,
    total_cents: i64,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order {
            id: row.id,
            order_number: row.order_number,
            status: row.status,
            subtotal_cents: row.subtotal_cents,
            coupon_code: row.coupon_code,
            coupon_discount_cents: row.coupon_discount_cents,
            total_cents: row.total_cents,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
            completed_at: row.completed_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: String,
    order_id: String,
    product_id: String,
    sku_snapshot: String,
    name_snapshot: String,
    variant_label: Option<String>,
    pricing_mode: PricingMode,
    unit_price_cents: i64,
    quantity: i64,
    width_in: Option<f64>,
    height_in: Option<f64>,
    gross_cents: i64,
    discount_bps: u32,
    discount_cents: i64,
    line_total_cents: i64,
    created_at: DateTime<Utc>,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        OrderItem {
            id: row.id,
            order_id: row.order_id,
            product_id: row.product_id,
            sku_snapshot: row.sku_snapshot,
            name_snapshot: row.name_snapshot,
            variant_label: row.variant_label,
            pricing_mode: row.pricing_mode,
            unit_price_cents: row.unit_price_cents,
            quantity: row.quantity,
            width_in: row.width_in,
            height_in: row.height_in,
            gross_cents: row.gross_cents,
            discount_bps: row.discount_bps,
            discount_cents: row.discount_cents,
            line_total_cents: row.line_total_cents,
            created_at: row.created_at,
        }
    }
}

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

    /// Inserts an order and all its items in one transaction.
    pub async fn insert_order(&self, order: &Order, items: &[OrderItem]) -> DbResult<()> {
        debug!(
            id = %order.id,
            order_number = %order.order_number,
            items = items.len(),
            "Inserting order"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, order_number, status, subtotal_cents,
                coupon_code, coupon_discount_cents, total_cents,
                notes, created_at, updated_at, completed_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&order.id)
        .bind(&order.order_number)
        .bind(order.status)
        .bind(order.subtotal_cents)
        .bind(&order.coupon_code)
        .bind(order.coupon_discount_cents)
        .bind(order.total_cents)
        .bind(&order.notes)
        .bind(order.created_at)
        .bind(order.updated_at)
        .bind(order.completed_at)
        .execute(&mut *tx)
        .await?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO order_items (
                    id, order_id, product_id, sku_snapshot, name_snapshot,
                    variant_label, pricing_mode, unit_price_cents, quantity,
                    width_in, height_in, gross_cents, discount_bps,
                    discount_cents, line_total_cents, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
                "#,
            )
            .bind(&item.id)
            .bind(&item.order_id)
            .bind(&item.product_id)
            .bind(&item.sku_snapshot)
            .bind(&item.name_snapshot)
            .bind(&item.variant_label)
            .bind(item.pricing_mode)
            .bind(item.unit_price_cents)
            .bind(item.quantity)
            .bind(item.width_in)
            .bind(item.height_in)
            .bind(item.gross_cents)
            .bind(item.discount_bps)
            .bind(item.discount_cents)
            .bind(item.line_total_cents)
            .bind(item.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Gets an order by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let row: Option<OrderRow> = sqlx::query_as(
            r#"
            SELECT id, order_number, status, subtotal_cents,
                   coupon_code, coupon_discount_cents, total_cents,
                   notes, created_at, updated_at, completed_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Order::from))
    }

    /// Gets all items of an order, in insertion order.
    pub async fn get_items(&self, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let rows: Vec<OrderItemRow> = sqlx::query_as(
            r#"
            SELECT id, order_id, product_id, sku_snapshot, name_snapshot,
                   variant_label, pricing_mode, unit_price_cents, quantity,
                   width_in, height_in, gross_cents, discount_bps,
                   discount_cents, line_total_cents, created_at
            FROM order_items
            WHERE order_id = ?1
            ORDER BY created_at, id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(OrderItem::from).collect())
    }

    /// Lists the most recent orders.
    pub async fn list_recent(&self, limit: u32) -> DbResult<Vec<Order>> {
        let rows: Vec<OrderRow> = sqlx::query_as(
            r#"
            SELECT id, order_number, status, subtotal_cents,
                   coupon_code, coupon_discount_cents, total_cents,
                   notes, created_at, updated_at, completed_at
            FROM orders
            ORDER BY created_at DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }

    /// Voids a completed order.
    pub async fn void_order(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Voiding order");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE orders
            SET status = 'voided', updated_at = ?2
            WHERE id = ?1 AND status = 'completed'
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        Ok(())
    }

    /// Counts all orders (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use uuid::Uuid;

    fn completed_order() -> (Order, Vec<OrderItem>) {
        let order_id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let order = Order {
            id: order_id.clone(),
            order_number: "SC-250801-0001".to_string(),
            status: OrderStatus::Completed,
            subtotal_cents: 24000,
            coupon_code: Some("SPRING20".to_string()),
            coupon_discount_cents: 4800,
            total_cents: 19200,
            notes: None,
            created_at: now,
            updated_at: now,
            completed_at: Some(now),
        };

        let items = vec![OrderItem {
            id: Uuid::new_v4().to_string(),
            order_id,
            product_id: Uuid::new_v4().to_string(),
            sku_snapshot: "BAN-VINYL-13OZ".to_string(),
            name_snapshot: "13oz Vinyl Banner".to_string(),
            variant_label: Some("Double-sided".to_string()),
            pricing_mode: PricingMode::SquareFeet,
            unit_price_cents: 2000,
            quantity: 2,
            width_in: Some(24.0),
            height_in: Some(36.0),
            gross_cents: 24000,
            discount_bps: 0,
            discount_cents: 0,
            line_total_cents: 24000,
            created_at: now,
        }];

        (order, items)
    }

    #[tokio::test]
    async fn test_insert_and_fetch_order_with_items() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.orders();

        let (order, items) = completed_order();
        repo.insert_order(&order, &items).await.unwrap();

        let fetched = repo.get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, OrderStatus::Completed);
        assert_eq!(fetched.total_cents, 19200);
        assert_eq!(fetched.coupon_code.as_deref(), Some("SPRING20"));

        let fetched_items = repo.get_items(&order.id).await.unwrap();
        assert_eq!(fetched_items.len(), 1);
        assert_eq!(fetched_items[0].pricing_mode, PricingMode::SquareFeet);
        assert_eq!(fetched_items[0].width_in, Some(24.0));
        assert_eq!(fetched_items[0].line_total_cents, 24000);
    }

    #[tokio::test]
    async fn test_list_recent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.orders();

        let (mut first, items) = completed_order();
        first.order_number = "SC-250801-0001".to_string();
        repo.insert_order(&first, &items).await.unwrap();

        let (mut second, _) = completed_order();
        second.order_number = "SC-250801-0002".to_string();
        second.created_at = first.created_at + chrono::Duration::seconds(10);
        repo.insert_order(&second, &[]).await.unwrap();

        let recent = repo.list_recent(10).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].order_number, "SC-250801-0002");
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_void_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.orders();

        let (order, items) = completed_order();
        repo.insert_order(&order, &items).await.unwrap();
        repo.void_order(&order.id).await.unwrap();

        let fetched = repo.get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, OrderStatus::Voided);

        // Voiding twice fails: only completed orders can be voided
        assert!(repo.void_order(&order.id).await.is_err());
    }
}
