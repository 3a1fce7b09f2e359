//! # Coupon Repository
//!
//! Database operations for discount coupons. Applicability rules (expiry,
//! minimum subtotal, active flag) live on `Coupon` in signcraft-core; this
//! repository only stores and fetches.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use signcraft_core::{Coupon, CouponKind};

#[derive(Debug, sqlx::FromRow)]
struct CouponRow {
    id: String,
    code: String,
    kind: CouponKind,
    value: i64,
    min_subtotal_cents: Option<i64>,
    expires_at: Option<DateTime<Utc>>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CouponRow> for Coupon {
    fn from(row: CouponRow) -> Self {
        Coupon {
            id: row.id,
            code: row.code,
            kind: row.kind,
            value: row.value,
            min_subtotal_cents: row.min_subtotal_cents,
            expires_at: row.expires_at,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for coupon database operations.
#[derive(Debug, Clone)]
pub struct CouponRepository {
    pool: SqlitePool,
}

impl CouponRepository {
    /// Creates a new CouponRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CouponRepository { pool }
    }

    /// Gets a coupon by its code (codes are stored uppercase).
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<Coupon>> {
        debug!(code = %code, "Looking up coupon");

        let row: Option<CouponRow> = sqlx::query_as(
            r#"
            SELECT id, code, kind, value, min_subtotal_cents,
                   expires_at, is_active, created_at, updated_at
            FROM coupons
            WHERE code = ?1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Coupon::from))
    }

    /// Inserts a new coupon.
    pub async fn insert(&self, coupon: &Coupon) -> DbResult<()> {
        debug!(code = %coupon.code, "Inserting coupon");

        sqlx::query(
            r#"
            INSERT INTO coupons (
                id, code, kind, value, min_subtotal_cents,
                expires_at, is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&coupon.id)
        .bind(&coupon.code)
        .bind(coupon.kind)
        .bind(coupon.value)
        .bind(coupon.min_subtotal_cents)
        .bind(coupon.expires_at)
        .bind(coupon.is_active)
        .bind(coupon.created_at)
        .bind(coupon.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deactivates a coupon so it can no longer be applied.
    pub async fn deactivate(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deactivating coupon");

        let now = Utc::now();

        let result =
            sqlx::query("UPDATE coupons SET is_active = 0, updated_at = ?2 WHERE id = ?1")
                .bind(id)
                .bind(now)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Coupon", id));
        }

        Ok(())
    }

    /// Lists active coupons, newest first.
    pub async fn list_active(&self, limit: u32) -> DbResult<Vec<Coupon>> {
        let rows: Vec<CouponRow> = sqlx::query_as(
            r#"
            SELECT id, code, kind, value, min_subtotal_cents,
                   expires_at, is_active, created_at, updated_at
            FROM coupons
            WHERE is_active = 1
            ORDER BY created_at DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Coupon::from).collect())
    }
}

/// Generates a new coupon id.
pub fn generate_coupon_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn spring_coupon() -> Coupon {
        let now = Utc::now();
        Coupon {
            id: generate_coupon_id(),
            code: "SPRING20".to_string(),
            kind: CouponKind::Percentage,
            value: 2000,
            min_subtotal_cents: Some(5000),
            expires_at: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_by_code() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.coupons();

        repo.insert(&spring_coupon()).await.unwrap();

        let fetched = repo.get_by_code("SPRING20").await.unwrap().unwrap();
        assert_eq!(fetched.kind, CouponKind::Percentage);
        assert_eq!(fetched.value, 2000);
        assert_eq!(fetched.min_subtotal_cents, Some(5000));

        assert!(repo.get_by_code("NOPE").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_code_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.coupons();

        repo.insert(&spring_coupon()).await.unwrap();
        let err = repo.insert(&spring_coupon()).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_deactivate() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.coupons();

        let coupon = spring_coupon();
        repo.insert(&coupon).await.unwrap();
        repo.deactivate(&coupon.id).await.unwrap();

        let fetched = repo.get_by_code("SPRING20").await.unwrap().unwrap();
        assert!(!fetched.is_active);
        assert!(repo.list_active(10).await.unwrap().is_empty());
    }
}
