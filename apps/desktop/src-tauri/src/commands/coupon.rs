//! # Coupon Commands
//!
//! Applying and removing a coupon on the order draft.
//!
//! Applicability (active flag, expiry, minimum subtotal) is checked at
//! apply time against the current subtotal; the draft then keeps the
//! coupon's terms snapshot and re-derives the flat discount whenever
//! totals are read.

use chrono::Utc;
use tauri::State;
use tracing::{debug, info};

use crate::commands::draft::DraftResponse;
use crate::error::ApiError;
use crate::state::{DbState, DraftState};
use signcraft_core::validation::validate_coupon_code;
use signcraft_db::Database;

/// Applies a coupon code to the draft.
#[tauri::command]
pub async fn apply_coupon(
    db: State<'_, DbState>,
    draft: State<'_, DraftState>,
    code: String,
) -> Result<DraftResponse, ApiError> {
    let code = validate_coupon_code(&code).map_err(|e| ApiError::validation(e.to_string()))?;
    debug!(code = %code, "apply_coupon command");

    let db_inner: &Database = (*db).inner();
    let coupon = db_inner
        .coupons()
        .get_by_code(&code)
        .await?
        .ok_or_else(|| ApiError::coupon(format!("Unknown coupon code: {}", code)))?;

    draft.with_draft_mut(|d| {
        // Reject up front rather than silently contributing zero later
        let subtotal = d.subtotal();
        let discount = coupon.discount_for(subtotal, Utc::now())?;

        info!(
            code = %coupon.code,
            subtotal = %subtotal,
            discount = %discount,
            "Coupon applied"
        );

        d.apply_coupon(coupon.clone());
        Ok(DraftResponse::from(&*d))
    })
}

/// Removes the coupon from the draft.
#[tauri::command]
pub fn remove_coupon(draft: State<'_, DraftState>) -> DraftResponse {
    debug!("remove_coupon command");

    draft.with_draft_mut(|d| {
        d.remove_coupon();
        DraftResponse::from(&*d)
    })
}
