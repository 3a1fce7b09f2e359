//! # Order Draft State
//!
//! The in-memory order being built at the POS screen.
//!
//! ## Lifecycle
//! The draft exists only for the duration of building one order: lines are
//! added/edited as the user works, every mutation reprices the affected
//! line through the pure calculator, and `submit_order` persists the frozen
//! result and clears the draft. Navigating away or clearing discards it.
//!
//! ## Thread Safety
//! Wrapped in `Arc<Mutex<T>>`: Tauri commands can run concurrently, but
//! only one may mutate the draft at a time. Operations are short, so a
//! plain Mutex beats a RwLock here.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use signcraft_core::pricing::{quote_flat, quote_square_feet, DiscountRamp, Dimensions, LineQuote};
use signcraft_core::validation::{validate_draft_size, validate_unit_price};
use signcraft_core::{
    Coupon, CoreError, CoreResult, DiscountRate, Money, OrderTotals, PricingMode, Product,
};

// =============================================================================
// Draft Line
// =============================================================================

/// One line of the order being built.
///
/// Product identity, the effective unit price, and the discount ramp are
/// frozen at add time; a catalog edit mid-order does not reprice lines
/// already on the ticket. The quote is recomputed from the frozen inputs
/// whenever quantity changes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftLine {
    /// Identifies the line within the draft (a product can appear twice
    /// with different variants or dimensions).
    pub line_id: String,

    pub product_id: String,
    pub sku: String,
    pub name: String,
    pub pricing_mode: PricingMode,

    pub variant_id: Option<String>,
    pub variant_label: Option<String>,

    /// Effective per-unit or per-square-foot price (variant-resolved,
    /// possibly admin-overridden), frozen at add time.
    pub unit_price_cents: i64,

    pub quantity: i64,

    /// Present for square-feet lines only.
    pub dimensions: Option<Dimensions>,

    /// The product's volume-discount ramp, frozen at add time.
    pub ramp: DiscountRamp,

    /// Current pricing quote for this line.
    pub quote: LineQuote,

    pub added_at: DateTime<Utc>,
}

impl DraftLine {
    /// Reprices the line from its frozen inputs.
    fn requote(&mut self) -> CoreResult<()> {
        let unit_price = Money::from_cents(self.unit_price_cents);
        self.quote = match (self.pricing_mode, self.dimensions) {
            (PricingMode::SquareFeet, Some(dims)) => {
                quote_square_feet(unit_price, dims, self.quantity, &self.ramp)?
            }
            (PricingMode::SquareFeet, None) => {
                return Err(CoreError::DimensionsRequired {
                    sku: self.sku.clone(),
                })
            }
            (PricingMode::Flat, _) => quote_flat(unit_price, self.quantity, &self.ramp)?,
        };
        Ok(())
    }
}

// =============================================================================
// Order Draft
// =============================================================================

/// The order being built.
///
/// ## Invariants
/// - At most `MAX_ORDER_ITEMS` lines
/// - Every line carries a quote consistent with its frozen inputs
/// - The coupon (if any) was applicable when applied; its discount is
///   recomputed against the current subtotal on every totals read
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub lines: Vec<DraftLine>,

    /// Coupon terms snapshot; the flat discount is derived, never stored.
    pub coupon: Option<Coupon>,

    pub created_at: DateTime<Utc>,
}

impl OrderDraft {
    /// Creates a new empty draft.
    pub fn new() -> Self {
        OrderDraft {
            lines: Vec::new(),
            coupon: None,
            created_at: Utc::now(),
        }
    }

    /// Adds a line for a product, enforcing the add-to-order boundary rules.
    ///
    /// ## Boundary Validation
    /// - Square-feet products require dimensions (`DimensionsRequired`)
    /// - Products with variants require a selection
    ///   (`VariantSelectionRequired`, inside `effective_unit_price`)
    /// - An admin price override must be non-negative
    ///
    /// ## Returns
    /// The id of the new line.
    pub fn add_line(
        &mut self,
        product: &Product,
        variant_id: Option<&str>,
        quantity: i64,
        dimensions: Option<Dimensions>,
        unit_price_override: Option<i64>,
    ) -> CoreResult<String> {
        validate_draft_size(self.lines.len())?;

        let dimensions = match product.pricing_mode {
            PricingMode::SquareFeet => Some(dimensions.ok_or_else(|| {
                CoreError::DimensionsRequired {
                    sku: product.sku.clone(),
                }
            })?),
            // Dimensions on a flat product are ignored rather than stored
            PricingMode::Flat => None,
        };

        let unit_price = match unit_price_override {
            Some(cents) => {
                let price = Money::from_cents(cents);
                validate_unit_price(price)?;
                price
            }
            None => product.effective_unit_price(variant_id)?,
        };

        let variant = variant_id.and_then(|id| product.variant(id));

        let ramp = DiscountRamp::new(
            product.discount_starts_at,
            product.discount_ends_at,
            DiscountRate::from_bps(product.max_discount_bps),
        )?;

        let mut line = DraftLine {
            line_id: Uuid::new_v4().to_string(),
            product_id: product.id.clone(),
            sku: product.sku.clone(),
            name: product.name.clone(),
            pricing_mode: product.pricing_mode,
            variant_id: variant.map(|v| v.id.clone()),
            variant_label: variant.map(|v| v.label.clone()),
            unit_price_cents: unit_price.cents(),
            quantity,
            dimensions,
            ramp,
            quote: LineQuote {
                magnitude: 0.0,
                gross_cents: 0,
                discount_bps: 0,
                discount_cents: 0,
                net_cents: 0,
            },
            added_at: Utc::now(),
        };
        line.requote()?;

        let line_id = line.line_id.clone();
        self.lines.push(line);
        Ok(line_id)
    }

    /// Updates a line's quantity and reprices it. Quantity 0 removes the
    /// line.
    pub fn update_quantity(&mut self, line_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_line(line_id);
        }

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.line_id == line_id)
            .ok_or_else(|| CoreError::LineItemNotFound(line_id.to_string()))?;

        let previous = line.quantity;
        line.quantity = quantity;
        if let Err(e) = line.requote() {
            line.quantity = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Removes a line by id.
    pub fn remove_line(&mut self, line_id: &str) -> CoreResult<()> {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.line_id != line_id);

        if self.lines.len() == initial_len {
            Err(CoreError::LineItemNotFound(line_id.to_string()))
        } else {
            Ok(())
        }
    }

    /// Attaches a coupon. Applicability against the current subtotal was
    /// checked by the caller; the terms snapshot is kept so the discount
    /// tracks later subtotal changes.
    pub fn apply_coupon(&mut self, coupon: Coupon) {
        self.coupon = Some(coupon);
    }

    /// Detaches the coupon.
    pub fn remove_coupon(&mut self) {
        self.coupon = None;
    }

    /// Clears all lines and the coupon.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.coupon = None;
        self.created_at = Utc::now();
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Checks if the draft is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Subtotal: sum of line net totals.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(|l| l.quote.net()).sum()
    }

    /// The coupon discount at the current subtotal.
    ///
    /// A coupon that was applicable when applied can stop qualifying if
    /// lines are removed (subtotal drops below its minimum); it then
    /// contributes zero rather than blocking the totals read. The frontend
    /// shows the attached code alongside a zero discount in that state.
    pub fn coupon_discount(&self, now: DateTime<Utc>) -> Money {
        let subtotal = self.subtotal();
        self.coupon
            .as_ref()
            .and_then(|c| c.discount_for(subtotal, now).ok())
            .unwrap_or_default()
    }

    /// Order-level totals with the zero-floored grand total.
    pub fn totals(&self, now: DateTime<Utc>) -> OrderTotals {
        signcraft_core::pricing::order_totals(
            self.lines.iter().map(|l| l.quote.net_cents),
            self.coupon_discount(now),
        )
    }
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tauri-Managed State
// =============================================================================

/// Tauri-managed draft state: `Arc` for shared ownership across command
/// invocations, `Mutex` for exclusive mutation.
#[derive(Debug)]
pub struct DraftState {
    draft: Arc<Mutex<OrderDraft>>,
}

impl DraftState {
    /// Creates a new empty draft state.
    pub fn new() -> Self {
        DraftState {
            draft: Arc::new(Mutex::new(OrderDraft::new())),
        }
    }

    /// Executes a function with read access to the draft.
    pub fn with_draft<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OrderDraft) -> R,
    {
        let draft = self.draft.lock().expect("Draft mutex poisoned");
        f(&draft)
    }

    /// Executes a function with write access to the draft.
    pub fn with_draft_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OrderDraft) -> R,
    {
        let mut draft = self.draft.lock().expect("Draft mutex poisoned");
        f(&mut draft)
    }
}

impl Default for DraftState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use signcraft_core::{CouponKind, Variant, VariantOption};

    fn flat_product(sku: &str, price_cents: i64) -> Product {
        Product {
            id: format!("id-{}", sku),
            sku: sku.to_string(),
            name: format!("Product {}", sku),
            description: None,
            pricing_mode: PricingMode::Flat,
            base_price_cents: price_cents,
            discount_starts_at: 0.0,
            discount_ends_at: 0.0,
            max_discount_bps: 0,
            variants: Vec::new(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn banner_product() -> Product {
        let mut p = flat_product("BAN-VINYL", 2000);
        p.pricing_mode = PricingMode::SquareFeet;
        p
    }

    fn percent_coupon(bps: i64) -> Coupon {
        Coupon {
            id: "c1".to_string(),
            code: "SPRING20".to_string(),
            kind: CouponKind::Percentage,
            value: bps,
            min_subtotal_cents: None,
            expires_at: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_flat_line() {
        let mut draft = OrderDraft::new();
        let product = flat_product("YARD-18X24", 1200);

        draft.add_line(&product, None, 5, None, None).unwrap();

        assert_eq!(draft.line_count(), 1);
        assert_eq!(draft.total_quantity(), 5);
        assert_eq!(draft.subtotal().cents(), 6000);
    }

    #[test]
    fn test_add_square_feet_line_requires_dimensions() {
        let mut draft = OrderDraft::new();
        let product = banner_product();

        let err = draft.add_line(&product, None, 1, None, None);
        assert!(matches!(err, Err(CoreError::DimensionsRequired { .. })));

        let dims = Dimensions::new(24.0, 36.0).unwrap();
        draft.add_line(&product, None, 2, Some(dims), None).unwrap();
        // 6 sq ft × $20 × 2
        assert_eq!(draft.subtotal().cents(), 24000);
    }

    #[test]
    fn test_variant_required_when_product_has_variants() {
        let mut draft = OrderDraft::new();
        let mut product = flat_product("DECAL", 350);
        product.variants.push(Variant {
            id: "v1".to_string(),
            product_id: product.id.clone(),
            label: "Reflective".to_string(),
            price_cents: 625,
            position: 0,
            options: vec![VariantOption {
                name: "Finish".to_string(),
                value: "Reflective".to_string(),
            }],
        });

        let err = draft.add_line(&product, None, 1, None, None);
        assert!(matches!(err, Err(CoreError::VariantSelectionRequired { .. })));

        draft.add_line(&product, Some("v1"), 1, None, None).unwrap();
        // Variant price replaced the base price
        assert_eq!(draft.subtotal().cents(), 625);
        assert_eq!(draft.lines[0].variant_label.as_deref(), Some("Reflective"));
    }

    #[test]
    fn test_unit_price_override() {
        let mut draft = OrderDraft::new();
        let product = flat_product("MAG-CAR", 4500);

        draft.add_line(&product, None, 1, None, Some(4000)).unwrap();
        assert_eq!(draft.subtotal().cents(), 4000);

        let err = draft.add_line(&product, None, 1, None, Some(-100));
        assert!(err.is_err());
    }

    #[test]
    fn test_update_quantity_reprices() {
        let mut draft = OrderDraft::new();
        let mut product = flat_product("DECAL", 1000);
        product.discount_starts_at = 10.0;
        product.discount_ends_at = 20.0;
        product.max_discount_bps = 5000;

        let line_id = draft.add_line(&product, None, 5, None, None).unwrap();
        assert_eq!(draft.subtotal().cents(), 5000); // below ramp

        draft.update_quantity(&line_id, 15).unwrap();
        // 15 × $10 = $150 gross, 25% ramp discount => $112.50
        assert_eq!(draft.lines[0].quote.discount_bps, 2500);
        assert_eq!(draft.subtotal().cents(), 11250);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut draft = OrderDraft::new();
        let product = flat_product("YARD", 1200);
        let line_id = draft.add_line(&product, None, 2, None, None).unwrap();

        draft.update_quantity(&line_id, 0).unwrap();
        assert!(draft.is_empty());
    }

    #[test]
    fn test_invalid_quantity_leaves_line_unchanged() {
        let mut draft = OrderDraft::new();
        let product = flat_product("YARD", 1200);
        let line_id = draft.add_line(&product, None, 2, None, None).unwrap();

        assert!(draft.update_quantity(&line_id, 100_000).is_err());
        assert_eq!(draft.lines[0].quantity, 2);
        assert_eq!(draft.subtotal().cents(), 2400);
    }

    #[test]
    fn test_remove_unknown_line() {
        let mut draft = OrderDraft::new();
        assert!(matches!(
            draft.remove_line("nope"),
            Err(CoreError::LineItemNotFound(_))
        ));
    }

    #[test]
    fn test_totals_with_coupon() {
        let mut draft = OrderDraft::new();
        let product = flat_product("YARD", 1000);
        draft.add_line(&product, None, 10, None, None).unwrap();
        draft.apply_coupon(percent_coupon(2000)); // 20%

        let totals = draft.totals(Utc::now());
        assert_eq!(totals.subtotal_cents, 10000);
        assert_eq!(totals.coupon_discount_cents, 2000);
        assert_eq!(totals.grand_total_cents, 8000);
    }

    #[test]
    fn test_coupon_discount_tracks_subtotal_changes() {
        let mut draft = OrderDraft::new();
        let product = flat_product("YARD", 1000);
        let line_id = draft.add_line(&product, None, 10, None, None).unwrap();

        let mut coupon = percent_coupon(2000);
        coupon.min_subtotal_cents = Some(5000);
        draft.apply_coupon(coupon);
        assert_eq!(draft.totals(Utc::now()).coupon_discount_cents, 2000);

        // Dropping below the minimum zeroes the discount instead of
        // keeping a stale amount
        draft.update_quantity(&line_id, 2).unwrap();
        let totals = draft.totals(Utc::now());
        assert_eq!(totals.subtotal_cents, 2000);
        assert_eq!(totals.coupon_discount_cents, 0);
        assert_eq!(totals.grand_total_cents, 2000);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut draft = OrderDraft::new();
        let product = flat_product("YARD", 1000);
        draft.add_line(&product, None, 1, None, None).unwrap();
        draft.apply_coupon(percent_coupon(1000));

        draft.clear();
        assert!(draft.is_empty());
        assert!(draft.coupon.is_none());
        assert_eq!(draft.totals(Utc::now()).grand_total_cents, 0);
    }
}
