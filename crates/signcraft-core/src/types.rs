//! # Domain Types
//!
//! Core domain types for SignCraft POS.
//!
//! ## Type Hierarchy
//! ```text
//!   Product ──┬── Variant ── VariantOption (Color=Red, Thickness=3mm)
//!             └── discount ramp fields (starts_at / ends_at / max bps)
//!
//!   Coupon                     percentage-of-subtotal or fixed amount
//!
//!   Order ── OrderItem         frozen snapshots of product + pricing quote
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has an immutable UUID v4 `id` used for relations, plus a
//! human-readable business identifier (sku, coupon code, order number).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Discount Rate
// =============================================================================

/// A discount rate in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000. The original stored percentages as
/// floats; bps keep discount math in integers with no representation error.
/// 2500 bps = 25%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// The largest meaningful rate: 100%.
    pub const MAX_BPS: u32 = 10000;

    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a rate from a percentage (catalog entry convenience).
    pub fn from_percentage(pct: f64) -> Self {
        DiscountRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

// =============================================================================
// Pricing Mode
// =============================================================================

/// How a product's price scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    /// Price per discrete unit (stickers, yard signs, business cards).
    Flat,
    /// Price per square foot of printed area (banners, wraps, panels).
    SquareFeet,
}

impl Default for PricingMode {
    fn default() -> Self {
        PricingMode::Flat
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the sign-shop catalog.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Display name shown to staff and on order summaries.
    pub name: String,

    /// Optional description.
    pub description: Option<String>,

    /// Whether the price scales per unit or per square foot.
    pub pricing_mode: PricingMode,

    /// Price in cents, per unit (flat) or per square foot (square_feet).
    pub base_price_cents: i64,

    /// Volume-discount ramp start, in units or square feet.
    pub discount_starts_at: f64,

    /// Volume-discount ramp end, in units or square feet.
    pub discount_ends_at: f64,

    /// Discount reached at the ramp end, in basis points.
    pub max_discount_bps: u32,

    /// Selectable configurations. When one is chosen its price REPLACES
    /// `base_price_cents` (the original system's observed behavior).
    pub variants: Vec<Variant>,

    /// Whether product is active (soft delete).
    pub is_active: bool,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the base price as Money.
    #[inline]
    pub fn base_price(&self) -> Money {
        Money::from_cents(self.base_price_cents)
    }

    /// Checks whether this product requires a variant selection.
    #[inline]
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    /// Looks up a variant by id.
    pub fn variant(&self, variant_id: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }

    /// Resolves the unit price to quote with, enforcing variant selection.
    ///
    /// ## Rules
    /// - Product has variants and one is selected: the variant's price
    ///   (replacement, not addition).
    /// - Product has variants and none is selected: error; the caller must
    ///   block the add-to-order action.
    /// - No variants: the base price.
    pub fn effective_unit_price(&self, variant_id: Option<&str>) -> CoreResult<Money> {
        match variant_id {
            Some(id) => {
                let variant = self.variant(id).ok_or_else(|| CoreError::VariantNotFound {
                    sku: self.sku.clone(),
                    variant_id: id.to_string(),
                })?;
                Ok(variant.price())
            }
            None if self.has_variants() => Err(CoreError::VariantSelectionRequired {
                sku: self.sku.clone(),
            }),
            None => Ok(self.base_price()),
        }
    }
}

// =============================================================================
// Variant
// =============================================================================

/// A specific configuration of a product (e.g. Red / 3mm ACM).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Variant {
    pub id: String,
    pub product_id: String,

    /// Display label, typically the joined option values ("Red / 3mm").
    pub label: String,

    /// Unit price in cents when this variant is selected.
    /// Replaces the product's base price; it is not added on top.
    pub price_cents: i64,

    /// Sort position in the catalog UI.
    pub position: i64,

    /// Name/value pairs describing this configuration.
    pub options: Vec<VariantOption>,
}

impl Variant {
    /// Returns the variant price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// One attribute of a variant (Color=Red).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VariantOption {
    pub name: String,
    pub value: String,
}

// =============================================================================
// Coupon
// =============================================================================

/// How a coupon's `value` field is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CouponKind {
    /// `value` is basis points of the order subtotal.
    Percentage,
    /// `value` is a flat cent amount.
    Fixed,
}

/// A discount code applied at the order level.
///
/// The pricing calculator only ever consumes the flat cent amount this
/// resolves to; all gating (expiry, minimum subtotal, active flag) happens
/// here so the arithmetic stays a plain subtraction.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Coupon {
    pub id: String,
    pub code: String,
    pub kind: CouponKind,

    /// Basis points (percentage) or cents (fixed), per `kind`.
    pub value: i64,

    /// Order subtotal required before the coupon applies.
    pub min_subtotal_cents: Option<i64>,

    #[ts(as = "Option<String>")]
    pub expires_at: Option<DateTime<Utc>>,

    pub is_active: bool,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Coupon {
    /// Resolves the flat discount amount for a given subtotal.
    ///
    /// `now` is passed in rather than read from the clock so the function
    /// stays pure.
    pub fn discount_for(&self, subtotal: Money, now: DateTime<Utc>) -> CoreResult<Money> {
        if !self.is_active {
            return Err(self.not_applicable("coupon is disabled"));
        }

        if let Some(expires_at) = self.expires_at {
            if now > expires_at {
                return Err(self.not_applicable("coupon has expired"));
            }
        }

        if let Some(min) = self.min_subtotal_cents {
            if subtotal.cents() < min {
                return Err(self.not_applicable(format!(
                    "order subtotal is below the {} minimum",
                    Money::from_cents(min)
                )));
            }
        }

        let discount = match self.kind {
            CouponKind::Percentage => {
                // A rate above 100% can only make the order free, never negative;
                // the order-level floor still applies downstream.
                let bps = (self.value.max(0) as u32).min(DiscountRate::MAX_BPS);
                subtotal.percentage_of(bps)
            }
            CouponKind::Fixed => Money::from_cents(self.value.max(0)),
        };

        Ok(discount)
    }

    fn not_applicable(&self, reason: impl Into<String>) -> CoreError {
        CoreError::CouponNotApplicable {
            code: self.code.clone(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order is being built.
    Draft,
    /// Order has been submitted and finalized.
    Completed,
    /// Order was cancelled.
    Voided,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Draft
    }
}

// =============================================================================
// Order
// =============================================================================

/// A submitted (or in-progress) customer order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub status: OrderStatus,
    pub subtotal_cents: i64,
    pub coupon_code: Option<String>,
    pub coupon_discount_cents: i64,
    /// Grand total: `max(subtotal - coupon discount, 0)`.
    pub total_cents: i64,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub completed_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item on a submitted order.
///
/// Snapshot pattern: product identity, the effective unit price, and the
/// full pricing quote are frozen at submit time so history survives later
/// catalog edits.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    /// SKU at time of submit (frozen).
    pub sku_snapshot: String,
    /// Product name at time of submit (frozen).
    pub name_snapshot: String,
    /// Selected variant label, if any (frozen).
    pub variant_label: Option<String>,
    pub pricing_mode: PricingMode,
    /// Effective unit price in cents at time of submit (frozen).
    pub unit_price_cents: i64,
    pub quantity: i64,
    /// Width in inches; square-feet items only.
    pub width_in: Option<f64>,
    /// Height in inches; square-feet items only.
    pub height_in: Option<f64>,
    /// Line price before the volume discount.
    pub gross_cents: i64,
    /// Volume-discount rate applied, in basis points.
    pub discount_bps: u32,
    pub discount_cents: i64,
    /// `gross_cents - discount_cents`.
    pub line_total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl OrderItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn test_coupon(kind: CouponKind, value: i64) -> Coupon {
        Coupon {
            id: "c1".to_string(),
            code: "SPRING20".to_string(),
            kind,
            value,
            min_subtotal_cents: None,
            expires_at: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_discount_rate_conversions() {
        let rate = DiscountRate::from_bps(2500);
        assert_eq!(rate.bps(), 2500);
        assert!((rate.percentage() - 25.0).abs() < 0.001);

        assert_eq!(DiscountRate::from_percentage(12.5).bps(), 1250);
    }

    #[test]
    fn test_effective_unit_price_no_variants() {
        let product = crate::pricing::tests::test_product(PricingMode::Flat, 1000);
        assert_eq!(product.effective_unit_price(None).unwrap().cents(), 1000);
    }

    #[test]
    fn test_effective_unit_price_variant_replaces_base() {
        let mut product = crate::pricing::tests::test_product(PricingMode::Flat, 1000);
        product.variants.push(Variant {
            id: "v1".to_string(),
            product_id: product.id.clone(),
            label: "Reflective".to_string(),
            price_cents: 1800,
            position: 0,
            options: vec![VariantOption {
                name: "Finish".to_string(),
                value: "Reflective".to_string(),
            }],
        });

        // Selected variant: its price replaces (not augments) the base price
        let price = product.effective_unit_price(Some("v1")).unwrap();
        assert_eq!(price.cents(), 1800);

        // Variants exist but none selected: blocked
        assert!(matches!(
            product.effective_unit_price(None),
            Err(CoreError::VariantSelectionRequired { .. })
        ));

        // Unknown variant id
        assert!(matches!(
            product.effective_unit_price(Some("nope")),
            Err(CoreError::VariantNotFound { .. })
        ));
    }

    #[test]
    fn test_coupon_percentage() {
        let coupon = test_coupon(CouponKind::Percentage, 2000); // 20%
        let discount = coupon
            .discount_for(Money::from_cents(10000), Utc::now())
            .unwrap();
        assert_eq!(discount.cents(), 2000);
    }

    #[test]
    fn test_coupon_fixed() {
        let coupon = test_coupon(CouponKind::Fixed, 1500);
        let discount = coupon
            .discount_for(Money::from_cents(10000), Utc::now())
            .unwrap();
        assert_eq!(discount.cents(), 1500);
    }

    #[test]
    fn test_coupon_expired() {
        let mut coupon = test_coupon(CouponKind::Fixed, 1500);
        coupon.expires_at = Some(Utc::now() - Duration::days(1));
        assert!(matches!(
            coupon.discount_for(Money::from_cents(10000), Utc::now()),
            Err(CoreError::CouponNotApplicable { .. })
        ));
    }

    #[test]
    fn test_coupon_min_subtotal() {
        let mut coupon = test_coupon(CouponKind::Fixed, 1500);
        coupon.min_subtotal_cents = Some(5000);

        assert!(coupon
            .discount_for(Money::from_cents(5000), Utc::now())
            .is_ok());
        assert!(coupon
            .discount_for(Money::from_cents(4999), Utc::now())
            .is_err());
    }

    #[test]
    fn test_coupon_percentage_clamped_at_full() {
        let coupon = test_coupon(CouponKind::Percentage, 15000); // "150%"
        let discount = coupon
            .discount_for(Money::from_cents(10000), Utc::now())
            .unwrap();
        assert_eq!(discount.cents(), 10000);
    }

    #[test]
    fn test_order_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Draft);
    }
}
