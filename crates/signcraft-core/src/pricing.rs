//! # Pricing Calculator
//!
//! The pricing core of SignCraft POS: given a product's pricing
//! configuration, a chosen variant, a quantity or dimensions, and an
//! optional coupon discount, produce a per-line quote and an order-level
//! total.
//!
//! ## Calculation Flow
//! ```text
//!   Product config ──► effective unit price (variant replaces base)
//!         │
//!         ▼
//!   quote_flat / quote_square_feet
//!         │         gross = qty × price        (flat)
//!         │         gross = round(area × price) × qty   (square-feet)
//!         │         rate  = ramp.rate_at(M)    M = qty or area
//!         │         net   = gross − gross × rate
//!         ▼
//!   order_totals:   subtotal = Σ net
//!                   grand    = max(subtotal − coupon, 0)
//! ```
//!
//! ## Guarantees
//! - Deterministic and pure: no I/O, no clock, no hidden state.
//! - Money never touches floating point except the single rounding where a
//!   fractional area meets a cent price; discount shares use integer bps.
//! - Line nets cannot go negative (rate is clamped to at most 100%); the
//!   only clamp that can engage is the order-level zero floor.
//! - Invalid input is rejected with a typed error, never priced as zero.
//!
//! The quantity multiplier for square-feet items is applied exactly once,
//! inside the quote. Callers consume `LineQuote` values and must not
//! multiply again.

use serde::Serialize;
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::DiscountRate;
use crate::validation::{validate_dimension_inches, validate_quantity, validate_unit_price};

/// Square inches per square foot; dimensions are entered in inches.
pub const SQUARE_INCHES_PER_SQUARE_FOOT: f64 = 144.0;

// =============================================================================
// Dimensions
// =============================================================================

/// Validated physical dimensions of a square-feet-priced item.
///
/// Construction is the validation boundary: width and height must be finite,
/// strictly positive, and within what the shop can produce. A `Dimensions`
/// value therefore always has a positive area, which is why the quote
/// functions can take it by value without re-checking.
///
/// Deliberately not `Deserialize`: the command layer receives raw numbers
/// and must come through [`Dimensions::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    width_in: f64,
    height_in: f64,
}

impl Dimensions {
    /// Creates validated dimensions from inch measurements.
    ///
    /// ```rust
    /// use signcraft_core::pricing::Dimensions;
    ///
    /// let dims = Dimensions::new(24.0, 36.0).unwrap();
    /// assert!((dims.area_sq_ft() - 6.0).abs() < 1e-9);
    ///
    /// assert!(Dimensions::new(0.0, 36.0).is_err());
    /// assert!(Dimensions::new(f64::NAN, 36.0).is_err());
    /// ```
    pub fn new(width_in: f64, height_in: f64) -> Result<Self, ValidationError> {
        validate_dimension_inches("widthIn", width_in)?;
        validate_dimension_inches("heightIn", height_in)?;
        Ok(Dimensions {
            width_in,
            height_in,
        })
    }

    /// Width in inches.
    #[inline]
    pub fn width_in(&self) -> f64 {
        self.width_in
    }

    /// Height in inches.
    #[inline]
    pub fn height_in(&self) -> f64 {
        self.height_in
    }

    /// Area in square feet: `(width / 12) × (height / 12)`.
    #[inline]
    pub fn area_sq_ft(&self) -> f64 {
        self.width_in * self.height_in / SQUARE_INCHES_PER_SQUARE_FOOT
    }
}

// =============================================================================
// Discount Ramp
// =============================================================================

/// A volume discount that ramps linearly from 0% up to `max_rate`.
///
/// The ramp is measured in the product's scaling magnitude: unit count for
/// flat products, square feet of a single piece for area products.
///
/// ```text
///   rate
///    │                 ┌────────── max_rate
///    │               ╱
///    │             ╱
///    0 ──────────┘
///               starts_at   ends_at      magnitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRamp {
    pub starts_at: f64,
    pub ends_at: f64,
    pub max_rate: DiscountRate,
}

impl DiscountRamp {
    /// Creates a validated ramp.
    ///
    /// ## Rules
    /// - Both thresholds finite and non-negative
    /// - `ends_at >= starts_at`
    /// - `max_rate` at most 100%
    pub fn new(
        starts_at: f64,
        ends_at: f64,
        max_rate: DiscountRate,
    ) -> Result<Self, ValidationError> {
        for (field, value) in [("discountStartsAt", starts_at), ("discountEndsAt", ends_at)] {
            if !value.is_finite() {
                return Err(ValidationError::NotFinite {
                    field: field.to_string(),
                });
            }
            if value < 0.0 {
                return Err(ValidationError::MustBePositive {
                    field: field.to_string(),
                });
            }
        }

        if ends_at < starts_at {
            return Err(ValidationError::InvalidRamp { starts_at, ends_at });
        }

        if max_rate.bps() > DiscountRate::MAX_BPS {
            return Err(ValidationError::OutOfRange {
                field: "maxDiscountBps".to_string(),
                min: 0,
                max: DiscountRate::MAX_BPS as i64,
            });
        }

        Ok(DiscountRamp {
            starts_at,
            ends_at,
            max_rate,
        })
    }

    /// A ramp that never discounts.
    pub const fn none() -> Self {
        DiscountRamp {
            starts_at: 0.0,
            ends_at: 0.0,
            max_rate: DiscountRate::zero(),
        }
    }

    /// The rate applied at a given magnitude.
    ///
    /// ## Cases
    /// - Below `starts_at`: zero.
    /// - At or beyond `ends_at`: full `max_rate`. This also covers the
    ///   degenerate `starts_at == ends_at` ramp, which grants the full rate
    ///   the moment the threshold is reached.
    /// - In between: linear interpolation, rounded to whole basis points.
    pub fn rate_at(&self, magnitude: f64) -> DiscountRate {
        if self.max_rate.is_zero() || magnitude < self.starts_at {
            return DiscountRate::zero();
        }

        if magnitude >= self.ends_at {
            return self.max_rate;
        }

        // starts_at <= magnitude < ends_at, and ends_at > starts_at here
        let fraction = (magnitude - self.starts_at) / (self.ends_at - self.starts_at);
        DiscountRate::from_bps((self.max_rate.bps() as f64 * fraction).round() as u32)
    }
}

impl Default for DiscountRamp {
    fn default() -> Self {
        DiscountRamp::none()
    }
}

// =============================================================================
// Line Quote
// =============================================================================

/// The priced result for one line item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineQuote {
    /// The scaling magnitude the ramp was evaluated at: unit count for flat
    /// items, piece area in square feet for square-feet items.
    pub magnitude: f64,

    /// Line price in cents before the volume discount.
    pub gross_cents: i64,

    /// Volume-discount rate applied, in basis points.
    pub discount_bps: u32,

    /// Discount amount in cents.
    pub discount_cents: i64,

    /// `gross_cents - discount_cents`. Never negative.
    pub net_cents: i64,
}

impl LineQuote {
    /// Returns the net line total as Money.
    #[inline]
    pub fn net(&self) -> Money {
        Money::from_cents(self.net_cents)
    }

    fn from_gross(magnitude: f64, gross: Money, rate: DiscountRate) -> Self {
        let discount = gross.discount_at(rate);
        LineQuote {
            magnitude,
            gross_cents: gross.cents(),
            discount_bps: rate.bps(),
            discount_cents: discount.cents(),
            net_cents: (gross - discount).cents(),
        }
    }
}

// =============================================================================
// Quote Functions
// =============================================================================

/// Quotes a flat-priced line: `gross = unit_price × quantity`, ramp
/// evaluated at the quantity.
///
/// ```rust
/// use signcraft_core::money::Money;
/// use signcraft_core::pricing::{quote_flat, DiscountRamp};
///
/// let quote = quote_flat(Money::from_cents(1000), 5, &DiscountRamp::none()).unwrap();
/// assert_eq!(quote.gross_cents, 5000);
/// assert_eq!(quote.net_cents, 5000);
/// ```
pub fn quote_flat(unit_price: Money, quantity: i64, ramp: &DiscountRamp) -> CoreResult<LineQuote> {
    validate_quantity(quantity)?;
    validate_unit_price(unit_price)?;

    let gross = unit_price.multiply_quantity(quantity);
    let rate = ramp.rate_at(quantity as f64);
    Ok(LineQuote::from_gross(quantity as f64, gross, rate))
}

/// Quotes a square-feet-priced line.
///
/// The per-piece price is `area × unit_price`, rounded once to whole cents,
/// then multiplied by the quantity. The ramp is evaluated at the piece area
/// alone; ordering ten small banners does not move a banner up the area
/// ramp.
///
/// ```rust
/// use signcraft_core::money::Money;
/// use signcraft_core::pricing::{quote_square_feet, Dimensions, DiscountRamp};
///
/// // 24in × 36in = 6 sq ft at $20/sq ft, quantity 2 => $240.00
/// let dims = Dimensions::new(24.0, 36.0).unwrap();
/// let quote =
///     quote_square_feet(Money::from_cents(2000), dims, 2, &DiscountRamp::none()).unwrap();
/// assert_eq!(quote.gross_cents, 24000);
/// ```
pub fn quote_square_feet(
    unit_price: Money,
    dimensions: Dimensions,
    quantity: i64,
    ramp: &DiscountRamp,
) -> CoreResult<LineQuote> {
    validate_quantity(quantity)?;
    validate_unit_price(unit_price)?;

    let area = dimensions.area_sq_ft();
    // The only place fractional geometry meets integer money: one rounding
    // per piece, before the quantity multiplier.
    let per_piece = Money::from_cents((area * unit_price.cents() as f64).round() as i64);
    let gross = per_piece.multiply_quantity(quantity);
    let rate = ramp.rate_at(area);
    Ok(LineQuote::from_gross(area, gross, rate))
}

// =============================================================================
// Order Totals
// =============================================================================

/// Order-level totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    /// Sum of line-item net totals.
    pub subtotal_cents: i64,

    /// Flat coupon discount the order carries.
    pub coupon_discount_cents: i64,

    /// `max(subtotal - coupon discount, 0)`.
    pub grand_total_cents: i64,
}

/// Sums line totals and applies the coupon discount with a zero floor.
///
/// ```rust
/// use signcraft_core::money::Money;
/// use signcraft_core::pricing::order_totals;
///
/// let totals = order_totals([6000, 4000], Money::from_cents(15000));
/// assert_eq!(totals.grand_total_cents, 0); // floored, never negative
/// ```
pub fn order_totals<I>(line_total_cents: I, coupon_discount: Money) -> OrderTotals
where
    I: IntoIterator<Item = i64>,
{
    let subtotal: Money = line_total_cents.into_iter().map(Money::from_cents).sum();
    OrderTotals {
        subtotal_cents: subtotal.cents(),
        coupon_discount_cents: coupon_discount.cents(),
        grand_total_cents: subtotal.sub_floor_zero(coupon_discount).cents(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::types::{PricingMode, Product};
    use chrono::Utc;

    pub(crate) fn test_product(pricing_mode: PricingMode, base_price_cents: i64) -> Product {
        Product {
            id: "p1".to_string(),
            sku: "TEST-1".to_string(),
            name: "Test Product".to_string(),
            description: None,
            pricing_mode,
            base_price_cents,
            discount_starts_at: 0.0,
            discount_ends_at: 0.0,
            max_discount_bps: 0,
            variants: Vec::new(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn ramp(starts_at: f64, ends_at: f64, max_bps: u32) -> DiscountRamp {
        DiscountRamp::new(starts_at, ends_at, DiscountRate::from_bps(max_bps)).unwrap()
    }

    #[test]
    fn test_flat_no_discount_configured() {
        // qty 5 × $10.00, no ramp => $50.00, no discount
        let quote = quote_flat(Money::from_cents(1000), 5, &DiscountRamp::none()).unwrap();
        assert_eq!(quote.gross_cents, 5000);
        assert_eq!(quote.discount_bps, 0);
        assert_eq!(quote.discount_cents, 0);
        assert_eq!(quote.net_cents, 5000);
    }

    #[test]
    fn test_square_feet_area_and_quantity() {
        // 24in × 36in = 6 sq ft; $20/sq ft × 2 pieces => $240.00
        let dims = Dimensions::new(24.0, 36.0).unwrap();
        let quote =
            quote_square_feet(Money::from_cents(2000), dims, 2, &DiscountRamp::none()).unwrap();
        assert!((quote.magnitude - 6.0).abs() < 1e-9);
        assert_eq!(quote.gross_cents, 24000);
        assert_eq!(quote.net_cents, 24000);
    }

    #[test]
    fn test_square_feet_fractional_area_rounds_once_per_piece() {
        // 18in × 10in = 1.25 sq ft at $3.33/sq ft => 416.25 -> 416 cents/piece
        let dims = Dimensions::new(18.0, 10.0).unwrap();
        let quote =
            quote_square_feet(Money::from_cents(333), dims, 3, &DiscountRamp::none()).unwrap();
        assert_eq!(quote.gross_cents, 416 * 3);
    }

    #[test]
    fn test_ramp_midpoint_interpolation() {
        // ramp 10 -> 20 at max 50%; M = 15 => 25%
        let r = ramp(10.0, 20.0, 5000);
        assert_eq!(r.rate_at(15.0).bps(), 2500);

        let quote = quote_flat(Money::from_cents(1000), 15, &r).unwrap();
        assert_eq!(quote.discount_bps, 2500);
        assert_eq!(quote.gross_cents, 15000);
        assert_eq!(quote.discount_cents, 3750);
        assert_eq!(quote.net_cents, 11250);
    }

    #[test]
    fn test_ramp_below_threshold() {
        let r = ramp(10.0, 20.0, 5000);
        assert_eq!(r.rate_at(5.0).bps(), 0);
        assert_eq!(r.rate_at(9.999).bps(), 0);
    }

    #[test]
    fn test_ramp_at_and_beyond_end() {
        let r = ramp(10.0, 20.0, 5000);
        assert_eq!(r.rate_at(20.0).bps(), 5000);
        assert_eq!(r.rate_at(25.0).bps(), 5000);
        assert_eq!(r.rate_at(1e6).bps(), 5000);
    }

    #[test]
    fn test_ramp_at_start() {
        let r = ramp(10.0, 20.0, 5000);
        assert_eq!(r.rate_at(10.0).bps(), 0);
    }

    #[test]
    fn test_degenerate_ramp_grants_full_rate_at_threshold() {
        // starts_at == ends_at: full discount once the threshold is reached
        let r = ramp(10.0, 10.0, 3000);
        assert_eq!(r.rate_at(9.9).bps(), 0);
        assert_eq!(r.rate_at(10.0).bps(), 3000);
        assert_eq!(r.rate_at(50.0).bps(), 3000);
    }

    #[test]
    fn test_square_feet_ramp_uses_area_not_quantity() {
        // 4 sq ft piece, ramp starts at 10 sq ft: quantity 20 must not
        // trigger the discount, only piece area counts
        let dims = Dimensions::new(24.0, 24.0).unwrap();
        let r = ramp(10.0, 20.0, 5000);
        let quote = quote_square_feet(Money::from_cents(2000), dims, 20, &r).unwrap();
        assert_eq!(quote.discount_bps, 0);
    }

    #[test]
    fn test_order_totals_coupon_floor() {
        // subtotal $100, coupon $150 => grand total floored at $0
        let totals = order_totals([10000], Money::from_cents(15000));
        assert_eq!(totals.subtotal_cents, 10000);
        assert_eq!(totals.coupon_discount_cents, 15000);
        assert_eq!(totals.grand_total_cents, 0);
    }

    #[test]
    fn test_order_totals_sums_lines() {
        let totals = order_totals([6000, 4000, 500], Money::from_cents(1000));
        assert_eq!(totals.subtotal_cents, 10500);
        assert_eq!(totals.grand_total_cents, 9500);
    }

    #[test]
    fn test_quote_is_deterministic() {
        let r = ramp(5.0, 50.0, 4000);
        let a = quote_flat(Money::from_cents(1234), 17, &r).unwrap();
        let b = quote_flat(Money::from_cents(1234), 17, &r).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        // Zero, negative, and non-finite measurements are typed errors,
        // never silently priced as zero
        assert!(Dimensions::new(0.0, 36.0).is_err());
        assert!(Dimensions::new(24.0, -1.0).is_err());
        assert!(Dimensions::new(f64::NAN, 36.0).is_err());
        assert!(Dimensions::new(24.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_invalid_quantity_rejected() {
        let err = quote_flat(Money::from_cents(1000), 0, &DiscountRamp::none());
        assert!(matches!(err, Err(CoreError::Validation(_))));

        let err = quote_flat(Money::from_cents(1000), -3, &DiscountRamp::none());
        assert!(matches!(err, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_negative_unit_price_rejected() {
        let err = quote_flat(Money::from_cents(-100), 1, &DiscountRamp::none());
        assert!(matches!(err, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_invalid_ramp_rejected() {
        assert!(DiscountRamp::new(20.0, 10.0, DiscountRate::from_bps(5000)).is_err());
        assert!(DiscountRamp::new(-1.0, 10.0, DiscountRate::from_bps(5000)).is_err());
        assert!(DiscountRamp::new(0.0, 10.0, DiscountRate::from_bps(10001)).is_err());
        assert!(DiscountRamp::new(f64::NAN, 10.0, DiscountRate::from_bps(100)).is_err());
    }

    #[test]
    fn test_full_ramp_never_exceeds_gross() {
        // 100% max rate: net reaches exactly zero, never negative
        let r = ramp(0.0, 0.0, 10000);
        let quote = quote_flat(Money::from_cents(999), 7, &r).unwrap();
        assert_eq!(quote.discount_cents, quote.gross_cents);
        assert_eq!(quote.net_cents, 0);
    }
}
