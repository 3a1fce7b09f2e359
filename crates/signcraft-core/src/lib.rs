//! # signcraft-core: Pure Business Logic for SignCraft POS
//!
//! The heart of SignCraft POS: all pricing math and business rules for a
//! sign/printing shop, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//!   React frontend  ──►  Tauri commands (apps/desktop)
//!                              │
//!                              ▼
//!                  ★ signcraft-core (THIS CRATE) ★
//!          types · money · pricing · validation · error
//!          NO I/O · NO DATABASE · NO NETWORK · PURE FUNCTIONS
//!                              │
//!                              ▼
//!                  signcraft-db (SQLite repositories)
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Variant, Coupon, Order, ...)
//! - [`money`] - Integer-cent Money type (no floating point!)
//! - [`pricing`] - The line-quote and order-total calculator
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: same input, same output; the clock is an argument
//! 2. **No I/O**: database, network, and file system access are forbidden
//! 3. **Integer money**: all monetary values are cents (i64); discount rates
//!    are basis points
//! 4. **Explicit errors**: typed errors, never strings or panics
//!
//! ## Example
//!
//! ```rust
//! use signcraft_core::money::Money;
//! use signcraft_core::pricing::{quote_square_feet, Dimensions, DiscountRamp};
//! use signcraft_core::types::DiscountRate;
//!
//! // A 2ft × 3ft banner at $20/sq ft, two copies.
//! let dims = Dimensions::new(24.0, 36.0)?;
//! let ramp = DiscountRamp::new(10.0, 20.0, DiscountRate::from_bps(5000))?;
//! let quote = quote_square_feet(Money::from_cents(2000), dims, 2, &ramp)?;
//!
//! assert_eq!(quote.gross_cents, 24000); // 6 sq ft × $20 × 2
//! assert_eq!(quote.discount_bps, 0);    // 6 sq ft is below the ramp start
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{DiscountRamp, Dimensions, LineQuote, OrderTotals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single order draft.
///
/// Keeps drafts at a size one job ticket can reasonably carry; large
/// commercial runs go through quoting, not the POS.
pub const MAX_ORDER_ITEMS: usize = 100;

/// Maximum quantity of a single line item.
///
/// Guards against fat-finger entries (1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Largest dimension the shop can produce, in inches (100 ft of media).
pub const MAX_DIMENSION_INCHES: f64 = 1200.0;
