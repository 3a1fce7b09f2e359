//! # Error Types
//!
//! Domain-specific error types for signcraft-core.
//!
//! Errors flow upward through the layers:
//! `ValidationError` → `CoreError` → `DbError` (signcraft-db) → `ApiError`
//! (desktop app, serialized for the frontend).
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impls)
//! 2. Include context in error messages (SKU, code, field name)
//! 3. Errors are enum variants, never bare strings

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations and domain logic failures.
///
/// These should be caught at the command boundary and translated into
/// user-facing messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found (bad id, or soft-deleted).
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A variant id was given that does not belong to the product.
    #[error("Variant {variant_id} not found on product {sku}")]
    VariantNotFound { sku: String, variant_id: String },

    /// The product has variants but none was selected.
    ///
    /// Surfaced as a blocking dialog at the "add to order" boundary; the
    /// pricing functions themselves never see an unresolved variant.
    #[error("Product {sku} requires a variant selection")]
    VariantSelectionRequired { sku: String },

    /// A square-feet product was added without width/height.
    #[error("Product {sku} is priced by area and requires dimensions")]
    DimensionsRequired { sku: String },

    /// Order draft has reached the maximum number of line items.
    #[error("Order cannot have more than {max} line items")]
    DraftTooLarge { max: usize },

    /// Item quantity exceeds the maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Coupon exists but cannot be applied to this order.
    #[error("Coupon {code} cannot be applied: {reason}")]
    CouponNotApplicable { code: String, reason: String },

    /// Line item not present in the draft.
    #[error("Line item not found: {0}")]
    LineItemNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation failures.
///
/// The original system coerced bad numeric input to zero and priced it
/// silently. Here every rejected input carries a tagged reason so the UI can
/// surface the problem instead of computing with garbage.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// A measurement is NaN or infinite.
    #[error("{field} is not a finite number")]
    NotFinite { field: String },

    /// A dimension exceeds what the shop can produce.
    #[error("{field} cannot exceed {max_in} inches")]
    DimensionTooLarge { field: String, max_in: f64 },

    /// Invalid format (bad UUID, bad coupon code, etc.).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A discount ramp whose end precedes its start.
    #[error("discount ramp end ({ends_at}) must not precede start ({starts_at})")]
    InvalidRamp { starts_at: f64, ends_at: f64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::VariantSelectionRequired {
            sku: "BAN-VINYL".to_string(),
        };
        assert_eq!(err.to_string(), "Product BAN-VINYL requires a variant selection");

        let err = CoreError::QuantityTooLarge {
            requested: 1500,
            max: 999,
        };
        assert_eq!(
            err.to_string(),
            "Quantity 1500 exceeds maximum allowed (999)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "sku".to_string(),
        };
        assert_eq!(err.to_string(), "sku is required");

        let err = ValidationError::NotFinite {
            field: "widthIn".to_string(),
        };
        assert_eq!(err.to_string(), "widthIn is not a finite number");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
