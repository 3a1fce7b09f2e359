//! # Validation Module
//!
//! Input validation for SignCraft POS.
//!
//! ## Validation Strategy
//! The original admin panel coerced every numeric field with
//! `Number(x) || 0` and priced whatever came out. Here validation is a
//! typed, explicit step: each rule returns a tagged [`ValidationError`] the
//! UI can surface, and the pricing functions refuse unvalidated input
//! rather than computing with zeros.
//!
//! Layers:
//! 1. Frontend: immediate format feedback (out of scope here)
//! 2. Command boundary + core constructors: THIS MODULE
//! 3. Database: NOT NULL / UNIQUE / CHECK constraints
//!
//! ## Usage
//! ```rust
//! use signcraft_core::validation::{validate_quantity, validate_sku};
//!
//! validate_sku("BAN-VINYL-13OZ").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_DIMENSION_INCHES, MAX_ITEM_QUANTITY, MAX_ORDER_ITEMS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Alphanumeric, hyphens, and underscores only
///
/// ```rust
/// use signcraft_core::validation::validate_sku;
///
/// assert!(validate_sku("BAN-VINYL-13OZ").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("has space").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: 50,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a coupon code.
///
/// ## Rules
/// - Must not be empty
/// - At most 40 characters
/// - Uppercase letters, digits, and hyphens (codes are normalized to
///   uppercase before lookup)
///
/// ## Returns
/// The trimmed, uppercased code.
pub fn validate_coupon_code(code: &str) -> ValidationResult<String> {
    let code = code.trim().to_uppercase();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "couponCode".to_string(),
        });
    }

    if code.len() > 40 {
        return Err(ValidationError::TooLong {
            field: "couponCode".to_string(),
            max: 40,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "couponCode".to_string(),
            reason: "must contain only letters, numbers, and hyphens".to_string(),
        });
    }

    Ok(code)
}

/// Validates a search query.
///
/// Can be empty (the catalog then lists active products); capped at 100
/// characters. Returns the trimmed query.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an item quantity.
///
/// ## Rules
/// - Strictly positive
/// - At most `MAX_ITEM_QUANTITY`
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Non-negative (zero is allowed: comped items)
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "unitPrice".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a single dimension measurement in inches.
///
/// ## Rules
/// - Finite (NaN/infinity are rejected, not coerced)
/// - Strictly positive (a zero-area piece cannot be priced)
/// - At most `MAX_DIMENSION_INCHES`
pub fn validate_dimension_inches(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if value <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    if value > MAX_DIMENSION_INCHES {
        return Err(ValidationError::DimensionTooLarge {
            field: field.to_string(),
            max_in: MAX_DIMENSION_INCHES,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates draft size (number of line items) before adding another.
pub fn validate_draft_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_ORDER_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "line items".to_string(),
            min: 0,
            max: MAX_ORDER_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string.
///
/// ```rust
/// use signcraft_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("BAN-VINYL-13OZ").is_ok());
        assert!(validate_sku("ACM123").is_ok());
        assert!(validate_sku("decal_matte").is_ok());

        assert!(validate_sku("").is_err());
        assert!(validate_sku("   ").is_err());
        assert!(validate_sku("has space").is_err());
        assert!(validate_sku(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("13oz Vinyl Banner").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_coupon_code_normalizes() {
        assert_eq!(validate_coupon_code(" spring20 ").unwrap(), "SPRING20");
        assert!(validate_coupon_code("").is_err());
        assert!(validate_coupon_code("BAD CODE").is_err());
        assert!(validate_coupon_code(&"X".repeat(50)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Money::from_cents(0)).is_ok());
        assert!(validate_unit_price(Money::from_cents(1099)).is_ok());
        assert!(validate_unit_price(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_validate_dimension_inches() {
        assert!(validate_dimension_inches("widthIn", 24.0).is_ok());
        assert!(validate_dimension_inches("widthIn", 0.5).is_ok());

        assert!(validate_dimension_inches("widthIn", 0.0).is_err());
        assert!(validate_dimension_inches("widthIn", -3.0).is_err());
        assert!(validate_dimension_inches("widthIn", f64::NAN).is_err());
        assert!(validate_dimension_inches("widthIn", 5000.0).is_err());
    }

    #[test]
    fn test_validate_draft_size() {
        assert!(validate_draft_size(0).is_ok());
        assert!(validate_draft_size(MAX_ORDER_ITEMS - 1).is_ok());
        assert!(validate_draft_size(MAX_ORDER_ITEMS).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
    }
}
