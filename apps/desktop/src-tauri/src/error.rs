//! # API Error Type
//!
//! Unified error type for Tauri commands.
//!
//! Tauri requires command errors to be serializable; this type carries a
//! machine-readable `code` for programmatic handling in the frontend plus a
//! human-readable `message` for display:
//!
//! ```json
//! { "code": "COUPON_ERROR", "message": "Coupon SPRING20 cannot be applied: ..." }
//! ```

use serde::Serialize;
use signcraft_core::CoreError;
use signcraft_db::DbError;

/// API error returned from Tauri commands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Database operation failed
    DatabaseError,

    /// Business rule violated
    BusinessLogic,

    /// Internal error
    Internal,

    /// Order draft operation failed
    DraftError,

    /// Coupon lookup or application failed
    CouponError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates a draft error.
    pub fn draft(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::DraftError, message)
    }

    /// Creates a coupon error.
    pub fn coupon(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CouponError, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field } => ApiError::new(
                ErrorCode::ValidationError,
                format!("Duplicate value for {}", field),
            ),
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ApiError::new(ErrorCode::ValidationError, "Invalid reference")
            }
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the real error, return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::VariantNotFound { sku, variant_id } => ApiError::new(
                ErrorCode::NotFound,
                format!("Variant {} not found on product {}", variant_id, sku),
            ),
            CoreError::VariantSelectionRequired { sku } => ApiError::new(
                ErrorCode::BusinessLogic,
                format!("Please select a variant for {}", sku),
            ),
            CoreError::DimensionsRequired { sku } => ApiError::new(
                ErrorCode::BusinessLogic,
                format!("{} is priced by area; enter width and height", sku),
            ),
            CoreError::DraftTooLarge { max } => ApiError::new(
                ErrorCode::DraftError,
                format!("Order cannot have more than {} line items", max),
            ),
            CoreError::QuantityTooLarge { requested, max } => ApiError::new(
                ErrorCode::ValidationError,
                format!("Quantity {} exceeds maximum allowed ({})", requested, max),
            ),
            CoreError::CouponNotApplicable { code, reason } => ApiError::new(
                ErrorCode::CouponError,
                format!("Coupon {} cannot be applied: {}", code, reason),
            ),
            CoreError::LineItemNotFound(id) => ApiError::not_found("Line item", &id),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
