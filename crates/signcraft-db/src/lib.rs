//! # signcraft-db: Database Layer for SignCraft POS
//!
//! SQLite persistence for the SignCraft POS system, built on sqlx.
//!
//! ## Architecture Position
//! ```text
//!   Tauri command (search_products, submit_order, ...)
//!        │
//!        ▼
//!   signcraft-db (THIS CRATE)
//!        Database (pool.rs) · repositories · embedded migrations
//!        │
//!        ▼
//!   SQLite file (WAL mode, FTS5 enabled)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use signcraft_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/signcraft.db")).await?;
//! let products = db.products().search("banner", 20).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::coupon::CouponRepository;
pub use repository::order::OrderRepository;
pub use repository::product::ProductRepository;
