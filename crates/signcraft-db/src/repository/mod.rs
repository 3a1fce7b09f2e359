//! # Repository Module
//!
//! Repository implementations for SignCraft POS. Each aggregate gets one
//! repository with a clean async API; SQL never leaks past this module.
//!
//! - [`ProductRepository`](product::ProductRepository) - catalog CRUD and
//!   FTS5 search, with variant hydration
//! - [`CouponRepository`](coupon::CouponRepository) - coupon storage
//! - [`OrderRepository`](order::OrderRepository) - order + item snapshots

pub mod coupon;
pub mod order;
pub mod product;
