//! # Tauri Commands Module
//!
//! All commands exposed to the React frontend.
//!
//! ## How Commands Work
//! The frontend calls `invoke('command_name', { params })`; Tauri
//! deserializes the params, injects the managed state each command
//! declares, and serializes the `Result` back to JS. Errors arrive as
//! `{ code, message }` objects (see [`crate::error::ApiError`]).
//!
//! ## Organization
//! - [`catalog`] - product search and retrieval
//! - [`draft`] - building the in-memory order draft, line price preview
//! - [`coupon`] - applying/removing a coupon on the draft
//! - [`checkout`] - submitting the draft, order history

pub mod catalog;
pub mod checkout;
pub mod coupon;
pub mod draft;
