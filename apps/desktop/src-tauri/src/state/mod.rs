//! # State Module
//!
//! Application state for the Tauri desktop app.
//!
//! Instead of one big AppState, each concern gets its own managed state
//! type: commands declare exactly what they need, independent states don't
//! contend on one lock, and each can be tested in isolation.
//!
//! - [`DbState`] - database handle (pool is internally thread-safe)
//! - [`DraftState`] - the order being built (`Arc<Mutex<OrderDraft>>`)
//! - [`ConfigState`] - read-only configuration

mod config;
mod db;
mod draft;

pub use config::ConfigState;
pub use db::DbState;
pub use draft::{DraftLine, DraftState, OrderDraft};
