//! # Database State
//!
//! Wraps the `Database` connection for use in Tauri commands. The inner
//! `SqlitePool` is thread-safe, so commands can run queries concurrently
//! without extra locking.

use signcraft_db::Database;

/// Wrapper around `Database` for Tauri state management.
#[derive(Debug)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
