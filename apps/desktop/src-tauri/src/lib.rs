//! # SignCraft Desktop Library
//!
//! Entry point for the SignCraft POS desktop application: configures
//! logging, opens the database, registers state and commands, and runs
//! Tauri.
//!
//! ## Module Organization
//! ```text
//! signcraft_desktop_lib/
//! ├── lib.rs          Tauri setup & run
//! ├── state/          DbState, DraftState, ConfigState
//! ├── commands/       catalog, draft, coupon, checkout
//! └── error.rs        ApiError for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use directories::ProjectDirs;
use std::path::PathBuf;
use tauri::Manager;
use tracing::info;
use tracing_subscriber::EnvFilter;

use state::{ConfigState, DbState, DraftState};
use signcraft_db::{Database, DbConfig};

/// Runs the Tauri application.
///
/// ## Startup Sequence
/// 1. Initialize tracing (env-filterable structured logging)
/// 2. Determine the database path (platform app-data dir, env override)
/// 3. Connect to the database and run migrations
/// 4. Register state objects (DbState, DraftState, ConfigState)
/// 5. Register commands and launch the window
pub fn run() {
    init_tracing();

    info!("Starting SignCraft POS desktop application");

    tauri::Builder::default()
        .setup(|app| {
            let db_path = get_database_path(app)?;
            info!(?db_path, "Database path determined");

            // Database setup is async; the setup hook is not
            let db = tauri::async_runtime::block_on(async {
                Database::new(DbConfig::new(db_path)).await
            })?;

            info!("Database connected and migrations applied");

            app.manage(DbState::new(db));
            app.manage(DraftState::new());
            app.manage(ConfigState::from_env());

            info!("State initialized");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Catalog commands
            commands::catalog::search_products,
            commands::catalog::get_product_by_id,
            commands::catalog::get_product_by_sku,
            // Draft commands
            commands::draft::get_draft,
            commands::draft::price_line_preview,
            commands::draft::add_line_item,
            commands::draft::update_line_quantity,
            commands::draft::remove_line_item,
            commands::draft::clear_draft,
            // Coupon commands
            commands::coupon::apply_coupon,
            commands::coupon::remove_coupon,
            // Checkout commands
            commands::checkout::submit_order,
            commands::checkout::get_order,
            commands::checkout::list_recent_orders,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

/// Initializes the tracing subscriber.
///
/// Default filter keeps sqlx quiet; override with `RUST_LOG`
/// (e.g. `RUST_LOG=signcraft=trace`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,signcraft=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Determines the database file path.
///
/// ## Platform Paths
/// - macOS: `~/Library/Application Support/com.signcraft.pos/signcraft.db`
/// - Windows: `%APPDATA%\signcraft\pos\signcraft.db`
/// - Linux: `~/.local/share/signcraft-pos/signcraft.db`
///
/// Set `SIGNCRAFT_DB_PATH` to override (development).
fn get_database_path(_app: &tauri::App) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Ok(path) = std::env::var("SIGNCRAFT_DB_PATH") {
        return Ok(PathBuf::from(path));
    }

    let proj_dirs = ProjectDirs::from("com", "signcraft", "pos")
        .ok_or("Could not determine app data directory")?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("signcraft.db"))
}
