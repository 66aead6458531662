//! Catalog browser for TheCocktailDB.
//!
//! The `catalog` layer owns queries, the working set and favorites; `storage`
//! persists favorites and the theme; `config` resolves runtime settings. The
//! Tauri shell in `commands` is only built with the `desktop` feature.

pub mod catalog;
pub mod config;
pub mod storage;

#[cfg(feature = "desktop")]
mod commands;

pub use catalog::{CatalogError, CatalogResult, CatalogSession, DrinkRecord, QuerySpec};
pub use config::Config;

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global `tracing` subscriber, filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let _ = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();
}

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use crate::commands::*;
    use tauri::Manager;

    init_tracing();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let session = tauri::async_runtime::block_on(bootstrap())?;
            app.manage(session);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            run_query,
            apply_filter,
            lookup_detail,
            show_random,
            toggle_favorite,
            favorites,
            grid,
            current_theme,
            apply_theme,
            toggle_theme
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
