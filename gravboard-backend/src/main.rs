/// Gravboard backend: config loading, seed catalog ingest, HTTP server.

use std::path::PathBuf;
use std::sync::atomic::AtomicU64;
use std::sync::{Arc, RwLock};

use gravboard_core::csv::parse_csv;
use gravboard_core::Board;

mod api;
mod config;
mod server;
mod state;
mod vault;

/// Built-in curated catalog, used unless a catalog_file is configured.
const SEED_CATALOG: &str = include_str!("../data/initial-catalog.csv");

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = config::default_config_path();
    let config = config::load_config(&config_path);

    let catalog = load_catalog(config.catalog_file.as_deref());
    let items = parse_csv(&catalog);
    log::info!(
        "[gravboard.main] seeded board with {} catalog item(s)",
        items.len()
    );

    let state = state::AppState {
        board: Arc::new(RwLock::new(Board::from_catalog(items))),
        version: Arc::new(AtomicU64::new(1)),
        vault_file: config.vault_file.clone().map(PathBuf::from),
        port: config.port,
        bind_address: config.bind_address.clone(),
    };

    if let Err(e) = server::serve(state).await {
        log::error!("[gravboard.main] server error: {}", e);
        std::process::exit(1);
    }
}

/// The configured catalog file when present and readable, the built-in
/// catalog otherwise.
fn load_catalog(catalog_file: Option<&str>) -> String {
    match catalog_file {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(content) => {
                log::info!("[gravboard.main] using catalog file {}", path);
                content
            }
            Err(e) => {
                log::warn!(
                    "[gravboard.main] failed to read catalog file {} ({}), using built-in catalog",
                    path,
                    e
                );
                SEED_CATALOG.to_string()
            }
        },
        None => SEED_CATALOG.to_string(),
    }
}
