/// Shared application state passed to axum handlers.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use gravboard_core::Board;

#[derive(Clone)]
pub struct AppState {
    pub board: Arc<RwLock<Board>>,
    /// Bumped on every mutation; serves as the ETag source for GET /board.
    /// Mutating handlers bump it while still holding the board write lock,
    /// readers read it under the read lock, so board and version never skew.
    pub version: Arc<AtomicU64>,
    pub vault_file: Option<PathBuf>,
    pub port: u16,
    pub bind_address: String,
}

impl AppState {
    pub fn current_version(&self) -> u64 {
        self.version.load(Ordering::Relaxed)
    }

    pub fn bump_version(&self) -> u64 {
        self.version.fetch_add(1, Ordering::Relaxed) + 1
    }
}
