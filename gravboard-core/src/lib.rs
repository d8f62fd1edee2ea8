/// Gravboard core: the research board model, catalog ingestion, and the
/// Obsidian-flavored note format used for export and import.
///
/// Everything here is pure and synchronous. File IO, transport, and any
/// confirmation gates in front of destructive operations belong to the
/// callers (gravboard-backend, UIs).

pub mod board;
pub mod csv;
pub mod markdown;
pub mod types;

pub use board::Board;
pub use types::{ColumnCounts, ColumnKind, RepoItem};
