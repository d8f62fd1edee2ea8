/// Note-vault sync: push writes the exported note to the configured
/// vault file, pull reads it back and parses it. Transport to an actual
/// remote vault (and any retry/status UI) belongs to external callers;
/// this module only owns the file that backs the vault locally.

use std::fs;
use std::io::Write;
use std::path::Path;

use gravboard_core::markdown::{generate_markdown, parse_markdown};
use gravboard_core::Board;

#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("No vault file configured")]
    NotConfigured,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize the board and write it to the vault file.
/// Returns the number of bytes written.
pub fn push(vault_file: Option<&Path>, board: &Board) -> Result<usize, VaultError> {
    let vault_file = vault_file.ok_or(VaultError::NotConfigured)?;
    let markdown = generate_markdown(board);
    atomic_write(vault_file, &markdown)?;
    log::info!(
        "[gravboard.vault] pushed {} byte(s) to {}",
        markdown.len(),
        vault_file.display()
    );
    Ok(markdown.len())
}

/// Read the vault file and parse it into a fresh board.
pub fn pull(vault_file: Option<&Path>) -> Result<Board, VaultError> {
    let vault_file = vault_file.ok_or(VaultError::NotConfigured)?;
    let content = fs::read_to_string(vault_file)?;
    let board = parse_markdown(&content);
    log::info!(
        "[gravboard.vault] pulled {} item(s) from {}",
        board.total(),
        vault_file.display()
    );
    Ok(board)
}

/// Atomic write with fsync: write to .tmp, fsync, rename, fsync directory.
fn atomic_write(path: &Path, content: &str) -> Result<(), std::io::Error> {
    let tmp_path = path.with_extension("gravboard.tmp");
    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    fs::rename(&tmp_path, path)?;

    // fsync directory for rename durability
    if let Some(dir) = path.parent() {
        if let Ok(d) = fs::File::open(dir) {
            let _ = d.sync_all();
        }
    }
    Ok(())
}
