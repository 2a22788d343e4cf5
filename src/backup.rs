use anyhow::{Context, Result, bail};
use std::fs;
use std::path::PathBuf;

use crate::config::ToolConfig;

/// Copy the live database to a timestamped file in the same directory.
/// Every mutating operation calls this before its first write; a failure
/// here must abort the operation with the original file untouched.
pub fn create_backup(config: &ToolConfig) -> Result<PathBuf> {
    if !config.database_exists() {
        bail!("database not found at {}, nothing to back up", config.db_path.display());
    }
    let backup_path = config.next_backup_path();
    fs::copy(&config.db_path, &backup_path)
        .with_context(|| format!("Failed to copy database to {}", backup_path.display()))?;
    Ok(backup_path)
}
