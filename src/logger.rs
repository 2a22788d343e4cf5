use anyhow::{Context, Result};
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;

use crate::config::ToolConfig;

// Append-only record of completed maintenance actions, kept next to the
// database. A failed log write never un-does the action it describes, so
// callers discard the result.
pub fn log_event(config: &ToolConfig, event: &str, detail: &str) -> Result<()> {
    let timestamp = Local::now().to_rfc3339();
    let log_path = config.log_path();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open {}", log_path.display()))?;
    writeln!(file, "{} | {} | {}", timestamp, event, detail)
        .context("Failed to write log entry")?;
    Ok(())
}
