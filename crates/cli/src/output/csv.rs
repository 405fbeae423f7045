//! CSV export of JSON-lines event logs.
//!
//! Responsibilities:
//! - Read a log written by `collect` (record or raw lines) and write one CSV
//!   row per line with the fixed `AuditRecord::FIELDS` header.
//!
//! Invariants:
//! - Missing keys become empty cells.
//! - The destination is replaced atomically via a temp file in the same directory.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use audit_client::{AuditEvent, AuditRecord};
use serde_json::Value;
use tempfile::NamedTempFile;

/// Default CSV destination: the log path with a `.csv` extension.
pub fn default_csv_path(log: &Path) -> PathBuf {
    log.with_extension("csv")
}

/// Convert one log line into a record.
///
/// Raw events (an `attributes` object, or a top-level `id` without
/// `event_id`) get flattened; anything else is an already-flattened record.
fn parse_line(line: &str) -> Result<AuditRecord> {
    let value: Value = serde_json::from_str(line)?;
    if is_raw_event(&value) {
        return Ok(AuditRecord::from_event(&AuditEvent::new(value)));
    }
    Ok(serde_json::from_value(value)?)
}

fn is_raw_event(value: &Value) -> bool {
    value.get("attributes").is_some()
        || (value.get("id").is_some() && value.get("event_id").is_none())
}

/// Export `log` to CSV and return the destination path and row count.
pub fn export_csv(log: &Path, csv_path: Option<&Path>) -> Result<(PathBuf, usize)> {
    let destination = csv_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_csv_path(log));

    let reader = BufReader::new(
        File::open(log).with_context(|| format!("Failed to open log file: {}", log.display()))?,
    );

    let parent_dir = match destination.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&parent_dir)
        .with_context(|| format!("Failed to create directory: {}", parent_dir.display()))?;
    let temp_file = NamedTempFile::new_in(&parent_dir)
        .with_context(|| format!("Failed to create temp file in: {}", parent_dir.display()))?;

    let mut writer = csv::Writer::from_writer(temp_file);
    writer.write_record(AuditRecord::FIELDS)?;

    let mut rows = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", log.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let record = parse_line(&line)
            .with_context(|| format!("{}:{}: not a JSON event record", log.display(), index + 1))?;
        writer.write_record(record.to_row())?;
        rows += 1;
    }

    let mut temp_file = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to finish CSV output: {}", e.error()))?;
    temp_file.flush().context("Failed to flush temp file")?;
    temp_file
        .persist(&destination)
        .with_context(|| format!("Failed to write CSV file: {}", destination.display()))?;

    tracing::debug!(rows, path = %destination.display(), "Exported CSV");
    Ok((destination, rows))
}
