//! JSON-lines event sink.
//!
//! Invariants:
//! - Exactly one JSON document per line, newline terminated.
//! - Raw mode writes the event exactly as received from the API.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use audit_client::{AuditEvent, AuditRecord, ClientError, EventSink};

use crate::args::EventFormat;

/// Writes each event as one JSON line to any `Write` target.
pub struct JsonLinesSink<W: Write + Send> {
    writer: W,
    format: EventFormat,
    written: usize,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W, format: EventFormat) -> Self {
        Self {
            writer,
            format,
            written: 0,
        }
    }

    /// Lines written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, event: &AuditEvent) -> std::io::Result<()> {
        match self.format {
            EventFormat::Raw => serde_json::to_writer(&mut self.writer, event)?,
            EventFormat::Record => {
                serde_json::to_writer(&mut self.writer, &AuditRecord::from_event(event))?
            }
        }
        self.writer.write_all(b"\n")
    }
}

#[async_trait]
impl<W: Write + Send> EventSink for JsonLinesSink<W> {
    async fn emit(&mut self, event: AuditEvent) -> audit_client::Result<()> {
        self.write_line(&event)
            .map_err(|e| ClientError::Sink(format!("failed to write event: {e}")))?;
        self.written += 1;
        Ok(())
    }

    async fn finish(&mut self) -> audit_client::Result<()> {
        self.writer
            .flush()
            .map_err(|e| ClientError::Sink(format!("failed to flush output: {e}")))
    }
}

/// Resolve `<logs_dir>/<name>.log`, dropping a `.log` suffix already present in `name`.
pub fn log_file_path(logs_dir: &Path, name: &str) -> Result<PathBuf> {
    let name = name.trim();
    let stem = name.strip_suffix(".log").unwrap_or(name);
    if stem.is_empty() {
        bail!("log name must not be empty");
    }
    if stem.contains(['/', '\\']) {
        bail!("log name '{stem}' must not contain path separators");
    }
    Ok(logs_dir.join(format!("{stem}.log")))
}

/// Open the named log for appending, creating the logs directory if needed.
pub fn open_log_file(logs_dir: &Path, name: &str) -> Result<(PathBuf, File)> {
    let path = log_file_path(logs_dir, name)?;
    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("Failed to create directory: {}", logs_dir.display()))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;
    Ok((path, file))
}
