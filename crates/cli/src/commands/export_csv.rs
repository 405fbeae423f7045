//! Export-csv command implementation.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::output::export_csv;

pub fn run(log: PathBuf, csv: Option<PathBuf>) -> Result<()> {
    info!(log = %log.display(), "Exporting log to CSV");
    let (path, rows) = export_csv(&log, csv.as_deref())?;
    println!("Exported {} records to {}", rows, path.display());
    Ok(())
}
