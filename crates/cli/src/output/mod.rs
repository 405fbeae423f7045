//! Event output for the CLI.
//!
//! Responsibilities:
//! - Stream collected events as JSON lines to stdout or a log file.
//! - Convert JSON-lines logs into CSV.
//!
//! Does NOT handle:
//! - Fetching events (see `audit_client::Collector`).
//! - Diagnostic logging, which goes to stderr via tracing.

pub mod csv;
pub mod jsonl;

pub use self::csv::export_csv;
pub use self::jsonl::{JsonLinesSink, open_log_file};
