//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Mirror every configuration variable as a global flag with an `env` fallback.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not build the configuration (see `main()`).

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use audit_config::constants::DEFAULT_UTC_OFFSET;

#[derive(Parser)]
#[command(name = "audit-collector")]
#[command(about = "Collect an organization's audit events from the events-stream API", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  audit-collector > events.jsonl\n  audit-collector collect --from 2025-01-01 --to 2025-01-31 --name january\n  audit-collector export-csv ./logs/january.log\n"
)]
pub struct Cli {
    /// Organization id whose events are collected
    #[arg(long, global = true, env = "ORG_ID", hide_env_values = true)]
    pub org_id: Option<String>,

    /// API token sent as a bearer token
    #[arg(short, long, global = true, env = "API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Base URL of the organizations API (e.g., https://api.atlassian.com/admin/v1/orgs)
    #[arg(short, long, global = true, env = "API_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "REQUEST_TIMEOUT_SECONDS")]
    pub timeout: Option<u64>,

    /// Maximum number of retries for rate-limited or transient failures
    #[arg(long, global = true, env = "MAX_RETRIES")]
    pub max_retries: Option<usize>,

    /// Number of events requested per page
    #[arg(long, global = true, env = "PAGE_SIZE")]
    pub page_size: Option<u32>,

    /// Directory for named JSON-lines logs
    #[arg(long, global = true, env = "LOGS_DIR", value_name = "DIR")]
    pub logs_dir: Option<PathBuf>,

    /// Diagnostic log format written to stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect events (default when no subcommand is given)
    Collect(CollectArgs),

    /// Convert a JSON-lines record log into CSV
    ExportCsv {
        /// JSON-lines log produced by `collect --name`
        log: PathBuf,

        /// Destination CSV file (defaults to LOG with a .csv extension)
        csv: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct CollectArgs {
    /// First day to collect, inclusive (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Last day to collect, inclusive (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// UTC offset the dates are interpreted in (e.g., +09:00, -05:30, Z)
    #[arg(long, default_value = DEFAULT_UTC_OFFSET, allow_hyphen_values = true)]
    pub utc_offset: String,

    /// Write to <LOGS_DIR>/<NAME>.log instead of stdout
    #[arg(short, long)]
    pub name: Option<String>,

    /// Line format [default: raw on stdout, record for --name]
    #[arg(short, long, value_enum)]
    pub format: Option<EventFormat>,
}

impl Default for CollectArgs {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            utc_offset: DEFAULT_UTC_OFFSET.to_string(),
            name: None,
            format: None,
        }
    }
}

/// Shape of each emitted JSON line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EventFormat {
    /// The event exactly as the API returned it
    Raw,
    /// Flattened time/action/actor/ip/id record
    Record,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}
