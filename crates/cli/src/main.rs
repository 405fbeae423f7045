//! audit-collector - collect an organization's audit events from the command line.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Build the configuration and hand it to the command handlers.
//! - Map failures to structured exit codes.
//!
//! Does NOT handle:
//! - HTTP, retry, or pagination logic (see `crates/client`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing so `.env` can provide clap env defaults.
//! - Diagnostics go to stderr; stdout carries only event data or command results.

mod args;
mod cancellation;
mod commands;
mod config_context;
mod date_range;
mod dispatch;
mod error;
mod output;

use std::time::Duration;

use args::{Cli, LogFormat};
use audit_config::{Config, ConfigError, ConfigLoader};
use cancellation::{CancellationToken, is_interrupted, print_interrupted_message};
use clap::Parser;
use config_context::ConfigCommandContext;
use dispatch::{needs_real_config, run_command};
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::ConfigError.as_i32());
    }

    let cli = Cli::parse();
    init_logging(cli.log_format);

    let config_context = if needs_real_config(cli.command.as_ref()) {
        match build_config(&cli) {
            Ok(config) => ConfigCommandContext::Real(Box::new(config)),
            Err(e) => {
                eprintln!("Failed to build configuration: {:#}", e);
                std::process::exit(ExitCode::ConfigError.as_i32());
            }
        }
    } else {
        ConfigCommandContext::Offline
    };

    let cancel = CancellationToken::new();
    cancel.raise_on_ctrl_c();

    let exit_code = match run_command(cli, config_context, &cancel).await {
        Ok(()) => ExitCode::Success,
        Err(e) if is_interrupted(&e) => {
            print_interrupted_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}

/// Install the stderr subscriber. `RUST_LOG` wins over the `info` default.
fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

/// Environment first, then CLI flags on top.
fn build_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut loader = ConfigLoader::new().from_env()?;

    // Blank/whitespace-only values are ignored to allow fallback to the env layer
    if let Some(org_id) = non_blank(&cli.org_id) {
        loader = loader.with_org_id(org_id);
    }
    if let Some(token) = non_blank(&cli.api_token) {
        loader = loader.with_api_token(token);
    }
    if let Some(url) = non_blank(&cli.base_url) {
        loader = loader.with_base_url(url);
    }
    if let Some(timeout_secs) = cli.timeout {
        loader = loader.with_timeout(Duration::from_secs(timeout_secs));
    }
    if let Some(retries) = cli.max_retries {
        loader = loader.with_max_retries(retries);
    }
    if let Some(size) = cli.page_size {
        loader = loader.with_page_size(size);
    }
    if let Some(ref dir) = cli.logs_dir {
        loader = loader.with_logs_dir(dir.clone());
    }

    loader.build()
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
