//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the command handlers.
//! - Treat a bare invocation as `collect` with default arguments.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()`).

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::cancellation::CancellationToken;
use crate::commands;
use crate::config_context::ConfigCommandContext;

/// Dispatch CLI commands to their respective handlers.
pub(crate) async fn run_command(
    cli: Cli,
    config: ConfigCommandContext,
    cancel_token: &CancellationToken,
) -> Result<()> {
    match cli.command {
        Some(Commands::ExportCsv { log, csv }) => commands::export_csv::run(log, csv),
        Some(Commands::Collect(args)) => {
            commands::collect::run(config.into_real_config()?, args, cancel_token).await
        }
        None => {
            commands::collect::run(config.into_real_config()?, Default::default(), cancel_token)
                .await
        }
    }
}

/// True when the command talks to the events API and needs credentials.
pub(crate) fn needs_real_config(command: Option<&Commands>) -> bool {
    !matches!(command, Some(Commands::ExportCsv { .. }))
}
