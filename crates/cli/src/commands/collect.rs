//! Collect command implementation.
//!
//! Responsibilities:
//! - Turn the day range and UTC offset into an events query.
//! - Pick the sink: NDJSON on stdout, or an appended `<LOGS_DIR>/<NAME>.log`.
//! - Race the collection against Ctrl+C and flush partial output on cancel.
//!
//! Does NOT handle:
//! - Pagination or retry (see `audit_client::Collector`).

use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use audit_client::{AuditClient, CollectionSummary, Collector, EventQuery, EventSink};
use audit_config::{Config, ConfigError};
use tracing::info;

use crate::args::{CollectArgs, EventFormat};
use crate::cancellation::{CancellationToken, Interrupted};
use crate::commands::build_client_from_config;
use crate::date_range::{day_range_millis, parse_utc_offset};
use crate::output::{JsonLinesSink, open_log_file};

pub async fn run(config: Config, args: CollectArgs, cancel: &CancellationToken) -> Result<()> {
    let (from, to) = parse_utc_offset(&args.utc_offset)
        .and_then(|offset| day_range_millis(args.from, args.to, offset))
        .map_err(|e| ConfigError::InvalidValue {
            var: "date range".to_string(),
            message: format!("{e:#}"),
        })?;
    let query = EventQuery::new(config.collection.page_size).with_range(from, to);
    let client = build_client_from_config(&config)?;

    match args.name {
        Some(name) => {
            let (path, file) = open_log_file(&config.collection.logs_dir, &name)?;
            let format = args.format.unwrap_or(EventFormat::Record);
            info!(path = %path.display(), ?format, "Writing events to log file");

            let mut sink = JsonLinesSink::new(BufWriter::new(file), format);
            let summary = collect_into(&client, query, &mut sink, cancel).await?;
            print_summary(&summary);
            eprintln!("Saved to {}", path.display());
        }
        None => {
            let format = args.format.unwrap_or(EventFormat::Raw);
            let mut sink = JsonLinesSink::new(BufWriter::new(std::io::stdout()), format);
            let summary = collect_into(&client, query, &mut sink, cancel).await?;
            print_summary(&summary);
        }
    }

    Ok(())
}

async fn collect_into<W>(
    client: &AuditClient,
    query: EventQuery,
    sink: &mut JsonLinesSink<W>,
    cancel: &CancellationToken,
) -> Result<CollectionSummary>
where
    W: Write + Send,
{
    let collector = Collector::new(client, query);

    let outcome = tokio::select! {
        res = collector.run(&mut *sink) => Some(res),
        _ = cancel.cancelled() => None,
    };

    match outcome {
        Some(res) => res.context("Failed to collect events"),
        None => {
            sink.finish()
                .await
                .context("Failed to flush partial output")?;
            info!(written = sink.written(), "Collection interrupted");
            Err(Interrupted.into())
        }
    }
}

fn print_summary(summary: &CollectionSummary) {
    eprintln!(
        "Collected {} events ({} pages, {} requests, {} rate-limit pauses)",
        summary.events, summary.pages, summary.requests, summary.rate_limit_pauses
    );
}
