//! CLI command implementations.

pub mod collect;
pub mod export_csv;

use anyhow::Result;
use audit_client::AuditClient;
use audit_config::Config;

/// Build an events client from a loaded configuration.
pub fn build_client_from_config(config: &Config) -> Result<AuditClient> {
    Ok(AuditClient::builder().from_config(config).build()?)
}
