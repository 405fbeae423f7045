//! Configuration context for command execution.
//!
//! Responsibilities:
//! - Distinguish between a loaded config and commands that work offline.
//!
//! Does NOT handle:
//! - Configuration loading (done in `main()`).
//!
//! Invariants:
//! - Offline commands never reach the events API.

use audit_config::Config;

pub(crate) enum ConfigCommandContext {
    /// A validated config with credentials, used by `collect`.
    Real(Box<Config>),
    /// Used by `export-csv`, which only touches local files.
    Offline,
}

impl ConfigCommandContext {
    /// Extract the real config, failing if the command was classified as offline.
    pub(crate) fn into_real_config(self) -> anyhow::Result<Config> {
        match self {
            ConfigCommandContext::Real(config) => Ok(*config),
            ConfigCommandContext::Offline => {
                anyhow::bail!(
                    "Internal error: attempted to collect events without a loaded configuration"
                )
            }
        }
    }
}
