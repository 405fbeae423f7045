//! Configuration management for the audit event collector.
//!
//! This crate provides types and loaders for the collector's connection,
//! credential, and collection settings, read from `.env` files and
//! environment variables.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{
    ConfigError, ConfigLoader, ENV_API_TOKEN, ENV_BASE_URL, ENV_LOGS_DIR, ENV_MAX_RETRIES,
    ENV_ORG_ID, ENV_PAGE_SIZE, ENV_REQUEST_TIMEOUT_SECONDS, ENV_RETRY_BASE_SECONDS,
    env_var_or_none,
};
pub use types::{AuthConfig, CollectionConfig, Config, ConnectionConfig};
