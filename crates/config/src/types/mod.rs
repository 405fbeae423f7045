//! Configuration type definitions for the audit collector.
//!
//! Responsibilities:
//! - Define configuration types for authentication, connection, and collection.
//! - Provide serialization helpers for sensitive types (secrets, durations).
//!
//! Does NOT handle:
//! - Configuration loading from `.env` or environment variables (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - All secret types use `secrecy::SecretString` to prevent accidental logging.
//! - Serialization helpers (`secret_string`, `duration_seconds`) are private modules.

mod auth;
mod collection;
pub(crate) mod connection;

pub use auth::AuthConfig;
pub use collection::CollectionConfig;
pub use connection::{Config, ConnectionConfig};
