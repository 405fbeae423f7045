//! Organization audit events-stream client.
//!
//! This crate fetches an organization's audit events page by page with a
//! static bearer token, pausing whenever the API answers HTTP 429 for as
//! long as its `Retry-After` header asks, and hands every event to an
//! [`EventSink`].

pub mod client;
pub mod collector;
pub mod endpoints;
pub mod error;
pub mod models;
mod serde_helpers;
pub mod stats;

#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use client::AuditClient;
pub use client::builder::AuditClientBuilder;
pub use collector::{CollectionSummary, Collector, EventSink};
pub use endpoints::RetryPolicy;
pub use error::{ClientError, Result};
pub use models::{AuditEvent, AuditRecord, EventQuery, EventsPage, FetchCursor};
pub use stats::{RequestStats, StatsSnapshot};
