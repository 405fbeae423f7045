//! Data models for events-stream API responses.
//!
//! Types are organized by resource in submodules and re-exported here
//! for convenient access.

pub mod events;

pub use events::{AuditEvent, AuditRecord, EventQuery, EventsPage, FetchCursor, PageLinks};
