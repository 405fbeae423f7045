//! REST API endpoint implementations.

mod events;
mod request;

pub use events::{events_url, fetch_events_page};
pub use request::{RetryPolicy, parse_retry_after, send_request_with_retry};
