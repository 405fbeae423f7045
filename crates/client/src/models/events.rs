//! Events-stream models.
//!
//! Responsibilities:
//! - Deserialize events-stream pages and resolve their next-page cursor.
//! - Carry events as opaque JSON so they can be emitted exactly as received.
//! - Derive the flattened export record from an event.
//!
//! Invariants:
//! - `meta.next` wins over `links.next`; empty values count as absent.
//! - A cursor beginning with `http` is an absolute URL, anything else a token.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::serde_helpers::{null_as_default, opt_string_from_number_or_string};

/// A single audit event, kept as the uninterpreted JSON object the API returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditEvent(Value);

impl AuditEvent {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The event's `id`, when it is a string.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for AuditEvent {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Pagination block used for both `meta` and `links`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageLinks {
    #[serde(default, deserialize_with = "opt_string_from_number_or_string")]
    pub next: Option<String>,
}

/// One page of the events stream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventsPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<AuditEvent>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: PageLinks,
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: PageLinks,
}

impl EventsPage {
    /// The cursor for the following page, if the API reported one.
    pub fn next_cursor(&self) -> Option<FetchCursor> {
        self.meta
            .next
            .as_deref()
            .or(self.links.next.as_deref())
            .map(FetchCursor::parse)
    }
}

/// Position in the events stream handed back by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchCursor {
    /// Opaque token sent back as the `cursor` query parameter.
    Token(String),
    /// Absolute URL requested verbatim.
    Url(String),
}

impl FetchCursor {
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http") {
            Self::Url(raw.to_string())
        } else {
            Self::Token(raw.to_string())
        }
    }
}

/// Query parameters of the first request. Cursor tokens are appended per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventQuery {
    pub limit: u32,
    /// Inclusive lower bound, epoch milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<i64>,
    /// Inclusive upper bound, epoch milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<i64>,
}

impl EventQuery {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            from: None,
            to: None,
        }
    }

    pub fn with_range(mut self, from: Option<i64>, to: Option<i64>) -> Self {
        self.from = from;
        self.to = to;
        self
    }
}

/// Flattened export form of an audit event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub actor_name: Option<String>,
    #[serde(default)]
    pub actor_email: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub event_id: Option<String>,
}

impl AuditRecord {
    /// Column order used by JSON-lines logs and CSV exports.
    pub const FIELDS: [&'static str; 6] =
        ["time", "action", "actor_name", "actor_email", "ip", "event_id"];

    pub fn from_event(event: &AuditEvent) -> Self {
        let value = event.as_value();
        let attributes = value.get("attributes");
        let attr = |path: &[&str]| {
            path.iter()
                .try_fold(attributes?, |v, key| v.get(key))
                .and_then(scalar_to_string)
        };

        Self {
            time: attr(&["time"]),
            action: attr(&["action"]),
            actor_name: attr(&["actor", "name"]),
            actor_email: attr(&["actor", "email"]),
            ip: attr(&["location", "ip"]),
            event_id: value.get("id").and_then(scalar_to_string),
        }
    }

    /// Values in [`AuditRecord::FIELDS`] order, missing values as empty strings.
    pub fn to_row(&self) -> [&str; 6] {
        [
            &self.time,
            &self.action,
            &self.actor_name,
            &self.actor_email,
            &self.ip,
            &self.event_id,
        ]
        .map(|field| field.as_deref().unwrap_or_default())
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
