//! Serde helpers for loosely typed events-stream payloads.
//!
//! Responsibilities:
//! - Accept cursors that arrive as strings or numbers.
//! - Treat explicit `null` collections as empty.
//!
//! Invariants / assumptions:
//! - Empty strings are treated the same as an absent value.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    U64(u64),
    I64(i64),
    F64(f64),
}

/// Deserialize an optional value that may be a JSON string or number into a
/// non-empty `String`.
pub fn opt_string_from_number_or_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(match value {
        None => None,
        Some(StringOrNumber::String(s)) if s.is_empty() => None,
        Some(StringOrNumber::String(s)) => Some(s),
        Some(StringOrNumber::U64(v)) => Some(v.to_string()),
        Some(StringOrNumber::I64(v)) => Some(v.to_string()),
        Some(StringOrNumber::F64(v)) => Some(v.to_string()),
    })
}

/// Deserialize a collection where `null` means empty.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
