//! Authentication types for the audit collector configuration.
//!
//! Responsibilities:
//! - Hold the organization id and the static API token.
//!
//! Does NOT handle:
//! - Sending the token (see client crate).
//!
//! Invariants:
//! - The API token is a `secrecy::SecretString` and is never printed by `Debug`.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Module for serializing SecretString as strings.
mod secret_string {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize as DeserializeTrait, Serialize as SerializeTrait};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        secret.expose_secret().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s.into()))
    }
}

/// Credentials identifying the tenant and authorizing the requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Organization whose audit events are collected.
    pub org_id: String,
    /// Static bearer token.
    #[serde(with = "secret_string")]
    pub api_token: SecretString,
}
