//! Serde helpers that trim string input before validation runs
//!
//! Use with `#[serde(deserialize_with = "...")]` so `validator` rules see
//! the value the handler will store.

use serde::{Deserialize, Deserializer};

/// Deserialize a string with surrounding whitespace removed
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

/// Deserialize an optional string with surrounding whitespace removed.
///
/// Pair with `#[serde(default)]` so an absent field stays `None`.
pub fn trimmed_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(|v| v.trim().to_string()))
}
