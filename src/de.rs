//! Deserialization helpers for the service's loosely typed JSON

use serde::de::{self, Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

/// Treat an explicit `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Deserialize a number that the wire format sends as a JSON string.
/// `null` yields the default.
pub(crate) fn numeric_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) => s.trim().parse().map_err(de::Error::custom),
        None => Ok(T::default()),
    }
}
