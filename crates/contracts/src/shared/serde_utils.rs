//! Serde helpers for the loosely typed backend payloads

use serde::{Deserialize, Deserializer};

/// Deserialize a possibly-null value, falling back to `T::default()`.
///
/// Pair with `#[serde(default)]` so that both a missing key and an explicit
/// `null` end up as zero for numeric fields.
pub fn zero_if_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
