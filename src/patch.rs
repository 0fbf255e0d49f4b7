//! Deserialization helpers for partial updates.

use serde::{Deserialize, Deserializer};

/// Deserialize a nullable field of a PATCH body.
///
/// Use together with `#[serde(default)]`: an omitted field stays `None`,
/// `null` becomes `Some(None)` and a value becomes `Some(Some(value))`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
