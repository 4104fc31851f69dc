//! Serde helpers for PATCH-style payloads

use serde::{Deserialize, Deserializer};

/// Tells an absent field apart from an explicit `null`
///
/// Use with `#[serde(default, deserialize_with = "...")]`: a missing field
/// stays `None` (keep), `null` becomes `Some(None)` (clear), a value becomes
/// `Some(Some(v))` (set).
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
