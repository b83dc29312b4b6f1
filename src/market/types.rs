//! Gamma API event types.
//!
//! These mirror the upstream schema field-for-field. Nothing is derived
//! locally, so serializing a value reproduces what the upstream sent for
//! these fields. Absent or `null` fields fall back to empty values; a field
//! of the wrong JSON type is a decode error.

use serde::{Deserialize, Deserializer, Serialize};

/// Deserializes `null` into the type's default (`""`, `false`, `[]`).
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Category label attached to an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    /// Tag identifier.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Human-readable label.
    #[serde(deserialize_with = "null_as_default")]
    pub label: String,
    /// URL slug.
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
}

/// A single question within an event.
///
/// `clob_token_ids`, `outcomes` and `outcome_prices` hold JSON arrays encoded
/// as strings upstream (e.g. `"[\"Yes\", \"No\"]"`). They are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Market {
    /// Market identifier.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Question text.
    #[serde(deserialize_with = "null_as_default")]
    pub question: String,
    /// CLOB token IDs, JSON-encoded string array.
    #[serde(deserialize_with = "null_as_default")]
    pub clob_token_ids: String,
    /// Outcome labels, JSON-encoded string array.
    #[serde(deserialize_with = "null_as_default")]
    pub outcomes: String,
    /// Outcome prices, JSON-encoded string array.
    #[serde(deserialize_with = "null_as_default")]
    pub outcome_prices: String,
}

/// A prediction-market event with its tags and markets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    /// Event identifier.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// URL slug.
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    /// Event title.
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Whether the event is active.
    #[serde(deserialize_with = "null_as_default")]
    pub active: bool,
    /// Whether the event is closed.
    #[serde(deserialize_with = "null_as_default")]
    pub closed: bool,
    /// Tags in upstream order.
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
    /// Markets in upstream order.
    #[serde(deserialize_with = "null_as_default")]
    pub markets: Vec<Market>,
}

/// Options for [`GammaClient::fetch_active_events`](super::GammaClient::fetch_active_events).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Maximum number of events to request. Zero means upstream default.
    pub limit: u64,
}

impl FetchOptions {
    /// Options with the given limit.
    pub fn with_limit(limit: u64) -> Self {
        Self { limit }
    }

    /// The limit to forward upstream, if any.
    pub fn effective_limit(&self) -> Option<u64> {
        (self.limit > 0).then_some(self.limit)
    }
}
