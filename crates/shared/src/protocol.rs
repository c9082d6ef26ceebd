use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::Record;

/// Item fields requested from the catalog; everything else is dropped server-side.
pub const RECORD_FIELDS: &[&str] = &[
    "title",
    "place_of_origin",
    "artist_display",
    "inscriptions",
    "date_start",
    "date_end",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtworkListResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Record>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pagination: PaginationPayload,
}

impl ArtworkListResponse {
    pub fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// Treats an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
