//! Kakao Local API response types.
//!
//! Every search endpoint answers `{"meta": {...}, "documents": [...]}`.
//! Documents are first read as raw JSON so a single malformed entry can be
//! skipped without losing the page, and so the untouched record can be kept
//! as the place's opaque metadata.

use serde::Deserialize;

/// Envelope shared by the keyword, address and category endpoints.
#[derive(Debug, Deserialize)]
pub struct SearchEnvelope {
    #[serde(default)]
    pub meta: Option<SearchMeta>,
    #[serde(default)]
    pub documents: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct SearchMeta {
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub pageable_count: u32,
    #[serde(default)]
    pub is_end: bool,
}

/// A keyword or category search hit.
#[derive(Debug, Deserialize)]
pub struct PlaceDocument {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub place_name: String,
    #[serde(default)]
    pub category_group_code: String,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub address_name: String,
    #[serde(default)]
    pub road_address_name: String,
    #[serde(default)]
    pub x: String,
    #[serde(default)]
    pub y: String,
    /// Metres from the search origin, as a string; empty without an origin.
    #[serde(default)]
    pub distance: String,
}

/// An address search hit.
#[derive(Debug, Deserialize)]
pub struct AddressDocument {
    #[serde(default)]
    pub address_name: String,
    #[serde(default)]
    pub x: String,
    #[serde(default)]
    pub y: String,
    #[serde(default)]
    pub road_address: Option<RoadAddress>,
}

#[derive(Debug, Deserialize)]
pub struct RoadAddress {
    #[serde(default)]
    pub address_name: String,
    #[serde(default)]
    pub building_name: String,
}

/// Error payload returned with 4xx statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default, rename = "errorType")]
    pub error_type: String,
    #[serde(default)]
    pub message: String,
}
