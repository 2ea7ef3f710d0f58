//! Conversion of Kakao documents into [`Place`] records.

use lunchwheel_core::{Coordinate, Place};

use crate::types::{AddressDocument, PlaceDocument};

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Builds a place from a keyword/category hit.
///
/// Returns `None` when the raw value does not have the document shape at all;
/// missing individual fields fall back to empty values.
#[must_use]
pub fn place_from_document(raw: serde_json::Value) -> Option<Place> {
    let doc: PlaceDocument = match serde_json::from_value(raw.clone()) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::debug!(error = %e, "skipping malformed place document");
            return None;
        }
    };

    let mut place = Place::new(doc.place_name.trim());
    place.identity = non_empty(&doc.id);
    place.category_code = non_empty(&doc.category_group_code);
    place.coordinate = Coordinate::parse(&doc.x, &doc.y);
    place.address = non_empty(&doc.road_address_name).or_else(|| non_empty(&doc.address_name));
    Some(place.with_raw(raw))
}

/// Builds a place from an address hit.
///
/// The display name is the road address's building name when present,
/// otherwise the lot-number address. Address hits carry no provider id and
/// are tagged `"is_address": true` in their raw metadata.
#[must_use]
pub fn place_from_address(mut raw: serde_json::Value) -> Option<Place> {
    let doc: AddressDocument = match serde_json::from_value(raw.clone()) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::debug!(error = %e, "skipping malformed address document");
            return None;
        }
    };

    let (name, address) = match &doc.road_address {
        Some(road) => (
            non_empty(&road.building_name).unwrap_or_else(|| doc.address_name.clone()),
            non_empty(&road.address_name).unwrap_or_else(|| doc.address_name.clone()),
        ),
        None => (doc.address_name.clone(), doc.address_name.clone()),
    };

    if let Some(obj) = raw.as_object_mut() {
        obj.insert("is_address".to_string(), serde_json::Value::Bool(true));
    }

    let mut place = Place::new(name);
    place.coordinate = Coordinate::parse(&doc.x, &doc.y);
    place.address = non_empty(&address);
    Some(place.with_raw(raw))
}
