//! Stand-in data for when the place source is absent.

use lunchwheel_core::{Coordinate, Place};

pub use lunchwheel_core::synthetic_restaurants;

/// Two fake location hits for `query`: a head office and a branch.
///
/// Both share a fixed coordinate near Pangyo so the rest of the pipeline has
/// an origin to search around.
#[must_use]
pub fn mock_locations(query: &str) -> Vec<Place> {
    let origin = Coordinate::new(127.1, 37.4);
    vec![
        Place::new(format!("{query} 본사"))
            .with_address("서울 강남구 테헤란로 123")
            .with_coordinate(origin)
            .with_raw(serde_json::json!({ "mock": true })),
        Place::new(format!("{query} 센터"))
            .with_address("성남시 분당구 판교역로 456")
            .with_coordinate(origin)
            .with_raw(serde_json::json!({ "mock": true })),
    ]
}
