//! Synthetic restaurants used when live data is sparse or unavailable.

use crate::place::Place;

/// Menu names cycled through when naming synthetic restaurants.
pub const SYNTHETIC_MENU: [&str; 15] = [
    "순대국", "김치찌개", "파스타", "소고기", "초밥", "햄버거", "떡볶이", "짬뽕", "백반", "샐러드",
    "타코", "쌀국수", "카레", "삼겹살", "닭갈비",
];

/// Category label carried in the raw metadata of every synthetic place.
pub const SYNTHETIC_CATEGORY_NAME: &str = "가상 맛집";

/// Generates `count` synthetic restaurants named `"{menu} 맛집 {n}호점"`.
///
/// `n` starts at 1 and the menu wraps around every 15 entries. Synthetic
/// places carry no identity and no category code, so they are never
/// deduplicated or filtered out.
#[must_use]
pub fn synthetic_restaurants(count: usize) -> Vec<Place> {
    (0..count)
        .map(|i| {
            let menu = SYNTHETIC_MENU[i % SYNTHETIC_MENU.len()];
            Place::new(format!("{menu} 맛집 {}호점", i + 1)).with_raw(serde_json::json!({
                "category_name": SYNTHETIC_CATEGORY_NAME,
                "synthetic": true,
            }))
        })
        .collect()
}

/// Whether a place was produced by [`synthetic_restaurants`].
#[must_use]
pub fn is_synthetic(place: &Place) -> bool {
    place.identity.is_none()
        && place
            .raw
            .get("synthetic")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_cycle_with_store_numbers() {
        let places = synthetic_restaurants(17);
        assert_eq!(places.len(), 17);
        assert_eq!(places[0].name, "순대국 맛집 1호점");
        assert_eq!(places[14].name, "닭갈비 맛집 15호점");
        assert_eq!(places[15].name, "순대국 맛집 16호점");
        assert_eq!(places[16].name, "김치찌개 맛집 17호점");
    }

    #[test]
    fn synthetic_places_have_no_identity() {
        for place in synthetic_restaurants(5) {
            assert!(place.identity.is_none());
            assert!(place.category_code.is_none());
            assert!(is_synthetic(&place));
        }
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(synthetic_restaurants(0).is_empty());
    }

    #[test]
    fn live_place_is_not_synthetic() {
        assert!(!is_synthetic(&Place::new("진짜 식당").with_identity("1")));
        assert!(!is_synthetic(&Place::new("no raw")));
    }
}
