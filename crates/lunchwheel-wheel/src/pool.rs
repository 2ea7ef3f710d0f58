//! Candidate pool construction.
//!
//! Merges the raw category-search batches into the restaurant universe for
//! one location: concatenate, drop the excluded category, deduplicate by
//! provider id, and top up with synthetic restaurants when the area is
//! sparse. The builder is a pure function of its inputs.

use std::collections::HashSet;

use lunchwheel_core::{synthetic_restaurants, AppConfig, Place};

/// Size bounds for the pool and for each round's candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolLimits {
    /// Caps the candidate set and therefore the sector count.
    pub max_candidates: usize,
    /// Below this many live places the universe is topped up.
    pub min_pool: usize,
}

impl Default for PoolLimits {
    fn default() -> Self {
        Self {
            max_candidates: 15,
            min_pool: 5,
        }
    }
}

impl PoolLimits {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_candidates: config.max_candidates,
            min_pool: config.min_pool,
        }
    }
}

/// The deduplicated pool of restaurants for one location selection.
///
/// Replaced wholesale on every new search; there is no way to mutate one in
/// place.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantUniverse {
    places: Vec<Place>,
    synthetic_count: usize,
}

impl RestaurantUniverse {
    #[must_use]
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Places that came from the upstream source.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.places.len() - self.synthetic_count
    }

    /// Synthetic places appended by the top-up step.
    #[must_use]
    pub fn synthetic_count(&self) -> usize {
        self.synthetic_count
    }

    /// Whether the caller should tell the user the area looked sparse.
    #[must_use]
    pub fn is_topped_up(&self) -> bool {
        self.synthetic_count > 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Place> {
        self.places.iter()
    }
}

impl<'a> IntoIterator for &'a RestaurantUniverse {
    type Item = &'a Place;
    type IntoIter = std::slice::Iter<'a, Place>;

    fn into_iter(self) -> Self::IntoIter {
        self.places.iter()
    }
}

/// Builds the universe using [`synthetic_restaurants`] for the top-up.
#[must_use]
pub fn build_universe(
    batches: &[Vec<Place>],
    excluded_category: &str,
    limits: &PoolLimits,
) -> RestaurantUniverse {
    build_universe_with(batches, excluded_category, limits, synthetic_restaurants)
}

/// Builds the universe from raw batches with a caller-supplied generator.
///
/// 1. Batches are concatenated in order.
/// 2. Places whose category equals `excluded_category` are dropped.
/// 3. The first place per identity is kept; identity-less places are always
///    kept.
/// 4. If fewer than `limits.min_pool` remain, `generate` is asked for
///    `max_candidates - count` more, appended after the live places.
pub fn build_universe_with<G>(
    batches: &[Vec<Place>],
    excluded_category: &str,
    limits: &PoolLimits,
    generate: G,
) -> RestaurantUniverse
where
    G: FnOnce(usize) -> Vec<Place>,
{
    let raw_count: usize = batches.iter().map(Vec::len).sum();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut places: Vec<Place> = Vec::new();
    for place in batches.iter().flatten() {
        if place.has_category(excluded_category) {
            continue;
        }
        if let Some(id) = place.identity.as_deref() {
            if !seen.insert(id) {
                continue;
            }
        }
        places.push(place.clone());
    }

    let live_count = places.len();
    let mut synthetic_count = 0;
    if live_count < limits.min_pool {
        let missing = limits.max_candidates.saturating_sub(live_count);
        let synthetic = generate(missing);
        synthetic_count = synthetic.len();
        places.extend(synthetic);
        tracing::info!(
            live_count,
            synthetic_count,
            min_pool = limits.min_pool,
            "restaurant pool below floor, topped up with synthetic places"
        );
    }

    tracing::debug!(
        raw_count,
        live_count,
        total = places.len(),
        excluded_category,
        "restaurant universe built"
    );

    RestaurantUniverse {
        places,
        synthetic_count,
    }
}

#[cfg(test)]
mod tests {
    use lunchwheel_core::is_synthetic;

    use super::*;

    fn live(id: &str, name: &str) -> Place {
        Place::new(name).with_identity(id).with_category("FD6")
    }

    fn cafe(id: &str, name: &str) -> Place {
        Place::new(name).with_identity(id).with_category("CE7")
    }

    fn names(universe: &RestaurantUniverse) -> Vec<&str> {
        universe.iter().map(|p| p.name.as_str()).collect()
    }

    fn many(prefix: &str, count: usize) -> Vec<Place> {
        (0..count)
            .map(|i| live(&format!("{prefix}{i}"), &format!("{prefix} {i}")))
            .collect()
    }

    #[test]
    fn concatenates_in_first_seen_order_and_dedups_by_identity() {
        let batches = vec![
            vec![live("1", "a"), live("2", "b"), live("3", "c")],
            vec![live("2", "b again"), live("4", "d"), live("5", "e")],
            vec![live("1", "a again"), live("6", "f")],
        ];
        let universe = build_universe(&batches, "CE7", &PoolLimits::default());
        assert_eq!(names(&universe), vec!["a", "b", "c", "d", "e", "f"]);
        assert!(!universe.is_topped_up());
    }

    #[test]
    fn drops_excluded_category() {
        let mut batch = many("r", 5);
        batch.insert(2, cafe("c1", "cafe"));
        let universe = build_universe(&[batch], "CE7", &PoolLimits::default());
        assert_eq!(universe.len(), 5);
        assert!(universe.iter().all(|p| !p.has_category("CE7")));
    }

    #[test]
    fn identityless_places_are_never_deduplicated() {
        let batch = vec![
            Place::new("same"),
            Place::new("same"),
            Place::new("same"),
            live("1", "x"),
            live("2", "y"),
        ];
        let universe = build_universe(&[batch], "CE7", &PoolLimits::default());
        assert_eq!(universe.len(), 5);
        assert_eq!(universe.live_count(), 5);
    }

    #[test]
    fn sparse_pool_is_topped_up_to_max_candidates() {
        let batches = vec![vec![live("1", "a"), live("2", "b")], vec![live("3", "c")]];
        let universe = build_universe(&batches, "CE7", &PoolLimits::default());
        assert_eq!(universe.len(), 15);
        assert_eq!(universe.live_count(), 3);
        assert_eq!(universe.synthetic_count(), 12);
        assert!(universe.is_topped_up());
        assert_eq!(names(&universe)[..3], ["a", "b", "c"]);
        assert!(universe.places()[3..].iter().all(is_synthetic));
        assert_eq!(universe.places()[3].name, "순대국 맛집 1호점");
    }

    #[test]
    fn pool_at_floor_is_not_topped_up() {
        let universe = build_universe(&[many("r", 5)], "CE7", &PoolLimits::default());
        assert_eq!(universe.len(), 5);
        assert_eq!(universe.synthetic_count(), 0);
    }

    #[test]
    fn no_batches_yields_all_synthetic_pool() {
        let universe = build_universe(&[], "CE7", &PoolLimits::default());
        assert_eq!(universe.len(), 15);
        assert_eq!(universe.live_count(), 0);
    }

    #[test]
    fn only_excluded_places_counts_as_empty() {
        let batch = vec![cafe("1", "a"), cafe("2", "b")];
        let universe = build_universe(&[batch], "CE7", &PoolLimits::default());
        assert_eq!(universe.live_count(), 0);
        assert_eq!(universe.synthetic_count(), 15);
    }

    #[test]
    fn builder_is_pure() {
        let batches = vec![
            vec![live("1", "a"), cafe("9", "z"), Place::new("anon")],
            vec![live("1", "dup"), live("2", "b")],
        ];
        let first = build_universe(&batches, "CE7", &PoolLimits::default());
        let second = build_universe(&batches, "CE7", &PoolLimits::default());
        assert_eq!(first, second);
    }

    #[test]
    fn identities_are_unique_in_output() {
        let batches: Vec<Vec<Place>> = (0..4).map(|_| many("r", 20)).collect();
        let universe = build_universe(&batches, "CE7", &PoolLimits::default());
        let mut ids: Vec<&str> = universe
            .iter()
            .filter_map(|p| p.identity.as_deref())
            .collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before);
        assert_eq!(universe.len(), 20);
    }

    #[test]
    fn custom_generator_receives_missing_count() {
        let limits = PoolLimits {
            max_candidates: 8,
            min_pool: 4,
        };
        let mut requested = None;
        let universe = build_universe_with(&[many("r", 3)], "CE7", &limits, |n| {
            requested = Some(n);
            (0..n).map(|i| Place::new(format!("fake {i}"))).collect()
        });
        assert_eq!(requested, Some(5));
        assert_eq!(universe.len(), 8);
    }

    #[test]
    fn floor_holds_for_any_small_input() {
        let limits = PoolLimits::default();
        for live_count in 0..10 {
            let universe = build_universe(&[many("r", live_count)], "CE7", &limits);
            assert!(
                universe.len() >= limits.min_pool.min(5),
                "live_count={live_count} produced {}",
                universe.len()
            );
        }
    }
}
