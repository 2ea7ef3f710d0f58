//! Per-round candidate sampling.

use lunchwheel_core::Place;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::WheelError;
use crate::pool::RestaurantUniverse;

/// The places on the wheel for one round, in sector order.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSet {
    places: Vec<Place>,
}

impl CandidateSet {
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

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Place> {
        self.places.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Place> {
        self.places.iter()
    }
}

impl From<Vec<Place>> for CandidateSet {
    fn from(places: Vec<Place>) -> Self {
        Self { places }
    }
}

/// Draws a fresh candidate set: a uniform random permutation of the
/// universe truncated to `min(max_candidates, |universe|)`.
///
/// Uses a Fisher–Yates shuffle, so every ordering is equally likely.
///
/// # Errors
///
/// Returns [`WheelError::EmptyUniverse`] if the universe has no places.
pub fn sample<R: Rng + ?Sized>(
    universe: &RestaurantUniverse,
    max_candidates: usize,
    rng: &mut R,
) -> Result<CandidateSet, WheelError> {
    if universe.is_empty() {
        return Err(WheelError::EmptyUniverse);
    }

    let mut places = universe.places().to_vec();
    places.shuffle(rng);
    places.truncate(max_candidates.min(universe.len()));

    tracing::debug!(
        universe = universe.len(),
        candidates = places.len(),
        "candidate set drawn"
    );
    Ok(CandidateSet { places })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::pool::{build_universe, PoolLimits};

    fn universe_of(count: usize) -> RestaurantUniverse {
        let batch: Vec<Place> = (0..count)
            .map(|i| Place::new(format!("place {i}")).with_identity(i.to_string()))
            .collect();
        let limits = PoolLimits {
            max_candidates: 15,
            min_pool: 1,
        };
        build_universe(&[batch], "CE7", &limits)
    }

    #[test]
    fn empty_universe_is_rejected() {
        let limits = PoolLimits {
            max_candidates: 0,
            min_pool: 1,
        };
        let empty = build_universe(&[], "CE7", &limits);
        assert!(empty.is_empty());
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sample(&empty, 15, &mut rng), Err(WheelError::EmptyUniverse));
    }

    #[test]
    fn sample_size_is_min_of_cap_and_universe() {
        let mut rng = StdRng::seed_from_u64(7);
        for count in [1, 4, 15, 16, 60] {
            let universe = universe_of(count);
            let set = sample(&universe, 15, &mut rng).unwrap();
            assert_eq!(set.len(), count.min(15), "universe of {count}");
        }
    }

    #[test]
    fn sampled_places_are_distinct_members() {
        let universe = universe_of(60);
        let mut rng = StdRng::seed_from_u64(11);
        let set = sample(&universe, 15, &mut rng).unwrap();
        let ids: HashSet<&str> = set
            .iter()
            .map(|p| p.identity.as_deref().unwrap())
            .collect();
        assert_eq!(ids.len(), 15);
        assert!(set.iter().all(|p| universe.places().contains(p)));
    }

    #[test]
    fn redraws_are_independent() {
        let universe = universe_of(60);
        let mut rng = StdRng::seed_from_u64(3);
        let first = sample(&universe, 15, &mut rng).unwrap();
        let second = sample(&universe, 15, &mut rng).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn same_seed_reproduces_draw() {
        let universe = universe_of(30);
        let a = sample(&universe, 15, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = sample(&universe, 15, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn every_position_is_reachable_by_every_place() {
        // 3 places, 3 slots: each place should land in each slot about a
        // third of the time under a fair shuffle.
        let universe = universe_of(3);
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts = [[0u32; 3]; 3];
        let rounds = 6000;
        for _ in 0..rounds {
            let set = sample(&universe, 3, &mut rng).unwrap();
            for (slot, place) in set.iter().enumerate() {
                let id: usize = place.identity.as_deref().unwrap().parse().unwrap();
                counts[id][slot] += 1;
            }
        }
        for row in counts {
            for count in row {
                assert!(
                    (1700..=2300).contains(&count),
                    "slot frequency {count} far from {}",
                    rounds / 3
                );
            }
        }
    }
}
