//! Property-based tests for [`RankedPoiSet`].
//!
//! # Invariants tested
//!
//! - **Sorted:** items are non-decreasing by distance.
//! - **Nearest duplicate wins:** each dedup key is represented by the minimum
//!   distance among the candidates sharing it.
//! - **Bounded:** the set never exceeds its maximum size.

use std::collections::{HashMap, HashSet};

use geo::Coord;
use proptest::prelude::*;
use waypost_core::PoiCandidate;
use waypost_discovery::RankedPoiSet;

const ORIGIN: Coord<f64> = Coord { x: 0.0, y: 0.0 };

/// Candidates drawn from a small name and address pool so duplicates are common.
fn candidates() -> impl Strategy<Value = Vec<PoiCandidate>> {
    let names = prop::sample::select(vec!["Man Mo Temple", "man mo temple", "PMQ", "Tai Kwun"]);
    let addresses = prop::sample::select(vec!["", "124 Hollywood Rd", "35 Aberdeen St"]);
    prop::collection::vec((names, addresses, 0.0_f64..5_000.0), 0..40).prop_map(|rows| {
        rows.into_iter()
            .map(|(name, address, distance)| {
                PoiCandidate::new(name, ORIGIN, ORIGIN)
                    .with_address(address)
                    .with_distance(distance)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn items_are_sorted_by_distance(input in candidates(), max in 0_usize..50) {
        let set = RankedPoiSet::from_candidates(input, max);
        let distances: Vec<f64> = set.iter().map(PoiCandidate::distance_metres).collect();
        let sorted = distances.windows(2).all(|pair| match pair {
            [a, b] => a <= b,
            _ => true,
        });
        prop_assert!(sorted);
    }

    #[test]
    fn set_never_exceeds_its_bound(input in candidates(), max in 0_usize..50) {
        let set = RankedPoiSet::from_candidates(input, max);
        prop_assert!(set.len() <= max);
    }

    #[test]
    fn each_key_keeps_its_nearest_candidate(input in candidates()) {
        let mut nearest: HashMap<String, f64> = HashMap::new();
        for candidate in &input {
            let entry = nearest.entry(candidate.dedup_key()).or_insert(f64::INFINITY);
            *entry = entry.min(candidate.distance_metres());
        }

        let set = RankedPoiSet::from_candidates(input, usize::MAX);
        let mut seen = HashSet::new();
        for item in &set {
            let key = item.dedup_key();
            prop_assert!(seen.insert(key.clone()), "duplicate key {key}");
            prop_assert_eq!(nearest.get(&key).copied(), Some(item.distance_metres()));
        }
        prop_assert_eq!(seen.len(), nearest.len());
    }
}
