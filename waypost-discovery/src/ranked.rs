//! Distance-ranked, deduplicated POI sets.

use std::collections::HashSet;

use waypost_core::PoiCandidate;

/// An ordered, duplicate-free snapshot of discovered POIs.
///
/// Invariants, upheld by [`RankedPoiSet::from_candidates`]:
/// - items are non-decreasing by `distance_metres`;
/// - no two items share a dedup key;
/// - `len() <= max_size()`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankedPoiSet {
    items: Vec<PoiCandidate>,
    max_size: usize,
}

impl RankedPoiSet {
    /// Merge raw candidates into a ranked set of at most `max_size` items.
    ///
    /// Candidates are stably sorted by distance and walked once, keeping the
    /// first (nearest) candidate for each dedup key. Candidates whose
    /// distance is not finite are discarded.
    #[must_use]
    pub fn from_candidates<I>(candidates: I, max_size: usize) -> Self
    where
        I: IntoIterator<Item = PoiCandidate>,
    {
        let mut working: Vec<PoiCandidate> = candidates
            .into_iter()
            .filter(|candidate| candidate.distance_metres().is_finite())
            .collect();
        working.sort_by(|a, b| a.distance_metres().total_cmp(&b.distance_metres()));

        let mut seen = HashSet::with_capacity(working.len());
        let items = working
            .into_iter()
            .filter(|candidate| seen.insert(candidate.dedup_key()))
            .take(max_size)
            .collect();
        Self { items, max_size }
    }

    /// An empty set with the given capacity bound.
    #[must_use]
    pub const fn empty(max_size: usize) -> Self {
        Self {
            items: Vec::new(),
            max_size,
        }
    }

    /// The ranked items, nearest first.
    #[must_use]
    pub fn items(&self) -> &[PoiCandidate] {
        &self.items
    }

    /// Upper bound on the number of items.
    #[must_use]
    pub const fn max_size(&self) -> usize {
        self.max_size
    }

    /// Number of items.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Report whether the set holds no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the items, nearest first.
    pub fn iter(&self) -> std::slice::Iter<'_, PoiCandidate> {
        self.items.iter()
    }

    /// Consume the set, returning the items.
    #[must_use]
    pub fn into_vec(self) -> Vec<PoiCandidate> {
        self.items
    }
}

impl<'a> IntoIterator for &'a RankedPoiSet {
    type Item = &'a PoiCandidate;
    type IntoIter = std::slice::Iter<'a, PoiCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::{fixture, rstest};

    const ORIGIN: Coord<f64> = Coord { x: 0.0, y: 0.0 };

    fn poi(name: &str, address: Option<&str>, distance: f64) -> PoiCandidate {
        let candidate = PoiCandidate::new(name, ORIGIN, ORIGIN).with_distance(distance);
        match address {
            Some(address) => candidate.with_address(address),
            None => candidate,
        }
    }

    #[fixture]
    fn mixed() -> Vec<PoiCandidate> {
        vec![
            poi("Museum", None, 300.0),
            poi("Temple", Some("1 Road"), 120.0),
            poi("temple", Some("1 road."), 80.0),
            poi("Park", None, 10.0),
            poi("Temple", Some("2 Road"), 200.0),
        ]
    }

    #[rstest]
    fn sorts_by_distance_and_keeps_nearest_duplicate(mixed: Vec<PoiCandidate>) {
        let set = RankedPoiSet::from_candidates(mixed, 10);
        let distances: Vec<f64> = set.iter().map(PoiCandidate::distance_metres).collect();
        assert_eq!(distances, vec![10.0, 80.0, 200.0, 300.0]);
    }

    #[rstest]
    fn same_name_at_different_addresses_is_kept(mixed: Vec<PoiCandidate>) {
        let set = RankedPoiSet::from_candidates(mixed, 10);
        let temples = set
            .iter()
            .filter(|p| p.name().eq_ignore_ascii_case("temple"))
            .count();
        assert_eq!(temples, 2);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(2, 2)]
    #[case(100, 4)]
    fn truncates_after_dedup(mixed: Vec<PoiCandidate>, #[case] max: usize, #[case] expected: usize) {
        let set = RankedPoiSet::from_candidates(mixed, max);
        assert_eq!(set.len(), expected);
        assert_eq!(set.max_size(), max);
    }

    #[rstest]
    fn drops_non_finite_distances() {
        let set = RankedPoiSet::from_candidates(
            vec![poi("A", None, f64::NAN), poi("B", None, f64::INFINITY), poi("C", None, 1.0)],
            10,
        );
        let names: Vec<&str> = set.iter().map(PoiCandidate::name).collect();
        assert_eq!(names, vec!["C"]);
    }

    #[rstest]
    fn equal_distances_keep_input_order() {
        let set = RankedPoiSet::from_candidates(
            vec![poi("First", None, 5.0), poi("Second", None, 5.0)],
            10,
        );
        let names: Vec<&str> = set.iter().map(PoiCandidate::name).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }
}
