//! Property-based tests for [`MatchScorer`].
//!
//! Every dimension and the combined score stay within `0.0..=1.0`, and the
//! weights either sum to one or are all zero, for arbitrary names, titles and
//! locations.

use geo::Coord;
use proptest::prelude::*;
use waypost_core::{LanguageCandidate, Query};
use waypost_scorer::MatchScorer;

fn coord() -> impl Strategy<Value = Coord<f64>> {
    (-180.0_f64..=180.0, -90.0_f64..=90.0).prop_map(|(x, y)| Coord { x, y })
}

fn name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z '\\-]{0,30}",
        "[\\p{Han}\\p{Hiragana}]{0,8}",
        Just("Congregation Sherith Israel".to_owned()),
        Just("\"Man Mo Temple\" nearby".to_owned()),
    ]
}

proptest! {
    #[test]
    fn scores_are_bounded(
        query_name in name(),
        title in name(),
        summary in name(),
        hint in proptest::option::of(coord()),
        location in proptest::option::of(coord()),
    ) {
        let mut query = Query::new(query_name);
        query.hint = hint;
        let mut candidate = LanguageCandidate::new("en", title, summary);
        candidate.location = location;

        let score = MatchScorer::default().score(&query, &candidate, None);
        for value in [score.semantic, score.geographic, score.type_match, score.combined] {
            prop_assert!((0.0..=1.0).contains(&value), "{score:?}");
        }
        let weights = score.weights;
        let total = weights.semantic + weights.geographic + weights.type_match;
        prop_assert!(total == 0.0 || (total - 1.0).abs() < 1e-9, "{weights:?}");
        prop_assert!(!score.accepted || score.combined >= score.threshold);
    }
}
