//! Resolution scoring for the Waypost engine.
//!
//! [`MatchScorer`] rates a knowledge-base article against a query along three
//! dimensions and combines them with weights adapted to the query:
//!
//! - **semantic**: how closely the article title matches the query name,
//!   tolerant of accents, spelling variants, synonyms and CJK script;
//! - **geographic**: how close the article's coordinate is to the query's
//!   location hint, scaled by how far the category may sprawl;
//! - **type**: whether the article describes the kind of place the query
//!   names.
//!
//! # Examples
//!
//! ```
//! use waypost_core::{LanguageCandidate, Query};
//! use waypost_scorer::MatchScorer;
//!
//! let scorer = MatchScorer::default();
//! let query = Query::new("Congregation Sherith Israel");
//! let article = LanguageCandidate::new(
//!     "en",
//!     "Shearith Israel",
//!     "Congregation Shearith Israel is the oldest Jewish congregation in the United States.",
//! )
//! .with_description("Synagogue in Manhattan, New York");
//!
//! let score = scorer.score(&query, &article, None);
//! assert!(score.accepted);
//! assert_eq!(score.weights.geographic, 0.0);
//! ```

#![forbid(unsafe_code)]

mod config;
mod features;
pub mod geographic;
pub mod profile;
pub mod semantic;
pub mod synonyms;
pub mod type_match;

use std::cmp::Ordering;

use geo::Coord;
use log::debug;
use waypost_core::{Category, LanguageCandidate, MatchScore, Query, Weights, distance_metres};

pub use config::ScorerConfig;
pub use features::{QueryFeatures, confidence_threshold, dynamic_weights};

use crate::{
    geographic::geographic_score, profile::TextProfile, semantic::semantic_score,
    type_match::type_score,
};

/// Scores knowledge-base articles against queries.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MatchScorer {
    config: ScorerConfig,
}

impl MatchScorer {
    /// Create a scorer with the given configuration.
    #[must_use]
    pub const fn new(config: ScorerConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Score `candidate` against `query`.
    ///
    /// `candidate_location` overrides the article's own coordinate when
    /// given. Analyse the query once with [`QueryFeatures::analyse`] and call
    /// [`MatchScorer::score_features`] when scoring many candidates.
    #[must_use]
    pub fn score(
        &self,
        query: &Query,
        candidate: &LanguageCandidate,
        candidate_location: Option<Coord<f64>>,
    ) -> MatchScore {
        self.score_features(&QueryFeatures::analyse(query), candidate, candidate_location)
    }

    /// Score `candidate` against pre-analysed query features.
    #[must_use]
    pub fn score_features(
        &self,
        features: &QueryFeatures,
        candidate: &LanguageCandidate,
        candidate_location: Option<Coord<f64>>,
    ) -> MatchScore {
        let title = TextProfile::new(&candidate.title);
        let semantic = semantic_score(&features.profile, &title, &self.config);

        let candidate_category = candidate_category(candidate);
        let type_match = type_score(features.category, candidate_category);

        let location = candidate_location.or(candidate.location);
        let distance = features
            .hint
            .zip(location)
            .map(|(hint, at)| distance_metres(hint, at))
            .filter(|d| d.is_finite());
        let footprint = candidate_category
            .or(features.category)
            .unwrap_or(Category::Other);
        let geographic = distance.map_or(0.0, |d| geographic_score(d, footprint));

        let shifted = dynamic_weights(features);
        let weights = if distance.is_none() {
            shifted.without_geographic()
        } else {
            shifted.normalised()
        };
        let combined = combine(semantic.score, geographic, type_match, weights);

        let threshold = self.config.threshold_for(features);
        let guarded = features.is_typed() && type_match <= self.config.type_guard_floor;
        let accepted = combined >= threshold && !guarded;
        debug!(
            "scored {} article: semantic {:.3}, geographic {:.3}, type {:.3}, combined {:.3}, accepted {}",
            candidate.language_code, semantic.score, geographic, type_match, combined, accepted
        );

        MatchScore {
            semantic: semantic.score,
            geographic,
            type_match,
            combined,
            weights,
            distance_metres: distance,
            edit_distance: semantic.edit_distance,
            threshold,
            accepted,
        }
    }

    /// Report whether `score` is accepted and high enough to stop searching.
    #[must_use]
    pub fn is_fast_path(&self, score: &MatchScore) -> bool {
        score.accepted && score.combined >= self.config.fast_path_threshold
    }
}

/// Category of an article, read from its description, then summary, then
/// title.
#[must_use]
pub fn candidate_category(candidate: &LanguageCandidate) -> Option<Category> {
    candidate
        .description
        .as_deref()
        .and_then(Category::detect)
        .or_else(|| Category::detect(&candidate.summary))
        .or_else(|| Category::detect(&candidate.title))
        .filter(|category| *category != Category::Other)
}

#[expect(
    clippy::float_arithmetic,
    reason = "the combined score is a weighted sum"
)]
fn combine(
    semantic: f64,
    geographic: f64,
    type_match: f64,
    weights: Weights,
) -> f64 {
    let sum = weights.semantic * semantic
        + weights.geographic * geographic
        + weights.type_match * type_match;
    if sum.is_finite() {
        sum.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Order two scores by preference; `Greater` means `a` is better.
///
/// Higher `combined` wins; ties go to the nearer candidate (unknown distance
/// counts as farthest), then to the smaller edit distance.
#[must_use]
pub fn compare_scores(a: &MatchScore, b: &MatchScore) -> Ordering {
    let distance = |s: &MatchScore| s.distance_metres.unwrap_or(f64::INFINITY);
    a.combined
        .total_cmp(&b.combined)
        .then_with(|| distance(b).total_cmp(&distance(a)))
        .then_with(|| b.edit_distance.cmp(&a.edit_distance))
}

/// Pick the best accepted entry.
///
/// Entries that were not accepted are ignored. Among equally good entries the
/// earliest wins, so callers control the final tie-break through ordering.
#[must_use]
pub fn select_best<T, I>(entries: I) -> Option<(T, MatchScore)>
where
    I: IntoIterator<Item = (T, MatchScore)>,
{
    entries
        .into_iter()
        .filter(|(_, score)| score.accepted)
        .fold(None, |best, (item, score)| match best {
            Some((_, ref current)) if compare_scores(&score, current) != Ordering::Greater => best,
            _ => Some((item, score)),
        })
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point scores"
)]
