//! Name similarity.
//!
//! Four signals are blended: token overlap, Jaccard similarity, normalised
//! Levenshtein similarity over the folded strings, and trigram Dice overlap.
//! Latin text compares content tokens; CJK text compares character bigrams.

use std::{collections::HashMap, hash::Hash};

use strsim::{jaro_winkler, levenshtein, normalized_levenshtein};

use crate::{ScorerConfig, profile::TextProfile, synonyms::are_synonyms};

/// Minimum token length, in characters, for fuzzy token matching.
pub const FUZZY_MIN_CHARS: usize = 4;

/// Outcome of comparing a query name with an article title.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SemanticScore {
    /// Blended similarity in `0.0..=1.0`.
    pub score: f64,
    /// Levenshtein distance between the folded strings.
    pub edit_distance: usize,
}

/// Which floor the token evidence earns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Evidence {
    None,
    Partial,
    Strong,
}

#[derive(Debug, Clone, Copy)]
struct Signals {
    overlap: f64,
    jaccard: f64,
    evidence: Evidence,
}

/// Compare a query profile with a title profile.
///
/// Identical folded strings score `1.0`. Otherwise the blend
/// `0.4 overlap + 0.2 jaccard + 0.2 levenshtein + 0.2 trigram` is floored at
/// [`ScorerConfig::strong_overlap_floor`] when at least two query tokens
/// matched and at [`ScorerConfig::overlap_floor`] when any token matched.
/// For CJK text a contiguous shared run earns the strong floor and any
/// shared bigram the partial one.
#[must_use]
pub fn semantic_score(
    query: &TextProfile,
    title: &TextProfile,
    config: &ScorerConfig,
) -> SemanticScore {
    let edit_distance = levenshtein(query.folded(), title.folded());
    if query.folded().is_empty() || title.folded().is_empty() {
        return SemanticScore {
            score: 0.0,
            edit_distance,
        };
    }
    if query.folded() == title.folded() {
        return SemanticScore {
            score: 1.0,
            edit_distance,
        };
    }

    let signals = if query.is_cjk() || title.is_cjk() {
        bigram_signals(query, title)
    } else {
        token_signals(query, title, config.fuzzy_token_threshold)
    };
    let blended = blend(
        signals,
        normalized_levenshtein(query.folded(), title.folded()),
        trigram_dice(query.folded(), title.folded()),
    );
    let floor = match signals.evidence {
        Evidence::Strong => config.strong_overlap_floor,
        Evidence::Partial => config.overlap_floor,
        Evidence::None => 0.0,
    };
    SemanticScore {
        score: blended.max(floor).clamp(0.0, 1.0),
        edit_distance,
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "the semantic blend is a weighted sum of unit-interval signals"
)]
fn blend(signals: Signals, levenshtein: f64, trigram: f64) -> f64 {
    0.4 * signals.overlap + 0.2 * signals.jaccard + 0.2 * levenshtein + 0.2 * trigram
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "token and n-gram counts are small enough to convert exactly"
)]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64
}

fn token_signals(query: &TextProfile, title: &TextProfile, fuzzy_threshold: f64) -> Signals {
    let q = query.tokens().len();
    let t = title.tokens().len();
    let matched = greedy_matches(query.tokens(), title.tokens(), fuzzy_threshold);
    let evidence = if matched >= 2 {
        Evidence::Strong
    } else if matched > 0 {
        Evidence::Partial
    } else {
        Evidence::None
    };
    Signals {
        overlap: ratio(2 * matched, q + t),
        jaccard: ratio(matched, (q + t).saturating_sub(matched)),
        evidence,
    }
}

/// Pair query tokens with title tokens one-to-one.
///
/// Each query token, in order, takes the first unused exact match, else the
/// first unused synonym, else the unused token with the highest Jaro-Winkler
/// similarity at or above `fuzzy_threshold`.
fn greedy_matches(query: &[String], title: &[String], fuzzy_threshold: f64) -> usize {
    let mut used = vec![false; title.len()];
    let mut matched = 0;
    for token in query {
        let free = || {
            title
                .iter()
                .zip(&used)
                .enumerate()
                .filter(|(_, (_, taken))| !**taken)
                .map(|(index, (candidate, _))| (index, candidate))
        };
        let pick = free()
            .find(|(_, candidate)| *candidate == token)
            .or_else(|| free().find(|(_, candidate)| are_synonyms(token, candidate)))
            .or_else(|| {
                free()
                    .filter(|(_, candidate)| is_fuzzy_pair(token, candidate))
                    .map(|(index, candidate)| (index, jaro_winkler(token, candidate)))
                    .filter(|(_, similarity)| *similarity >= fuzzy_threshold)
                    .max_by(|a, b| a.1.total_cmp(&b.1))
                    .map(|(index, _)| (index, token))
            })
            .map(|(index, _)| index);
        if let Some(slot) = pick.and_then(|index| used.get_mut(index)) {
            *slot = true;
            matched += 1;
        }
    }
    matched
}

fn is_fuzzy_pair(a: &str, b: &str) -> bool {
    a.chars().count() >= FUZZY_MIN_CHARS && b.chars().count() >= FUZZY_MIN_CHARS
}

fn bigram_signals(query: &TextProfile, title: &TextProfile) -> Signals {
    let query_bigrams = query.bigrams();
    let title_bigrams = title.bigrams();
    let shared = shared_count(&query_bigrams, &title_bigrams);
    let total = query_bigrams.len() + title_bigrams.len();

    let evidence = if contains_run(query.compact(), title.compact()) {
        Evidence::Strong
    } else if shared > 0 {
        Evidence::Partial
    } else {
        Evidence::None
    };
    Signals {
        overlap: ratio(2 * shared, total),
        jaccard: ratio(shared, total.saturating_sub(shared)),
        evidence,
    }
}

/// Report whether the shorter sequence, at least two characters long,
/// appears contiguously in the longer.
fn contains_run(a: &[char], b: &[char]) -> bool {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    short.len() >= 2 && long.windows(short.len()).any(|window| window == short)
}

/// Size of the multiset intersection of `a` and `b`.
fn shared_count<T: Eq + Hash + Copy>(a: &[T], b: &[T]) -> usize {
    let mut remaining: HashMap<T, usize> = HashMap::new();
    for item in b {
        *remaining.entry(*item).or_default() += 1;
    }
    a.iter()
        .filter(|item| match remaining.get_mut(*item) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        })
        .count()
}

fn trigrams(text: &str) -> Vec<(char, char, char)> {
    let padded: Vec<char> = format!("  {text} ").chars().collect();
    padded
        .windows(3)
        .filter_map(|window| match window {
            [a, b, c] => Some((*a, *b, *c)),
            _ => None,
        })
        .collect()
}

/// Dice coefficient over padded character trigrams.
#[must_use]
pub fn trigram_dice(a: &str, b: &str) -> f64 {
    let left = trigrams(a);
    let right = trigrams(b);
    ratio(2 * shared_count(&left, &right), left.len() + right.len())
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point scores"
)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn config() -> ScorerConfig {
        ScorerConfig::default()
    }

    fn score(query: &str, title: &str, config: &ScorerConfig) -> f64 {
        semantic_score(&TextProfile::new(query), &TextProfile::new(title), config).score
    }

    #[rstest]
    #[case("Café de Flore", "cafe de flore")]
    #[case("Man Mo Temple", "Man Mo Temple")]
    fn identical_folded_strings_score_one(
        #[case] query: &str,
        #[case] title: &str,
        config: ScorerConfig,
    ) {
        assert!((score(query, title, &config) - 1.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn fuzzy_tokens_earn_the_strong_floor(config: ScorerConfig) {
        let value = score("Congregation Sherith Israel", "Shearith Israel", &config);
        assert!(value >= config.strong_overlap_floor, "got {value}");
    }

    #[rstest]
    fn long_queries_containing_the_title_earn_the_strong_floor(config: ScorerConfig) {
        let value = score("Hong Kong Man Mo Temple Sheung Wan", "Man Mo Temple", &config);
        assert!(value >= config.strong_overlap_floor, "got {value}");
    }

    #[rstest]
    fn synonym_tokens_match(config: ScorerConfig) {
        let value = score("St Paul's Cathedral", "Saint Paul Cathedral", &config);
        assert!(value >= config.strong_overlap_floor, "got {value}");
    }

    #[rstest]
    fn one_shared_token_earns_the_partial_floor(config: ScorerConfig) {
        let value = score("Louvre", "Louvre Pyramid", &config);
        assert!(value >= config.overlap_floor, "got {value}");
    }

    #[rstest]
    fn unrelated_names_score_low(config: ScorerConfig) {
        let value = score("Eiffel Tower", "Kinkaku-ji", &config);
        assert!(value < 0.3, "got {value}");
    }

    #[rstest]
    fn short_tokens_are_not_fuzzy_matched() {
        assert!(!is_fuzzy_pair("mo", "ma"));
        assert_eq!(
            greedy_matches(&["mo".to_owned()], &["ma".to_owned()], 0.0),
            0
        );
    }

    #[rstest]
    fn tokens_are_matched_one_to_one() {
        let query = vec!["israel".to_owned(), "israel".to_owned()];
        let title = vec!["israel".to_owned()];
        assert_eq!(greedy_matches(&query, &title, 0.9), 1);
    }

    #[rstest]
    fn cjk_containment_earns_the_strong_floor(config: ScorerConfig) {
        let value = score("文武廟", "上環文武廟", &config);
        assert!(value >= config.strong_overlap_floor, "got {value}");
    }

    #[rstest]
    fn long_cjk_query_sharing_one_name_earns_the_partial_floor(config: ScorerConfig) {
        let value = score("上環文武廟街市", "文武廟宇", &config);
        assert!(value >= config.overlap_floor, "got {value}");
    }

    #[rstest]
    fn cjk_disjoint_names_score_low(config: ScorerConfig) {
        let value = score("金閣寺", "東京タワー", &config);
        assert!(value < 0.3, "got {value}");
    }

    #[rstest]
    fn empty_title_scores_zero(config: ScorerConfig) {
        assert!(score("Man Mo Temple", "", &config).abs() < f64::EPSILON);
    }

    #[rstest]
    fn trigram_dice_is_one_for_equal_strings() {
        assert!((trigram_dice("abc", "abc") - 1.0).abs() < f64::EPSILON);
        assert!(trigram_dice("abc", "xyz").abs() < f64::EPSILON);
    }
}
