//! Query analysis, dynamic weighting and acceptance thresholds.

use geo::Coord;
use waypost_core::{Category, Query, Weights};

use crate::{ScorerConfig, profile::TextProfile};

/// Content tokens at which a query counts as long free text.
pub const LONG_QUERY_TOKENS: usize = 5;
/// Characters at which a query counts as long free text.
pub const LONG_QUERY_CHARS: usize = 40;
/// Characters at or below which a query counts as very short.
pub const SHORT_QUERY_CHARS: usize = 4;

const PROXIMITY_WORDS: &[&str] = &["near", "nearby", "around"];
const PROXIMITY_PHRASES: &[&str] = &["close to", "next to"];
const PROXIMITY_CJK: &[&str] = &["附近", "近く", "근처"];
const EXACT_WORDS: &[&str] = &["exact", "exactly", "specific", "specifically"];
const QUOTE_PAIRS: &[(char, char)] = &[('"', '"'), ('\'', '\''), ('“', '”'), ('«', '»'), ('「', '」')];

/// Everything the scorer needs to know about a query, computed once.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryFeatures {
    /// Tokenised query name.
    pub profile: TextProfile,
    /// Category named by the query, when it names one.
    pub category: Option<Category>,
    /// Caller-supplied location hint.
    pub hint: Option<Coord<f64>>,
    /// The query asks for something near a place.
    pub proximity: bool,
    /// The query asks for an exact match.
    pub exact: bool,
    /// Number of content tokens.
    pub content_tokens: usize,
    /// Number of characters in the trimmed query.
    pub chars: usize,
}

impl QueryFeatures {
    /// Analyse a query.
    ///
    /// # Examples
    /// ```
    /// use waypost_core::{Category, Query};
    /// use waypost_scorer::QueryFeatures;
    ///
    /// let features = QueryFeatures::analyse(&Query::new("temples near Gion"));
    /// assert!(features.proximity);
    /// assert_eq!(features.category, Some(Category::Temple));
    /// ```
    #[must_use]
    pub fn analyse(query: &Query) -> Self {
        let trimmed = query.name.trim();
        let profile = TextProfile::new(trimmed);
        let padded = format!(" {} ", profile.folded());
        let has_word = |words: &[&str]| profile.words().iter().any(|w| words.contains(&w.as_str()));

        let proximity = has_word(PROXIMITY_WORDS)
            || PROXIMITY_PHRASES
                .iter()
                .any(|phrase| padded.contains(&format!(" {phrase} ")))
            || PROXIMITY_CJK.iter().any(|term| trimmed.contains(term));
        let exact = has_word(EXACT_WORDS) || is_quoted(trimmed);
        let category = Category::detect(trimmed).filter(|c| *c != Category::Other);
        let content_tokens = profile.tokens().len();
        Self {
            category,
            hint: query.hint,
            proximity,
            exact,
            content_tokens,
            chars: trimmed.chars().count(),
            profile,
        }
    }

    /// Report whether the query names a type.
    #[must_use]
    pub const fn is_typed(&self) -> bool {
        self.category.is_some()
    }

    /// Report whether the query is long free text.
    #[must_use]
    pub const fn is_long(&self) -> bool {
        self.content_tokens >= LONG_QUERY_TOKENS || self.chars >= LONG_QUERY_CHARS
    }

    /// Report whether the query is very short.
    #[must_use]
    pub const fn is_short(&self) -> bool {
        self.content_tokens <= 1 || self.chars <= SHORT_QUERY_CHARS
    }
}

fn is_quoted(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open), Some(close)) => QUOTE_PAIRS.contains(&(open, close)),
        _ => false,
    }
}

/// Weights adapted to what the query emphasises.
///
/// Starts from the baseline `(0.5, 0.4, 0.1)`. Proximity terms move 0.15
/// from semantic to geographic; long free text moves 0.1 from geographic and
/// 0.05 from type to semantic; a type term moves 0.05 from semantic to type.
///
/// ```
/// use waypost_core::Query;
/// use waypost_scorer::{QueryFeatures, dynamic_weights};
///
/// let weights = dynamic_weights(&QueryFeatures::analyse(&Query::new("cafes nearby")));
/// assert!((weights.geographic - 0.55).abs() < 1e-12);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "weights are shifted between dimensions"
)]
pub fn dynamic_weights(features: &QueryFeatures) -> Weights {
    let Weights {
        mut semantic,
        mut geographic,
        mut type_match,
    } = Weights::default();
    if features.proximity {
        semantic -= 0.15;
        geographic += 0.15;
    }
    if features.is_long() {
        geographic -= 0.1;
        type_match -= 0.05;
        semantic += 0.15;
    }
    if features.is_typed() {
        semantic -= 0.05;
        type_match += 0.05;
    }
    Weights::new(semantic.max(0.0), geographic.max(0.0), type_match.max(0.0))
}

/// Acceptance threshold for a query under the default configuration.
///
/// Exact-match requests win over the short-query relaxation.
#[must_use]
pub fn confidence_threshold(features: &QueryFeatures) -> f64 {
    ScorerConfig::default().threshold_for(features)
}

impl ScorerConfig {
    /// Acceptance threshold for a query under this configuration.
    #[must_use]
    pub const fn threshold_for(&self, features: &QueryFeatures) -> f64 {
        if features.exact {
            self.exact_threshold
        } else if features.is_short() {
            self.short_threshold
        } else {
            self.base_threshold
        }
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point weights"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn features(name: &str) -> QueryFeatures {
        QueryFeatures::analyse(&Query::new(name))
    }

    fn close(a: Weights, b: Weights) -> bool {
        (a.semantic - b.semantic).abs() < 1e-9
            && (a.geographic - b.geographic).abs() < 1e-9
            && (a.type_match - b.type_match).abs() < 1e-9
    }

    #[rstest]
    #[case("Kinkaku-ji Pavilion", Weights::new(0.5, 0.4, 0.1))]
    #[case("coffee near Gion Corner", Weights::new(0.35, 0.55, 0.1))]
    #[case("Buddhist temple", Weights::new(0.45, 0.4, 0.15))]
    #[case(
        "the old covered market hall by the river quay",
        Weights::new(0.6, 0.3, 0.1)
    )]
    fn shifts_weights_by_query_shape(#[case] name: &str, #[case] expected: Weights) {
        let weights = dynamic_weights(&features(name));
        assert!(close(weights, expected), "{name}: {weights:?}");
    }

    #[rstest]
    #[case("Kinkaku-ji Pavilion", 0.6)]
    #[case("exact Kinkaku-ji Pavilion", 0.75)]
    #[case("\"Kinkaku-ji Pavilion\"", 0.75)]
    #[case("「金閣寺」", 0.75)]
    #[case("Louvre", 0.5)]
    #[case("\"Louvre\"", 0.75)]
    fn picks_the_threshold(#[case] name: &str, #[case] expected: f64) {
        assert!((confidence_threshold(&features(name)) - expected).abs() < 1e-12);
    }

    #[rstest]
    #[case("temples near Gion", true)]
    #[case("cafe close to the station", true)]
    #[case("清水寺附近", true)]
    #[case("Nearchus Monument", false)]
    fn detects_proximity(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(features(name).proximity, expected);
    }

    #[rstest]
    fn records_the_hint() {
        let hint = Coord { x: 135.7, y: 35.0 };
        let query = Query::new("Kiyomizu-dera").with_hint(hint);
        assert_eq!(QueryFeatures::analyse(&query).hint, Some(hint));
    }
}
