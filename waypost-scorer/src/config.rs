//! Tunable floors and thresholds.

/// Named, overridable constants used by [`crate::MatchScorer`].
///
/// # Examples
/// ```
/// use waypost_scorer::ScorerConfig;
///
/// let strict = ScorerConfig::default().with_fast_path_threshold(0.9);
/// assert_eq!(strict.fast_path_threshold, 0.9);
/// assert_eq!(strict.overlap_floor, 0.6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScorerConfig {
    /// Combined score at which an accepted match ends resolution early.
    pub fast_path_threshold: f64,
    /// Semantic floor when at least one token matched.
    pub overlap_floor: f64,
    /// Semantic floor when two or more tokens matched.
    pub strong_overlap_floor: f64,
    /// Type score at or below which a typed query rejects the candidate.
    pub type_guard_floor: f64,
    /// Jaro-Winkler similarity required for a fuzzy token match.
    pub fuzzy_token_threshold: f64,
    /// Acceptance threshold for ordinary queries.
    pub base_threshold: f64,
    /// Acceptance threshold for queries asking for an exact match.
    pub exact_threshold: f64,
    /// Acceptance threshold for very short queries.
    pub short_threshold: f64,
}

impl ScorerConfig {
    /// Override the fast-path threshold.
    #[must_use]
    pub const fn with_fast_path_threshold(mut self, threshold: f64) -> Self {
        self.fast_path_threshold = threshold;
        self
    }

    /// Override both semantic floors.
    #[must_use]
    pub const fn with_overlap_floors(mut self, partial: f64, strong: f64) -> Self {
        self.overlap_floor = partial;
        self.strong_overlap_floor = strong;
        self
    }

    /// Override the type guard floor.
    #[must_use]
    pub const fn with_type_guard_floor(mut self, floor: f64) -> Self {
        self.type_guard_floor = floor;
        self
    }

    /// Override the three acceptance thresholds.
    #[must_use]
    pub const fn with_thresholds(mut self, base: f64, exact: f64, short: f64) -> Self {
        self.base_threshold = base;
        self.exact_threshold = exact;
        self.short_threshold = short;
        self
    }
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            fast_path_threshold: 0.8,
            overlap_floor: 0.6,
            strong_overlap_floor: 0.95,
            type_guard_floor: 0.2,
            fuzzy_token_threshold: 0.9,
            base_threshold: 0.6,
            exact_threshold: 0.75,
            short_threshold: 0.5,
        }
    }
}
