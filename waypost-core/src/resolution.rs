//! Queries, match scores and resolution outcomes.

use geo::Coord;

/// A POI name to resolve, with an optional location hint.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use waypost_core::Query;
///
/// let query = Query::new("Man Mo Temple").with_hint(Coord { x: 114.1504, y: 22.2839 });
/// assert_eq!(query.name, "Man Mo Temple");
/// assert!(query.hint.is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Free-text POI name as entered or discovered.
    pub name: String,
    /// Where the caller believes the POI is.
    pub hint: Option<Coord<f64>>,
}

impl Query {
    /// Build a query without a location hint.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hint: None,
        }
    }

    /// Attach a location hint.
    #[must_use]
    pub const fn with_hint(mut self, hint: Coord<f64>) -> Self {
        self.hint = Some(hint);
        self
    }
}

/// Relative weights of the semantic, geographic and type dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weights {
    /// Weight of the name similarity dimension.
    pub semantic: f64,
    /// Weight of the distance dimension.
    pub geographic: f64,
    /// Weight of the category dimension.
    pub type_match: f64,
}

impl Weights {
    /// Create a weight triple without normalising it.
    #[must_use]
    pub const fn new(semantic: f64, geographic: f64, type_match: f64) -> Self {
        Self {
            semantic,
            geographic,
            type_match,
        }
    }

    /// Scale the weights so they sum to one.
    ///
    /// Negative or non-finite weights count as zero. When nothing remains
    /// the result is all zeros.
    ///
    /// # Examples
    /// ```
    /// use waypost_core::Weights;
    ///
    /// let weights = Weights::new(0.5, 0.0, 0.1).normalised();
    /// assert!((weights.semantic + weights.type_match - 1.0).abs() < 1e-12);
    /// assert_eq!(weights.geographic, 0.0);
    /// ```
    #[must_use]
    pub fn normalised(self) -> Self {
        let clean = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
        let semantic = clean(self.semantic);
        let geographic = clean(self.geographic);
        let type_match = clean(self.type_match);
        let total = semantic + geographic + type_match;
        if total <= 0.0 {
            return Self::new(0.0, 0.0, 0.0);
        }
        Self::new(semantic / total, geographic / total, type_match / total)
    }

    /// Zero the geographic weight and renormalise.
    #[must_use]
    pub fn without_geographic(self) -> Self {
        Self::new(self.semantic, 0.0, self.type_match).normalised()
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::new(0.5, 0.4, 0.1)
    }
}

/// The multi-dimensional score of one knowledge-base candidate.
///
/// Every dimension and `combined` lies in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchScore {
    /// Name similarity.
    pub semantic: f64,
    /// Distance similarity; zero when either location is unknown.
    pub geographic: f64,
    /// Category agreement.
    pub type_match: f64,
    /// Weighted combination of the three dimensions.
    pub combined: f64,
    /// Weights used to compute `combined`.
    pub weights: Weights,
    /// Distance between hint and candidate, when both are known.
    pub distance_metres: Option<f64>,
    /// Levenshtein distance between the folded query and title.
    pub edit_distance: usize,
    /// Acceptance threshold applied to this query.
    pub threshold: f64,
    /// Whether the candidate passed the threshold and type guard.
    pub accepted: bool,
}

/// A successfully resolved knowledge-base article.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    /// Article title.
    pub title: String,
    /// Plain-text summary.
    pub summary: String,
    /// Short type line, when available.
    pub description: Option<String>,
    /// Thumbnail image URL.
    pub thumbnail_url: Option<String>,
    /// Canonical page URL for attribution.
    pub page_url: Option<String>,
    /// Language edition the article came from.
    pub language_code: String,
    /// Score that won the resolution.
    pub score: MatchScore,
}

/// Why a resolution ended without a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UnresolvedReason {
    /// Every lookup missed, failed or timed out.
    NoCandidatesFound,
    /// Articles were found but none was accepted.
    NoAcceptedMatch,
}

impl UnresolvedReason {
    /// Stable machine-readable code shared by both reasons.
    #[must_use]
    pub const fn code(self) -> &'static str {
        "no_match"
    }
}

impl std::fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoCandidatesFound => f.write_str("no article found in any language"),
            Self::NoAcceptedMatch => f.write_str("no article matched with enough confidence"),
        }
    }
}

/// Terminal outcome of a resolution.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", rename_all = "snake_case"))]
pub enum ResolutionResult {
    /// A matching article was found.
    Resolved(Resolution),
    /// Every language was tried without an accepted match.
    Unresolved {
        /// Languages attempted, in priority order.
        tried_languages: Vec<String>,
        /// Why nothing was accepted.
        reason: UnresolvedReason,
    },
}

impl ResolutionResult {
    /// Borrow the resolution when resolved.
    #[must_use]
    pub const fn resolved(&self) -> Option<&Resolution> {
        match self {
            Self::Resolved(resolution) => Some(resolution),
            Self::Unresolved { .. } => None,
        }
    }

    /// Report whether a match was found.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}
