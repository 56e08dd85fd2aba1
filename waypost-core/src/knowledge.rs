//! Typed knowledge-base articles.

use geo::Coord;

/// An article returned by one per-language knowledge-base lookup.
///
/// Providers decode their wire payloads into this struct once, at the
/// boundary, so the scorer never handles untyped maps.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LanguageCandidate {
    /// Language code of the edition the article came from (e.g. `"en"`).
    pub language_code: String,
    /// Canonical article title.
    pub title: String,
    /// Plain-text summary.
    pub summary: String,
    /// Short type line such as `"Buddhist temple in Kyoto"`.
    pub description: Option<String>,
    /// Thumbnail image URL.
    pub thumbnail_url: Option<String>,
    /// Article coordinates, when the article is geotagged.
    pub location: Option<Coord<f64>>,
    /// Canonical page URL used for attribution.
    pub page_url: Option<String>,
}

impl LanguageCandidate {
    /// Construct a candidate with the mandatory fields.
    pub fn new(
        language_code: impl Into<String>,
        title: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            language_code: language_code.into(),
            title: title.into(),
            summary: summary.into(),
            ..Self::default()
        }
    }

    /// Attach a short description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a thumbnail URL.
    #[must_use]
    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    /// Attach article coordinates.
    #[must_use]
    pub const fn with_location(mut self, location: Coord<f64>) -> Self {
        self.location = Some(location);
        self
    }

    /// Attach the canonical page URL.
    #[must_use]
    pub fn with_page_url(mut self, url: impl Into<String>) -> Self {
        self.page_url = Some(url.into());
        self
    }
}
