//! Page summary payloads.
//!
//! See: <https://en.wikipedia.org/api/rest_v1/#/Page%20content/get_page_summary__title_>

use geo::Coord;
use serde::Deserialize;
use waypost_core::{LanguageCandidate, ProviderError, is_valid_location};

/// Summary of one page.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryResponse {
    /// Page type: `"standard"`, `"disambiguation"`, `"no-extract"`, ...
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Display title.
    pub title: String,
    /// Plain-text lead extract.
    #[serde(default)]
    pub extract: String,
    /// Short type line from Wikidata, e.g. "Buddhist temple in Kyoto".
    pub description: Option<String>,
    /// Lead image thumbnail.
    pub thumbnail: Option<Thumbnail>,
    /// Article coordinate, when the page has one.
    pub coordinates: Option<Coordinates>,
    /// Canonical page URLs.
    pub content_urls: Option<ContentUrls>,
}

/// Thumbnail image reference.
#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    /// Image URL.
    pub source: String,
}

/// Article coordinate in degrees.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Coordinates {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

/// Page URLs per platform.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentUrls {
    /// Desktop site URLs.
    pub desktop: Option<PageUrls>,
}

/// URLs of one rendering of the page.
#[derive(Debug, Clone, Deserialize)]
pub struct PageUrls {
    /// The article URL.
    pub page: String,
}

impl SummaryResponse {
    /// Report whether the page lists several meanings rather than one place.
    #[must_use]
    pub fn is_disambiguation(&self) -> bool {
        self.kind == "disambiguation"
    }

    /// Convert into a [`LanguageCandidate`] for `language_code`.
    ///
    /// Disambiguation pages yield `None`. Out-of-range coordinates are
    /// dropped.
    #[must_use]
    pub fn into_candidate(self, language_code: &str) -> Option<LanguageCandidate> {
        if self.is_disambiguation() {
            return None;
        }
        let mut candidate = LanguageCandidate::new(language_code, self.title, self.extract);
        candidate.description = self.description.filter(|text| !text.trim().is_empty());
        candidate.thumbnail_url = self.thumbnail.map(|thumbnail| thumbnail.source);
        candidate.location = self
            .coordinates
            .map(|at| Coord { x: at.lon, y: at.lat })
            .filter(|location| is_valid_location(*location));
        candidate.page_url = self
            .content_urls
            .and_then(|urls| urls.desktop)
            .map(|desktop| desktop.page);
        Some(candidate)
    }
}

/// Decode a summary body fetched from the `language_code` edition.
///
/// # Errors
///
/// Returns [`ProviderError::Parse`] when `body` is not a summary payload.
pub fn decode_summary(
    body: &str,
    language_code: &str,
) -> Result<Option<LanguageCandidate>, ProviderError> {
    let summary: SummaryResponse =
        serde_json::from_str(body).map_err(|err| ProviderError::Parse {
            message: err.to_string(),
        })?;
    Ok(summary.into_candidate(language_code))
}
