use geo::Coord;

use crate::{Category, distance_metres, text::dedup_key};

/// A raw point of interest returned by a geo search.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. Values are
/// immutable once built; the builder methods consume and return `self`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use waypost_core::{Category, PoiCandidate};
///
/// let origin = Coord { x: 114.1500, y: 22.2840 };
/// let poi = PoiCandidate::new("Man Mo Temple", Coord { x: 114.1504, y: 22.2839 }, origin)
///     .with_address("124-126 Hollywood Rd")
///     .with_category(Category::Temple);
///
/// assert_eq!(poi.name(), "Man Mo Temple");
/// assert!(poi.distance_metres() < 100.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoiCandidate {
    name: String,
    location: Coord<f64>,
    address: Option<String>,
    category: Category,
    distance_metres: f64,
}

impl PoiCandidate {
    /// Construct a candidate, deriving its distance from `origin`.
    pub fn new(name: impl Into<String>, location: Coord<f64>, origin: Coord<f64>) -> Self {
        Self {
            name: name.into(),
            location,
            address: None,
            category: Category::Other,
            distance_metres: distance_metres(origin, location),
        }
    }

    /// Attach a postal address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        let address = address.into();
        self.address = (!address.trim().is_empty()).then_some(address);
        self
    }

    /// Attach a category.
    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Override the distance, for providers that report their own.
    #[must_use]
    pub const fn with_distance(mut self, distance_metres: f64) -> Self {
        self.distance_metres = distance_metres;
        self
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Geospatial position.
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        self.location
    }

    /// Postal address, when known.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Place category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Distance from the search origin in metres.
    #[must_use]
    pub const fn distance_metres(&self) -> f64 {
        self.distance_metres
    }

    /// Normalised `name|address` key used to merge duplicates.
    #[must_use]
    pub fn dedup_key(&self) -> String {
        dedup_key(&self.name, self.address.as_deref())
    }
}

/// One keyword-scoped geo search, created per fan-out task.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordSearchRequest {
    /// Keyword, usually a category term such as `"temple"`.
    pub keyword: String,
    /// Search origin.
    pub center: Coord<f64>,
    /// Search radius in metres.
    pub radius_metres: f64,
    /// Maximum number of raw results wanted.
    pub limit: usize,
}
