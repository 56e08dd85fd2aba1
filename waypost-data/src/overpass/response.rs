//! Overpass JSON payloads and their conversion into POI candidates.

use std::collections::HashMap;

use geo::Coord;
use log::debug;
use serde::Deserialize;
use waypost_core::{Category, PoiCandidate, ProviderError, is_valid_location};

/// Top-level Overpass response.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponse {
    /// Matched elements.
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Server remark; set when the query failed at runtime.
    pub remark: Option<String>,
}

/// One node, way or relation.
#[derive(Debug, Clone, Deserialize)]
pub struct Element {
    /// `"node"`, `"way"` or `"relation"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// OSM identifier.
    pub id: u64,
    /// Node latitude.
    pub lat: Option<f64>,
    /// Node longitude.
    pub lon: Option<f64>,
    /// Centre of a way or relation (`out center`).
    pub center: Option<Center>,
    /// OSM tags.
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// Centre point of a way or relation.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Center {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

impl Element {
    /// The element's coordinate: its own for nodes, the centre otherwise.
    #[must_use]
    pub fn location(&self) -> Option<Coord<f64>> {
        let (lat, lon) = match (self.lat, self.lon, self.center) {
            (Some(lat), Some(lon), _) => (lat, lon),
            (_, _, Some(center)) => (center.lat, center.lon),
            _ => return None,
        };
        Some(Coord { x: lon, y: lat }).filter(|location| is_valid_location(*location))
    }

    /// Single-line address assembled from `addr:*` tags.
    #[must_use]
    pub fn address(&self) -> Option<String> {
        if let Some(full) = self.tag("addr:full") {
            return Some(full.to_owned());
        }
        let street = match (self.tag("addr:housenumber"), self.tag("addr:street")) {
            (Some(number), Some(street)) => Some(format!("{number} {street}")),
            (None, Some(street)) => Some(street.to_owned()),
            _ => None,
        };
        let parts: Vec<String> = street
            .into_iter()
            .chain(self.tag("addr:city").map(ToOwned::to_owned))
            .collect();
        (!parts.is_empty()).then(|| parts.join(", "))
    }

    /// Convert into a candidate measured from `origin`.
    ///
    /// Elements without a name or a valid coordinate are skipped.
    #[must_use]
    pub fn into_candidate(self, origin: Coord<f64>) -> Option<PoiCandidate> {
        let name = self.tag("name")?.to_owned();
        let location = self.location()?;
        let category = category_from_tags(&self.tags)
            .or_else(|| Category::detect(&name))
            .unwrap_or(Category::Other);
        let candidate = PoiCandidate::new(name, location, origin).with_category(category);
        Some(match self.address() {
            Some(address) => candidate.with_address(address),
            None => candidate,
        })
    }

    fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }
}

/// Map OSM tags onto a [`Category`].
#[must_use]
pub fn category_from_tags<S>(tags: &HashMap<String, String, S>) -> Option<Category>
where
    S: std::hash::BuildHasher,
{
    let get = |key: &str| tags.get(key).map(String::as_str);
    if get("amenity") == Some("place_of_worship") {
        return Some(match get("religion") {
            Some("christian") => Category::Church,
            Some("muslim") => Category::Mosque,
            Some("jewish") => Category::Synagogue,
            Some("shinto") => Category::Shrine,
            _ => Category::Temple,
        });
    }
    let by_value = match (get("tourism"), get("historic"), get("leisure")) {
        (Some("museum"), _, _) => Some(Category::Museum),
        (Some("gallery"), _, _) => Some(Category::Gallery),
        (Some("viewpoint"), _, _) => Some(Category::Viewpoint),
        (_, Some("castle" | "fort"), _) => Some(Category::Castle),
        (_, Some("monument" | "memorial"), _) => Some(Category::Monument),
        (_, Some("monastery"), _) => Some(Category::Monastery),
        (_, Some(_), _) => Some(Category::Historic),
        (_, _, Some("park")) => Some(Category::Park),
        (_, _, Some("garden")) => Some(Category::Garden),
        (Some("hotel" | "hostel" | "guest_house"), _, _) => Some(Category::Commercial),
        (Some("attraction"), _, _) => Some(Category::Landmark),
        _ => None,
    };
    by_value.or_else(|| match (get("natural"), get("man_made"), get("amenity")) {
        (Some("beach"), _, _) => Some(Category::Beach),
        (Some("peak" | "volcano"), _, _) => Some(Category::Mountain),
        (Some("water"), _, _) => Some(Category::Lake),
        (_, Some("tower"), _) => Some(Category::Tower),
        (_, Some("bridge"), _) => Some(Category::Bridge),
        (_, _, Some("marketplace")) => Some(Category::Market),
        (_, _, Some("bank" | "restaurant" | "cafe" | "fast_food" | "bar" | "pub")) => {
            Some(Category::Commercial)
        }
        _ if tags.contains_key("shop") => Some(Category::Commercial),
        _ if get("boundary") == Some("national_park") => Some(Category::NationalPark),
        _ => None,
    })
}

/// Decode an Overpass body into candidates measured from `origin`.
///
/// # Errors
///
/// Returns [`ProviderError::Parse`] for a malformed body and
/// [`ProviderError::Service`] when Overpass reports a runtime failure
/// without returning any element.
pub fn decode_elements(body: &str, origin: Coord<f64>) -> Result<Vec<PoiCandidate>, ProviderError> {
    let response: OverpassResponse =
        serde_json::from_str(body).map_err(|err| ProviderError::Parse {
            message: err.to_string(),
        })?;
    if response.elements.is_empty()
        && let Some(remark) = response.remark
    {
        return Err(ProviderError::Service {
            code: "overpass_remark".to_owned(),
            message: remark,
        });
    }
    let total = response.elements.len();
    let candidates: Vec<PoiCandidate> = response
        .elements
        .into_iter()
        .filter_map(|element| element.into_candidate(origin))
        .collect();
    debug!("decoded {} of {total} Overpass elements", candidates.len());
    Ok(candidates)
}
