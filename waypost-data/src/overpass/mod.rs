//! Geo search backed by the OpenStreetMap Overpass API.
//!
//! A keyword search becomes one Overpass QL `around` query. Keywords naming
//! a known kind of place ("museum", "temple", "park", ...) map to OSM tag
//! filters; anything else is matched case-insensitively against `name`.

mod client;
mod query;
mod response;

pub use client::{DEFAULT_ENDPOINT, OverpassConfig, OverpassGeoSearch};
pub use query::build_query;
pub use response::{Element, OverpassResponse, category_from_tags, decode_elements};
