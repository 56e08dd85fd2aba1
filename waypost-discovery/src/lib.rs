//! Deduplicating POI discovery for the Waypost engine.
//!
//! [`Aggregator::discover`] fans one geo search out per keyword, waits for
//! every search to finish or time out, and merges the results into a
//! [`RankedPoiSet`]: sorted by distance, free of duplicates, and truncated to
//! the requested size.
//!
//! # Examples
//!
//! ```
//! use geo::Coord;
//! use waypost_core::PoiCandidate;
//! use waypost_discovery::RankedPoiSet;
//!
//! let origin = Coord { x: 114.15, y: 22.28 };
//! let near = PoiCandidate::new("Man Mo Temple", origin, origin).with_distance(40.0);
//! let far = PoiCandidate::new("Man Mo Temple", origin, origin).with_distance(90.0);
//! let set = RankedPoiSet::from_candidates(vec![far, near], 10);
//! assert_eq!(set.len(), 1);
//! assert_eq!(set.items()[0].distance_metres(), 40.0);
//! ```

#![forbid(unsafe_code)]

mod aggregator;
mod error;
mod ranked;

pub use aggregator::{Aggregator, Discovery, DiscoveryConfig, DiscoveryRequest, KeywordFailure};
pub use error::DiscoveryError;
pub use ranked::RankedPoiSet;
