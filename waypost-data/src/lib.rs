//! HTTP collaborators for the Waypost engine.
//!
//! - [`WikipediaKnowledgeBase`] implements
//!   [`waypost_core::KnowledgeBaseProvider`] over the Wikipedia REST summary
//!   endpoint.
//! - [`OverpassGeoSearch`] implements [`waypost_core::GeoSearchProvider`]
//!   over the OpenStreetMap Overpass API.
//! - [`MokaResolutionCache`] is a bounded, expiring
//!   [`waypost_core::ResolutionCache`].
//!
//! Payloads are decoded into typed structs at this boundary; the pure
//! decoding functions are public so they can be exercised without a
//! network.

#![forbid(unsafe_code)]

pub mod cache;
mod http;
pub mod overpass;
pub mod wikipedia;

pub use cache::MokaResolutionCache;
pub use http::{DEFAULT_USER_AGENT, ProviderBuildError};
pub use overpass::{OverpassConfig, OverpassGeoSearch};
pub use wikipedia::{WikipediaConfig, WikipediaKnowledgeBase};
