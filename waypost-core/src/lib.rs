//! Core domain types for the Waypost engine.
//!
//! The crate defines the values exchanged between the discovery aggregator,
//! the resolution scorer and the multi-language resolver, together with the
//! boundary traits implemented by external collaborators:
//!
//! - [`GeoSearchProvider`] returns raw POI candidates for a keyword.
//! - [`KnowledgeBaseProvider`] looks up an article by title and language.
//! - [`ResolutionCache`] stores resolutions across calls.
//! - [`RefreshCooldownPolicy`] gates caller-initiated refreshes.
//!
//! Coordinates are WGS84 [`geo::Coord`] values with `x = longitude` and
//! `y = latitude`.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cache;
pub mod category;
pub mod cooldown;
pub mod distance;
pub mod knowledge;
pub mod poi;
pub mod provider;
pub mod resolution;
pub mod text;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use cache::{NoopResolutionCache, ResolutionCache, cache_key};
pub use category::{Category, CategoryFamily};
pub use cooldown::{AlwaysAllow, IntervalCooldown, RefreshCooldownPolicy};
pub use distance::{distance_metres, is_valid_location};
pub use knowledge::LanguageCandidate;
pub use poi::{KeywordSearchRequest, PoiCandidate};
pub use provider::{GeoSearchProvider, KnowledgeBaseProvider, ProviderError};
pub use resolution::{MatchScore, Query, Resolution, ResolutionResult, UnresolvedReason, Weights};
