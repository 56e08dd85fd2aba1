//! Facade crate for the Waypost POI discovery and resolution engine.
//!
//! [`Engine`] composes the deduplicating [`Aggregator`] and the
//! multi-language [`Resolver`] with an injected [`ResolutionCache`] and
//! [`RefreshCooldownPolicy`]. The crate also re-exports the domain types
//! callers need so most users depend on this crate alone.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use waypost_engine::{EngineConfig, ResolverConfig};
//!
//! let config = EngineConfig::default()
//!     .with_keywords(["temple", "museum"])
//!     .with_resolver(ResolverConfig::default().with_lookup_timeout(Duration::from_secs(3)));
//! assert_eq!(config.keywords, ["temple", "museum"]);
//! ```

#![forbid(unsafe_code)]

mod engine;
mod error;

pub use engine::{DEFAULT_KEYWORDS, DEFAULT_PER_KEYWORD_LIMIT, Engine, EngineBuilder, EngineConfig};
pub use error::EngineError;

pub use waypost_core::{
    AlwaysAllow, Category, GeoSearchProvider, IntervalCooldown, KnowledgeBaseProvider,
    LanguageCandidate, MatchScore, NoopResolutionCache, PoiCandidate, ProviderError, Query,
    RefreshCooldownPolicy, Resolution, ResolutionCache, ResolutionResult, UnresolvedReason,
    Weights, cache_key,
};
pub use waypost_discovery::{
    Aggregator, Discovery, DiscoveryConfig, DiscoveryError, KeywordFailure, RankedPoiSet,
};
pub use waypost_resolver::{LanguagePriority, Resolver, ResolverConfig};
pub use waypost_scorer::{MatchScorer, ScorerConfig};

#[cfg(feature = "test-support")]
pub use waypost_core::test_support;
