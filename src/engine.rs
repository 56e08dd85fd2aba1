//! The engine facade composing discovery, resolution, caching and cooldown.

use std::{fmt, sync::Arc};

use geo::Coord;
use log::{debug, info};
use waypost_core::{
    AlwaysAllow, GeoSearchProvider, KnowledgeBaseProvider, NoopResolutionCache, Query,
    RefreshCooldownPolicy, ResolutionCache, ResolutionResult, cache_key, is_valid_location,
};
use waypost_discovery::{Aggregator, Discovery, DiscoveryConfig, DiscoveryRequest};
use waypost_resolver::{Resolver, ResolverConfig};
use waypost_scorer::ScorerConfig;

use crate::EngineError;

/// Keywords searched by [`Engine::discover_nearby`] unless configured
/// otherwise.
pub const DEFAULT_KEYWORDS: [&str; 8] = [
    "tourist attraction",
    "museum",
    "temple",
    "church",
    "park",
    "monument",
    "historic site",
    "viewpoint",
];

/// Raw results requested from the geo search per keyword.
pub const DEFAULT_PER_KEYWORD_LIMIT: usize = 20;

/// Configuration for [`Engine`].
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Keywords searched by [`Engine::discover_nearby`].
    pub keywords: Vec<String>,
    /// Raw results requested per keyword.
    pub per_keyword_limit: usize,
    /// Aggregator tunables.
    pub discovery: DiscoveryConfig,
    /// Resolver tunables.
    pub resolver: ResolverConfig,
    /// Scorer tunables used by the resolver.
    pub scorer: ScorerConfig,
}

impl EngineConfig {
    /// Replace the discovery keywords.
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the per-keyword result limit.
    #[must_use]
    pub const fn with_per_keyword_limit(mut self, limit: usize) -> Self {
        self.per_keyword_limit = limit;
        self
    }

    /// Replace the aggregator configuration.
    #[must_use]
    pub const fn with_discovery(mut self, discovery: DiscoveryConfig) -> Self {
        self.discovery = discovery;
        self
    }

    /// Replace the resolver configuration.
    #[must_use]
    pub fn with_resolver(mut self, resolver: ResolverConfig) -> Self {
        self.resolver = resolver;
        self
    }

    /// Replace the scorer configuration.
    #[must_use]
    pub const fn with_scorer(mut self, scorer: ScorerConfig) -> Self {
        self.scorer = scorer;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.map(str::to_owned).to_vec(),
            per_keyword_limit: DEFAULT_PER_KEYWORD_LIMIT,
            discovery: DiscoveryConfig::default(),
            resolver: ResolverConfig::default(),
            scorer: ScorerConfig::default(),
        }
    }
}

/// Builder for [`Engine`].
pub struct EngineBuilder {
    geo_search: Arc<dyn GeoSearchProvider>,
    knowledge_base: Arc<dyn KnowledgeBaseProvider>,
    cache: Arc<dyn ResolutionCache>,
    cooldown: Arc<dyn RefreshCooldownPolicy>,
    config: EngineConfig,
}

impl fmt::Debug for EngineBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl EngineBuilder {
    /// Use `cache` for resolutions instead of [`NoopResolutionCache`].
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn ResolutionCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Gate refreshes with `cooldown` instead of [`AlwaysAllow`].
    #[must_use]
    pub fn with_cooldown(mut self, cooldown: Arc<dyn RefreshCooldownPolicy>) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Replace the engine configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Assemble the engine.
    #[must_use]
    pub fn build(self) -> Engine {
        let aggregator = Aggregator::new(self.geo_search).with_config(self.config.discovery);
        let resolver = Resolver::new(self.knowledge_base)
            .with_config(self.config.resolver.clone())
            .with_scorer_config(self.config.scorer);
        Engine {
            aggregator,
            resolver,
            cache: self.cache,
            cooldown: self.cooldown,
            config: self.config,
        }
    }
}

/// Discovers POIs near a location and resolves POI names to articles.
///
/// The engine keeps no mutable state of its own; cross-call memory lives in
/// the injected cache and cooldown policy.
#[derive(Clone)]
pub struct Engine {
    aggregator: Aggregator,
    resolver: Resolver,
    cache: Arc<dyn ResolutionCache>,
    cooldown: Arc<dyn RefreshCooldownPolicy>,
    config: EngineConfig,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("aggregator", &self.aggregator)
            .field("resolver", &self.resolver)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Start building an engine over the two external collaborators.
    #[must_use]
    pub fn builder(
        geo_search: Arc<dyn GeoSearchProvider>,
        knowledge_base: Arc<dyn KnowledgeBaseProvider>,
    ) -> EngineBuilder {
        EngineBuilder {
            geo_search,
            knowledge_base,
            cache: Arc::new(NoopResolutionCache),
            cooldown: Arc::new(AlwaysAllow),
            config: EngineConfig::default(),
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Discover POIs within `radius_metres` of `center` using the configured
    /// keywords.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Discovery`] when the request is malformed. A
    /// provider outage is not an error; see [`Discovery::all_failed`].
    pub async fn discover_nearby(
        &self,
        center: Coord<f64>,
        radius_metres: f64,
        max_results: usize,
    ) -> Result<Discovery, EngineError> {
        self.discover_with_keywords(center, radius_metres, &self.config.keywords, max_results)
            .await
    }

    /// Discover POIs using an explicit keyword list.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Discovery`] when the request is malformed.
    pub async fn discover_with_keywords<S: AsRef<str>>(
        &self,
        center: Coord<f64>,
        radius_metres: f64,
        keywords: &[S],
        max_results: usize,
    ) -> Result<Discovery, EngineError> {
        let request = DiscoveryRequest {
            center,
            radius_metres,
            keywords: keywords
                .iter()
                .map(|keyword| keyword.as_ref().to_owned())
                .collect(),
            per_keyword_limit: self.config.per_keyword_limit,
            max_results,
        };
        let discovery = self.aggregator.discover(&request).await?;
        info!(
            "discovered {} POIs from {} keyword searches",
            discovery.pois().len(),
            discovery.searched()
        );
        Ok(discovery)
    }

    /// Re-run [`Engine::discover_nearby`] on behalf of `session_id`, subject to
    /// the refresh cooldown.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CooldownActive`] when the session refreshed too
    /// recently, or [`EngineError::Discovery`] when the request is malformed.
    pub async fn refresh_nearby(
        &self,
        session_id: &str,
        center: Coord<f64>,
        radius_metres: f64,
        max_results: usize,
    ) -> Result<Discovery, EngineError> {
        self.check_cooldown(session_id)?;
        self.discover_nearby(center, radius_metres, max_results).await
    }

    /// Resolve the POI `name` to a knowledge-base article.
    ///
    /// Resolved results are cached under [`cache_key`]; unresolved ones are
    /// not, so a later call may succeed once the knowledge base answers.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyQuery`] or [`EngineError::InvalidHint`] for
    /// malformed input and [`EngineError::CooldownActive`] when the session
    /// is cooling down. Provider failures never surface as errors.
    pub async fn resolve_poi(
        &self,
        session_id: &str,
        name: &str,
        hint: Option<Coord<f64>>,
    ) -> Result<ResolutionResult, EngineError> {
        let query = validate_query(name, hint)?;
        self.check_cooldown(session_id)?;

        let key = cache_key(&query.name, query.hint);
        if let Some(cached) = self.cache.get(&key) {
            debug!("resolution cache hit for '{key}'");
            return Ok(cached);
        }

        let result = self.resolver.resolve(&query).await;
        if result.is_resolved() {
            self.cache.put(key, result.clone());
        }
        Ok(result)
    }

    fn check_cooldown(&self, session_id: &str) -> Result<(), EngineError> {
        if self.cooldown.allow(session_id) {
            Ok(())
        } else {
            Err(EngineError::CooldownActive {
                session_id: session_id.to_owned(),
            })
        }
    }
}

fn validate_query(name: &str, hint: Option<Coord<f64>>) -> Result<Query, EngineError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(EngineError::EmptyQuery);
    }
    let query = Query::new(trimmed);
    match hint {
        Some(location) if !is_valid_location(location) => Err(EngineError::InvalidHint {
            lat: location.y,
            lon: location.x,
        }),
        Some(location) => Ok(query.with_hint(location)),
        None => Ok(query),
    }
}
