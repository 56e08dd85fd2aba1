//! Keyword fan-out and merge.

use std::{collections::HashSet, sync::Arc, time::Duration};

use futures_util::future::join_all;
use geo::Coord;
use log::{debug, warn};
use tokio_util::task::AbortOnDropHandle;
use waypost_core::{
    GeoSearchProvider, KeywordSearchRequest, PoiCandidate, ProviderError, is_valid_location,
};

use crate::{DiscoveryError, RankedPoiSet};

/// Default hard timeout applied to each keyword search.
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(8);

/// Tunables for [`Aggregator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Hard timeout for a single keyword search.
    pub search_timeout: Duration,
}

impl DiscoveryConfig {
    /// Override the per-keyword timeout.
    #[must_use]
    pub const fn with_search_timeout(mut self, search_timeout: Duration) -> Self {
        self.search_timeout = search_timeout;
        self
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            search_timeout: DEFAULT_SEARCH_TIMEOUT,
        }
    }
}

/// One discovery run: where to search, for what, and how much to keep.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryRequest {
    /// Search centre; `x = longitude`, `y = latitude`.
    pub center: Coord<f64>,
    /// Search radius in metres.
    pub radius_metres: f64,
    /// Keywords to search for, one provider call each.
    pub keywords: Vec<String>,
    /// Maximum candidates requested from, and kept per, keyword.
    pub per_keyword_limit: usize,
    /// Maximum POIs in the merged result.
    pub max_results: usize,
}

impl DiscoveryRequest {
    /// Check the request and return the cleaned keyword list.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscoveryError`] describing the first invalid field.
    pub fn validate(&self) -> Result<Vec<String>, DiscoveryError> {
        if !is_valid_location(self.center) {
            return Err(DiscoveryError::InvalidCenter {
                lat: self.center.y,
                lon: self.center.x,
            });
        }
        if !(self.radius_metres.is_finite() && self.radius_metres > 0.0) {
            return Err(DiscoveryError::InvalidRadius {
                radius_metres: self.radius_metres,
            });
        }
        if self.per_keyword_limit == 0 {
            return Err(DiscoveryError::InvalidLimit {
                field: "per_keyword_limit",
            });
        }
        if self.max_results == 0 {
            return Err(DiscoveryError::InvalidLimit {
                field: "max_results",
            });
        }

        let mut seen = HashSet::new();
        let keywords: Vec<String> = self
            .keywords
            .iter()
            .map(|keyword| keyword.trim())
            .filter(|keyword| !keyword.is_empty() && seen.insert(*keyword))
            .map(ToOwned::to_owned)
            .collect();
        if keywords.is_empty() {
            return Err(DiscoveryError::EmptyKeywords);
        }
        Ok(keywords)
    }
}

/// A keyword search that contributed no results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordFailure {
    /// The keyword that failed.
    pub keyword: String,
    /// Why it failed.
    pub error: ProviderError,
}

/// Outcome of [`Aggregator::discover`].
#[derive(Debug, Clone, PartialEq)]
pub struct Discovery {
    pois: RankedPoiSet,
    failures: Vec<KeywordFailure>,
    searched: usize,
}

impl Discovery {
    /// The merged, ranked POIs.
    #[must_use]
    pub const fn pois(&self) -> &RankedPoiSet {
        &self.pois
    }

    /// Keyword searches that failed or timed out, in keyword order.
    #[must_use]
    pub fn failures(&self) -> &[KeywordFailure] {
        &self.failures
    }

    /// Number of keyword searches issued.
    #[must_use]
    pub const fn searched(&self) -> usize {
        self.searched
    }

    /// Report whether every keyword search failed.
    #[must_use]
    pub fn all_failed(&self) -> bool {
        self.searched > 0 && self.failures.len() == self.searched
    }

    /// Consume the outcome, returning the POIs.
    #[must_use]
    pub fn into_pois(self) -> RankedPoiSet {
        self.pois
    }
}

/// Fans keyword searches out over a [`GeoSearchProvider`] and merges them.
#[derive(Clone)]
pub struct Aggregator {
    provider: Arc<dyn GeoSearchProvider>,
    config: DiscoveryConfig,
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Aggregator {
    /// Create an aggregator with the default configuration.
    #[must_use]
    pub fn new(provider: Arc<dyn GeoSearchProvider>) -> Self {
        Self {
            provider,
            config: DiscoveryConfig::default(),
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub const fn with_config(mut self, config: DiscoveryConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Search every keyword concurrently and merge the results.
    ///
    /// Each keyword runs on its own Tokio task under
    /// [`DiscoveryConfig::search_timeout`]. Failed, timed-out and panicked
    /// searches are recorded in [`Discovery::failures`] and contribute
    /// nothing. Dropping the returned future aborts outstanding searches.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscoveryError`] when the request is malformed. No
    /// provider call is made in that case.
    pub async fn discover(&self, request: &DiscoveryRequest) -> Result<Discovery, DiscoveryError> {
        let keywords = request.validate()?;
        let searched = keywords.len();
        debug!("discovering with {searched} keyword searches");

        let handles = keywords.iter().map(|keyword| {
            let provider = Arc::clone(&self.provider);
            let search = KeywordSearchRequest {
                keyword: keyword.clone(),
                center: request.center,
                radius_metres: request.radius_metres,
                limit: request.per_keyword_limit,
            };
            let budget = self.config.search_timeout;
            AbortOnDropHandle::new(tokio::spawn(async move {
                search_keyword(provider.as_ref(), &search, budget).await
            }))
        });
        let outcomes = join_all(handles).await;

        let mut candidates = Vec::new();
        let mut failures = Vec::new();
        for (keyword, outcome) in keywords.into_iter().zip(outcomes) {
            let searched_keyword = outcome.unwrap_or_else(|join_error| {
                Err(ProviderError::Aborted {
                    message: join_error.to_string(),
                })
            });
            match searched_keyword {
                Ok(found) => {
                    debug!("keyword search returned {} candidates", found.len());
                    candidates.extend(found);
                }
                Err(error) => {
                    warn!("keyword search failed: {error}");
                    failures.push(KeywordFailure { keyword, error });
                }
            }
        }

        let pois = RankedPoiSet::from_candidates(candidates, request.max_results);
        if failures.len() == searched {
            warn!("all {searched} keyword searches failed");
        }
        debug!("discovery kept {} POIs", pois.len());
        Ok(Discovery {
            pois,
            failures,
            searched,
        })
    }
}

async fn search_keyword(
    provider: &dyn GeoSearchProvider,
    request: &KeywordSearchRequest,
    budget: Duration,
) -> Result<Vec<PoiCandidate>, ProviderError> {
    match tokio::time::timeout(budget, provider.search(request)).await {
        Ok(Ok(mut found)) => {
            found.truncate(request.limit);
            Ok(found)
        }
        Ok(Err(error)) => Err(error),
        Err(_) => Err(ProviderError::timeout(
            format!("search for '{}'", request.keyword),
            budget,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use waypost_core::test_support::{StubGeoSearch, StubReply};

    const CENTER: Coord<f64> = Coord {
        x: 114.1500,
        y: 22.2840,
    };

    fn request(keywords: &[&str]) -> DiscoveryRequest {
        DiscoveryRequest {
            center: CENTER,
            radius_metres: 1_000.0,
            keywords: keywords.iter().map(|k| (*k).to_owned()).collect(),
            per_keyword_limit: 10,
            max_results: 20,
        }
    }

    fn poi(name: &str, address: &str, distance: f64) -> PoiCandidate {
        PoiCandidate::new(name, CENTER, CENTER)
            .with_address(address)
            .with_distance(distance)
    }

    #[fixture]
    fn network_down() -> ProviderError {
        ProviderError::Network {
            url: "http://geo.invalid".to_owned(),
            message: "connection refused".to_owned(),
        }
    }

    fn altered(change: impl FnOnce(&mut DiscoveryRequest)) -> DiscoveryRequest {
        let mut req = request(&["temple"]);
        change(&mut req);
        req
    }

    #[rstest]
    #[case::blank(request(&["  ", ""]), DiscoveryError::EmptyKeywords)]
    #[case::radius(
        altered(|r| r.radius_metres = 0.0),
        DiscoveryError::InvalidRadius { radius_metres: 0.0 }
    )]
    #[case::center(
        altered(|r| r.center = Coord { x: 200.0, y: 0.0 }),
        DiscoveryError::InvalidCenter { lat: 0.0, lon: 200.0 }
    )]
    #[case::max_results(
        altered(|r| r.max_results = 0),
        DiscoveryError::InvalidLimit { field: "max_results" }
    )]
    #[case::per_keyword(
        altered(|r| r.per_keyword_limit = 0),
        DiscoveryError::InvalidLimit { field: "per_keyword_limit" }
    )]
    #[tokio::test]
    async fn rejects_malformed_requests_without_io(
        #[case] bad: DiscoveryRequest,
        #[case] expected: DiscoveryError,
    ) {
        let provider = Arc::new(StubGeoSearch::new());
        let aggregator = Aggregator::new(provider.clone());
        assert_eq!(aggregator.discover(&bad).await, Err(expected));
        assert!(provider.calls().is_empty());
    }

    #[rstest]
    fn validate_trims_and_deduplicates_keywords() {
        let keywords = request(&[" temple ", "museum", "temple", ""]).validate();
        assert_eq!(keywords, Ok(vec!["temple".to_owned(), "museum".to_owned()]));
    }

    #[rstest]
    #[tokio::test]
    async fn merges_keywords_and_removes_duplicates() {
        let provider = StubGeoSearch::new()
            .with_results(
                "temple",
                vec![poi("Man Mo Temple", "124 Hollywood Rd", 50.0)],
            )
            .with_results(
                "landmark",
                vec![
                    poi("Man Mo Temple", "124 Hollywood Rd", 50.0),
                    poi("PMQ", "35 Aberdeen St", 200.0),
                ],
            );
        let aggregator = Aggregator::new(Arc::new(provider));
        let discovery = aggregator
            .discover(&request(&["temple", "landmark"]))
            .await
            .expect("valid request");
        let names: Vec<&str> = discovery.pois().iter().map(PoiCandidate::name).collect();
        assert_eq!(names, vec!["Man Mo Temple", "PMQ"]);
        assert!(discovery.failures().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn failed_keyword_does_not_poison_the_rest(network_down: ProviderError) {
        let provider = StubGeoSearch::new()
            .with_error("museum", network_down.clone())
            .with_results("temple", vec![poi("Man Mo Temple", "", 50.0)]);
        let aggregator = Aggregator::new(Arc::new(provider));
        let discovery = aggregator
            .discover(&request(&["museum", "temple"]))
            .await
            .expect("valid request");
        assert_eq!(discovery.pois().len(), 1);
        assert_eq!(
            discovery.failures(),
            &[KeywordFailure {
                keyword: "museum".to_owned(),
                error: network_down,
            }]
        );
        assert!(!discovery.all_failed());
    }

    #[rstest]
    #[tokio::test]
    async fn reports_when_every_keyword_fails(network_down: ProviderError) {
        let provider = StubGeoSearch::new()
            .with_error("museum", network_down.clone())
            .with_error("temple", network_down);
        let aggregator = Aggregator::new(Arc::new(provider));
        let discovery = aggregator
            .discover(&request(&["museum", "temple"]))
            .await
            .expect("valid request");
        assert!(discovery.pois().is_empty());
        assert!(discovery.all_failed());
        assert_eq!(discovery.searched(), 2);
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn stalled_keyword_times_out() {
        let provider = StubGeoSearch::new()
            .with_reply("museum", StubReply::Stall, Duration::ZERO)
            .with_results("temple", vec![poi("Man Mo Temple", "", 50.0)]);
        let aggregator = Aggregator::new(Arc::new(provider))
            .with_config(DiscoveryConfig::default().with_search_timeout(Duration::from_secs(2)));
        let discovery = aggregator
            .discover(&request(&["museum", "temple"]))
            .await
            .expect("valid request");
        assert_eq!(discovery.pois().len(), 1);
        let failure = discovery.failures().first().expect("one failure");
        assert_eq!(failure.keyword, "museum");
        assert!(failure.error.is_timeout());
    }

    #[rstest]
    #[tokio::test]
    async fn over_long_replies_are_cut_to_the_keyword_limit() {
        let many = (0..15)
            .map(|i| poi(&format!("Stall {i}"), "", f64::from(i)))
            .collect();
        let provider = StubGeoSearch::new().with_results("market", many);
        let aggregator = Aggregator::new(Arc::new(provider));
        let mut req = request(&["market"]);
        req.per_keyword_limit = 4;
        let discovery = aggregator.discover(&req).await.expect("valid request");
        assert_eq!(discovery.pois().len(), 4);
    }

    #[rstest]
    #[tokio::test]
    async fn merged_result_is_truncated_to_max_results() {
        let provider = StubGeoSearch::new()
            .with_results("a", vec![poi("One", "", 1.0), poi("Two", "", 2.0)])
            .with_results("b", vec![poi("Three", "", 3.0), poi("Four", "", 0.5)]);
        let aggregator = Aggregator::new(Arc::new(provider));
        let mut req = request(&["a", "b"]);
        req.max_results = 2;
        let discovery = aggregator.discover(&req).await.expect("valid request");
        let names: Vec<&str> = discovery.pois().iter().map(PoiCandidate::name).collect();
        assert_eq!(names, vec!["Four", "One"]);
    }
}
