//! HTTP client for the Overpass interpreter endpoint.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Url};
use waypost_core::{GeoSearchProvider, KeywordSearchRequest, PoiCandidate, ProviderError};

use super::{query::build_query, response::decode_elements};
use crate::http::{DEFAULT_USER_AGENT, ProviderBuildError, build_client, convert_reqwest_error};

/// Public Overpass interpreter.
pub const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

const DEFAULT_TIMEOUT_SECS: u64 = 25;

/// Configuration for [`OverpassGeoSearch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverpassConfig {
    /// Interpreter endpoint.
    pub base_url: String,
    /// Client-side request timeout; also sent as the server-side budget.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ENDPOINT.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl OverpassConfig {
    /// Create a configuration for the given endpoint.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// [`GeoSearchProvider`] over the Overpass API.
#[derive(Debug, Clone)]
pub struct OverpassGeoSearch {
    client: Client,
    endpoint: Url,
    config: OverpassConfig,
}

impl OverpassGeoSearch {
    /// Create a provider for the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new() -> Result<Self, ProviderBuildError> {
        Self::with_config(OverpassConfig::default())
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the endpoint
    /// does not parse.
    pub fn with_config(config: OverpassConfig) -> Result<Self, ProviderBuildError> {
        let endpoint = Url::parse(&config.base_url).map_err(|err| ProviderBuildError::BaseUrl {
            url: config.base_url.clone(),
            message: err.to_string(),
        })?;
        let client = build_client(&config.user_agent, config.timeout)?;
        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &OverpassConfig {
        &self.config
    }
}

#[async_trait]
impl GeoSearchProvider for OverpassGeoSearch {
    async fn search(
        &self,
        request: &KeywordSearchRequest,
    ) -> Result<Vec<PoiCandidate>, ProviderError> {
        let timeout = self.config.timeout;
        let query = build_query(request, timeout.as_secs().max(1));
        debug!("overpass query for '{}':\n{query}", request.keyword);
        let url = self.endpoint.as_str();
        let body = self
            .client
            .post(self.endpoint.clone())
            .form(&[("data", query.as_str())])
            .send()
            .await
            .map_err(|err| convert_reqwest_error(&err, url, timeout))?
            .error_for_status()
            .map_err(|err| convert_reqwest_error(&err, url, timeout))?
            .text()
            .await
            .map_err(|err| convert_reqwest_error(&err, url, timeout))?;
        let mut candidates = decode_elements(&body, request.center)?;
        candidates.truncate(request.limit);
        Ok(candidates)
    }
}
