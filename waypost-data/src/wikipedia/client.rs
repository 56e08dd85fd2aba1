//! HTTP client for the summary endpoint.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use url::Url;
use waypost_core::{KnowledgeBaseProvider, LanguageCandidate, ProviderError};

use super::summary::decode_summary;
use crate::http::{DEFAULT_USER_AGENT, ProviderBuildError, build_client, convert_reqwest_error};

/// Placeholder in [`WikipediaConfig::base_url`] replaced by the language code.
pub const LANGUAGE_PLACEHOLDER: &str = "{lang}";

/// Default base URL; one host per language edition.
pub const DEFAULT_BASE_URL: &str = "https://{lang}.wikipedia.org";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for [`WikipediaKnowledgeBase`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikipediaConfig {
    /// Base URL. [`LANGUAGE_PLACEHOLDER`] is replaced by the requested
    /// language code; a URL without it serves every language.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl WikipediaConfig {
    /// Create a configuration for the given base URL.
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

/// [`KnowledgeBaseProvider`] over the Wikipedia REST API.
#[derive(Debug, Clone)]
pub struct WikipediaKnowledgeBase {
    client: Client,
    config: WikipediaConfig,
}

impl WikipediaKnowledgeBase {
    /// Create a provider with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new() -> Result<Self, ProviderBuildError> {
        Self::with_config(WikipediaConfig::default())
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the base URL
    /// does not parse.
    pub fn with_config(config: WikipediaConfig) -> Result<Self, ProviderBuildError> {
        let probe = config.base_url.replace(LANGUAGE_PLACEHOLDER, "en");
        Url::parse(&probe).map_err(|err| ProviderBuildError::BaseUrl {
            url: config.base_url.clone(),
            message: err.to_string(),
        })?;
        let client = build_client(&config.user_agent, config.timeout)?;
        Ok(Self { client, config })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &WikipediaConfig {
        &self.config
    }

    /// Build the summary URL for `title` in `language_code`.
    ///
    /// Spaces in the title become underscores and the title is
    /// percent-encoded as a single path segment.
    fn summary_url(&self, title: &str, language_code: &str) -> Result<Url, ProviderError> {
        if language_code.is_empty()
            || !language_code
                .chars()
                .all(|ch| ch.is_ascii_lowercase() || ch == '-')
        {
            return Err(ProviderError::Service {
                code: "invalid_language".to_owned(),
                message: format!("unsupported language code '{language_code}'"),
            });
        }
        let base = self
            .config
            .base_url
            .replace(LANGUAGE_PLACEHOLDER, language_code);
        let mut url = Url::parse(&base).map_err(|err| ProviderError::Service {
            code: "invalid_url".to_owned(),
            message: err.to_string(),
        })?;
        let page = title.trim().replace(' ', "_");
        url.path_segments_mut()
            .map_err(|()| ProviderError::Service {
                code: "invalid_url".to_owned(),
                message: format!("{base} cannot be a base URL"),
            })?
            .pop_if_empty()
            .extend(["api", "rest_v1", "page", "summary", page.as_str()]);
        Ok(url)
    }
}

#[async_trait]
impl KnowledgeBaseProvider for WikipediaKnowledgeBase {
    async fn lookup(
        &self,
        title: &str,
        language_code: &str,
    ) -> Result<Option<LanguageCandidate>, ProviderError> {
        let url = self.summary_url(title, language_code)?;
        let timeout = self.config.timeout;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| convert_reqwest_error(&err, url.as_str(), timeout))?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("no {language_code} article at {url}");
            return Ok(None);
        }
        let body = response
            .error_for_status()
            .map_err(|err| convert_reqwest_error(&err, url.as_str(), timeout))?
            .text()
            .await
            .map_err(|err| convert_reqwest_error(&err, url.as_str(), timeout))?;
        decode_summary(&body, language_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn provider(base_url: &str) -> WikipediaKnowledgeBase {
        WikipediaKnowledgeBase::with_config(WikipediaConfig::new(base_url))
            .expect("provider should build")
    }

    #[rstest]
    #[case("Man Mo Temple", "en", "https://en.wikipedia.org/api/rest_v1/page/summary/Man_Mo_Temple")]
    #[case(
        "文武廟",
        "zh",
        "https://zh.wikipedia.org/api/rest_v1/page/summary/%E6%96%87%E6%AD%A6%E5%BB%9F"
    )]
    #[case(
        "AC/DC Lane",
        "en",
        "https://en.wikipedia.org/api/rest_v1/page/summary/AC%2FDC_Lane"
    )]
    fn summary_url_targets_the_language_edition(
        #[case] title: &str,
        #[case] language: &str,
        #[case] expected: &str,
    ) {
        let url = provider(DEFAULT_BASE_URL)
            .summary_url(title, language)
            .expect("url should build");
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    fn base_urls_without_placeholder_serve_every_language() {
        let url = provider("http://localhost:8080/wiki/")
            .summary_url("Louvre", "fr")
            .expect("url should build");
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/wiki/api/rest_v1/page/summary/Louvre"
        );
    }

    #[rstest]
    #[case("")]
    #[case("EN")]
    #[case("en.evil.example")]
    fn malformed_language_codes_are_refused(#[case] language: &str) {
        let err = provider(DEFAULT_BASE_URL)
            .summary_url("Louvre", language)
            .expect_err("language should be refused");
        assert!(matches!(err, ProviderError::Service { .. }));
    }

    #[rstest]
    fn invalid_base_urls_fail_to_build() {
        let err = WikipediaKnowledgeBase::with_config(WikipediaConfig::new("not a url"))
            .expect_err("base URL should be refused");
        assert!(matches!(err, ProviderBuildError::BaseUrl { .. }));
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = WikipediaConfig::new("http://example.com")
            .with_timeout(Duration::from_secs(3))
            .with_user_agent("test-agent/1.0");

        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }
}
