//! Shared HTTP client construction and error mapping.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use waypost_core::ProviderError;

/// Default user agent sent by the HTTP providers.
pub const DEFAULT_USER_AGENT: &str = "waypost-engine/0.1";

/// Failure to construct an HTTP provider.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    /// The configured base URL is not a valid absolute URL.
    #[error("invalid base URL {url}: {message}")]
    BaseUrl {
        /// The rejected URL.
        url: String,
        /// Parser diagnostic.
        message: String,
    },
}

pub(crate) fn build_client(
    user_agent: &str,
    timeout: Duration,
) -> Result<Client, ProviderBuildError> {
    Ok(Client::builder()
        .user_agent(user_agent)
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()?)
}

/// Map a `reqwest` failure onto the provider error taxonomy.
pub(crate) fn convert_reqwest_error(
    error: &reqwest::Error,
    url: &str,
    timeout: Duration,
) -> ProviderError {
    if error.is_timeout() {
        return ProviderError::timeout(format!("request to {url}"), timeout);
    }
    if let Some(status) = error.status() {
        return ProviderError::Http {
            url: url.to_owned(),
            status: status.as_u16(),
            message: error.to_string(),
        };
    }
    if error.is_decode() {
        return ProviderError::Parse {
            message: error.to_string(),
        };
    }
    ProviderError::Network {
        url: url.to_owned(),
        message: error.to_string(),
    }
}
