use thiserror::Error;

/// Errors reported by geo search and knowledge-base providers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ProviderError {
    /// The call did not complete within its time budget.
    #[error("{operation} timed out after {timeout_ms} ms")]
    Timeout {
        /// Description of the timed-out call.
        operation: String,
        /// Budget that was exceeded, in milliseconds.
        timeout_ms: u64,
    },
    /// The request could not be sent or the connection failed.
    #[error("request to {url} failed: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Transport error message.
        message: String,
    },
    /// The service answered with an HTTP error status.
    #[error("request to {url} failed with status {status}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse provider response: {message}")]
    Parse {
        /// Decoder error message.
        message: String,
    },
    /// The service reported an application-level failure.
    #[error("provider returned {code}: {message}")]
    Service {
        /// Service status code.
        code: String,
        /// Service message.
        message: String,
    },
    /// The worker task running the call was aborted or panicked.
    #[error("provider task aborted: {message}")]
    Aborted {
        /// Join error message.
        message: String,
    },
}

impl ProviderError {
    /// Build a timeout error from a [`std::time::Duration`] budget.
    pub fn timeout(operation: impl Into<String>, budget: std::time::Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms: u64::try_from(budget.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Report whether the error is a timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
