//! Errors reported by the engine facade.

use thiserror::Error;
use waypost_discovery::DiscoveryError;

/// Caller-visible failures of [`crate::Engine`] operations.
///
/// Each is reported before any provider is contacted.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// The POI name is empty after trimming.
    #[error("POI name must not be empty")]
    EmptyQuery,
    /// The location hint is not a valid WGS84 coordinate.
    #[error("hint location ({lat}, {lon}) is not a valid coordinate")]
    InvalidHint {
        /// Latitude supplied.
        lat: f64,
        /// Longitude supplied.
        lon: f64,
    },
    /// The session refreshed too recently.
    #[error("refresh cooldown active for session {session_id}")]
    CooldownActive {
        /// Session that was refused.
        session_id: String,
    },
    /// The discovery request was malformed.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
}
