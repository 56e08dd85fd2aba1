//! Precondition failures reported by the aggregator.

use thiserror::Error;

/// Structural misuse of [`crate::Aggregator::discover`].
///
/// These errors are returned before any provider call is made. Provider
/// failures never surface here; they are recorded per keyword in
/// [`crate::Discovery`].
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum DiscoveryError {
    /// No usable keyword remained after trimming blanks.
    #[error("at least one non-blank keyword is required")]
    EmptyKeywords,
    /// The radius was zero, negative or not finite.
    #[error("search radius must be a positive finite number of metres, got {radius_metres}")]
    InvalidRadius {
        /// Rejected radius.
        radius_metres: f64,
    },
    /// The search centre was outside WGS84 bounds or not finite.
    #[error("search centre ({lat}, {lon}) is not a valid coordinate")]
    InvalidCenter {
        /// Rejected latitude.
        lat: f64,
        /// Rejected longitude.
        lon: f64,
    },
    /// A count parameter was zero.
    #[error("{field} must be at least 1")]
    InvalidLimit {
        /// Name of the offending parameter.
        field: &'static str,
    },
}
