//! Cross-call resolution caching.
//!
//! The engine never owns a cache; callers inject one through
//! [`ResolutionCache`]. Implementations must be safe to call from many tasks
//! at once. [`NoopResolutionCache`] stores nothing and is the default.

use geo::Coord;

use crate::{ResolutionResult, text::fold};

/// Thread-safe store of previously computed resolutions.
pub trait ResolutionCache: Send + Sync {
    /// Return the cached value for `key`, if any.
    fn get(&self, key: &str) -> Option<ResolutionResult>;

    /// Store `value` under `key`, replacing any previous entry.
    fn put(&self, key: String, value: ResolutionResult);
}

/// Cache that never stores anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopResolutionCache;

impl ResolutionCache for NoopResolutionCache {
    fn get(&self, _key: &str) -> Option<ResolutionResult> {
        None
    }

    fn put(&self, _key: String, _value: ResolutionResult) {}
}

/// Build the cache key for a query name and optional hint.
///
/// Names are folded and hints rounded to four decimal places (about 11 m),
/// so trivially different spellings of the same request share an entry.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use waypost_core::cache_key;
///
/// let hint = Coord { x: 114.150_41, y: 22.283_92 };
/// assert_eq!(cache_key("Man Mo Temple", Some(hint)), "man mo temple@22.2839,114.1504");
/// assert_eq!(cache_key(" MAN MO temple ", None), "man mo temple");
/// ```
#[must_use]
pub fn cache_key(name: &str, hint: Option<Coord<f64>>) -> String {
    let folded = fold(name);
    match hint {
        Some(location) => format!("{folded}@{:.4},{:.4}", location.y, location.x),
        None => folded,
    }
}
