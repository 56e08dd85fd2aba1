//! Bounded, expiring resolution cache.
//!
//! Entries are keyed by [`waypost_core::cache_key`] and evicted by size and
//! time-to-live using [`moka`].

use std::time::Duration;

use moka::sync::Cache;
use waypost_core::{ResolutionCache, ResolutionResult};

/// Default maximum number of cached resolutions.
pub const DEFAULT_CAPACITY: u64 = 1_000;

/// Default lifetime of a cached resolution.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// [`ResolutionCache`] backed by a `moka` concurrent cache.
#[derive(Debug, Clone)]
pub struct MokaResolutionCache {
    entries: Cache<String, ResolutionResult>,
}

impl MokaResolutionCache {
    /// Create a cache holding at most `capacity` entries for `ttl` each.
    #[must_use]
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Approximate number of live entries.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }
}

impl Default for MokaResolutionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TTL)
    }
}

impl ResolutionCache for MokaResolutionCache {
    fn get(&self, key: &str) -> Option<ResolutionResult> {
        self.entries.get(key)
    }

    fn put(&self, key: String, value: ResolutionResult) {
        self.entries.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use waypost_core::UnresolvedReason;

    fn unresolved() -> ResolutionResult {
        ResolutionResult::Unresolved {
            tried_languages: vec!["en".to_owned()],
            reason: UnresolvedReason::NoCandidatesFound,
        }
    }

    #[rstest]
    fn stores_and_returns_results() {
        let cache = MokaResolutionCache::default();
        assert_eq!(cache.get("man mo temple"), None);

        cache.put("man mo temple".to_owned(), unresolved());

        assert_eq!(cache.get("man mo temple"), Some(unresolved()));
        assert_eq!(cache.entry_count(), 1);
    }
}
