//! Per-session cooldown policies for caller-initiated refreshes.

use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};

/// Decide whether a session may issue another upstream-bound request.
///
/// Implementations are consulted by the engine facade before any provider
/// call and must be safe to share between tasks.
pub trait RefreshCooldownPolicy: Send + Sync {
    /// Return `true` and record the attempt when `session_id` may proceed.
    fn allow(&self, session_id: &str) -> bool;
}

/// Policy that never throttles.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysAllow;

impl RefreshCooldownPolicy for AlwaysAllow {
    fn allow(&self, _session_id: &str) -> bool {
        true
    }
}

/// Sessions remembered by default before the oldest are evicted.
const DEFAULT_CAPACITY: usize = 1024;

/// Enforce a minimum interval between permitted requests per session.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use waypost_core::{IntervalCooldown, RefreshCooldownPolicy};
///
/// let policy = IntervalCooldown::new(Duration::from_secs(30));
/// assert!(policy.allow("session-a"));
/// assert!(!policy.allow("session-a"));
/// assert!(policy.allow("session-b"));
/// ```
#[derive(Debug)]
pub struct IntervalCooldown {
    interval: Duration,
    capacity: usize,
    last_allowed: Mutex<HashMap<String, Instant>>,
}

impl IntervalCooldown {
    /// Create a policy permitting one request per `interval` per session.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            capacity: DEFAULT_CAPACITY,
            last_allowed: Mutex::new(HashMap::new()),
        }
    }

    /// Bound the number of remembered sessions; at least one is kept.
    ///
    /// When full, expired sessions are dropped first and then the session
    /// allowed longest ago.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Number of sessions currently remembered.
    #[must_use]
    pub fn tracked_sessions(&self) -> usize {
        self.last_allowed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Configured minimum interval.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left before `session_id` may proceed; zero when it may already.
    #[must_use]
    pub fn remaining(&self, session_id: &str) -> Duration {
        let sessions = self
            .last_allowed
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        sessions.get(session_id).map_or(Duration::ZERO, |last| {
            self.interval.saturating_sub(last.elapsed())
        })
    }
}

impl RefreshCooldownPolicy for IntervalCooldown {
    fn allow(&self, session_id: &str) -> bool {
        let now = Instant::now();
        let mut sessions = self
            .last_allowed
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(last) = sessions.get(session_id)
            && now.duration_since(*last) < self.interval
        {
            log::debug!("cooldown active for session {session_id}");
            return false;
        }
        if !sessions.contains_key(session_id) && sessions.len() >= self.capacity {
            let interval = self.interval;
            sessions.retain(|_, last| now.duration_since(*last) < interval);
            if sessions.len() >= self.capacity {
                let oldest = sessions
                    .iter()
                    .min_by_key(|(_, last)| **last)
                    .map(|(id, _)| id.clone());
                if let Some(id) = oldest {
                    log::debug!("cooldown table full, forgetting session {id}");
                    sessions.remove(&id);
                }
            }
        }
        sessions.insert(session_id.to_owned(), now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn zero_interval_never_blocks() {
        let policy = IntervalCooldown::new(Duration::ZERO);
        assert!(policy.allow("s"));
        assert!(policy.allow("s"));
    }

    #[rstest]
    fn blocked_session_reports_remaining_time() {
        let policy = IntervalCooldown::new(Duration::from_secs(60));
        assert!(policy.allow("s"));
        assert!(!policy.allow("s"));
        assert!(policy.remaining("s") > Duration::from_secs(50));
        assert_eq!(policy.remaining("other"), Duration::ZERO);
    }

    #[rstest]
    fn full_table_forgets_the_oldest_live_session() {
        let policy = IntervalCooldown::new(Duration::from_secs(60)).with_capacity(2);
        assert!(policy.allow("a"));
        assert!(policy.allow("b"));
        assert!(policy.allow("c"));

        assert_eq!(policy.tracked_sessions(), 2);
        assert!(!policy.allow("c"));
    }

    #[rstest]
    fn full_table_drops_expired_sessions_first() {
        let policy = IntervalCooldown::new(Duration::ZERO).with_capacity(2);
        for session in ["a", "b", "c", "d"] {
            assert!(policy.allow(session));
        }
        assert!(policy.tracked_sessions() <= 2);
    }

    #[rstest]
    fn always_allow_permits_repeats() {
        assert!(AlwaysAllow.allow("s"));
        assert!(AlwaysAllow.allow("s"));
    }
}
