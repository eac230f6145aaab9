use std::time::{Duration, Instant};

/// Decides when the dashboard is stale. Callers pass the clock in, nothing
/// here reads it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RefreshPolicy {
    ttl: Duration,
}

impl RefreshPolicy {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    pub fn is_due(&self, last_refresh: Option<Instant>, now: Instant, force: bool) -> bool {
        if force {
            return true;
        }
        match last_refresh {
            Some(last) => now.saturating_duration_since(last) >= self.ttl,
            None => true,
        }
    }
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(60))
    }
}
