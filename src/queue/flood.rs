//! Outbound flood-control policy.

use std::time::{Duration, Instant};

use crate::config::FloodConfig;

/// Decides the earliest send time for a newly queued message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloodPolicy {
    threshold: usize,
    messages_per_second: u32,
    delay: Duration,
    enabled: bool,
}

impl FloodPolicy {
    /// Build a policy from configuration. Starts disabled so registration
    /// is not slowed down.
    pub fn new(config: &FloodConfig) -> Self {
        Self {
            threshold: config.threshold,
            messages_per_second: config.messages_per_second.max(1),
            delay: Duration::from_secs(config.delay_seconds),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Earliest send time for a message inserted behind `depth` others.
    ///
    /// Below the threshold (or when disabled) the message is due at once.
    /// Otherwise every `messages_per_second` messages at or past the
    /// threshold, the new one included, add one `delay`. The ratio rounds
    /// to nearest with ties going down.
    pub fn not_before(&self, depth: usize, now: Instant) -> Instant {
        if !self.enabled || depth < self.threshold {
            return now;
        }
        let excess = (depth - self.threshold + 1) as u64;
        let rate = u64::from(self.messages_per_second);
        let pairs = (2 * excess + rate - 1) / (2 * rate);
        now + self.delay * pairs as u32
    }
}

impl Default for FloodPolicy {
    fn default() -> Self {
        Self::new(&FloodConfig::default())
    }
}
