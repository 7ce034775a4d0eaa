//! Inbound-silence tracking.

use std::time::{Duration, Instant};

use crate::config::PingConfig;

/// Upper bound on how often the connection loop checks for silence.
const PING_CHECK_INTERVAL_SECS: u64 = 15;

/// What the connection loop should do about link silence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LivenessCheck {
    Alive,
    /// Idle long enough to probe the server with our own PING.
    SendPing,
    /// Silent past the timeout; the link is gone.
    TimedOut(Duration),
}

#[derive(Debug)]
pub(super) struct Liveness {
    last_activity: Instant,
    ping_pending: bool,
}

impl Liveness {
    pub(super) fn new(now: Instant) -> Self {
        Self {
            last_activity: now,
            ping_pending: false,
        }
    }

    /// Any inbound line counts as proof of life.
    pub(super) fn touch(&mut self, now: Instant) {
        self.last_activity = now;
        self.ping_pending = false;
    }

    pub(super) fn check(&mut self, now: Instant, config: &PingConfig) -> LivenessCheck {
        let idle = now.saturating_duration_since(self.last_activity);
        if idle >= config.timeout() {
            LivenessCheck::TimedOut(idle)
        } else if !self.ping_pending && idle >= config.interval() {
            self.ping_pending = true;
            LivenessCheck::SendPing
        } else {
            LivenessCheck::Alive
        }
    }
}

/// How often to run [`Liveness::check`] for the given settings.
pub(super) fn check_period(config: &PingConfig) -> Duration {
    (config.interval() / 2).clamp(
        Duration::from_millis(100),
        Duration::from_secs(PING_CHECK_INTERVAL_SECS),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: PingConfig = PingConfig {
        interval_secs: 90,
        timeout_secs: 120,
    };

    #[test]
    fn test_ping_then_timeout() {
        let start = Instant::now();
        let mut liveness = Liveness::new(start);

        assert_eq!(
            liveness.check(start + Duration::from_secs(30), &CONFIG),
            LivenessCheck::Alive
        );
        assert_eq!(
            liveness.check(start + Duration::from_secs(90), &CONFIG),
            LivenessCheck::SendPing
        );
        // only one probe per silence
        assert_eq!(
            liveness.check(start + Duration::from_secs(100), &CONFIG),
            LivenessCheck::Alive
        );
        assert_eq!(
            liveness.check(start + Duration::from_secs(121), &CONFIG),
            LivenessCheck::TimedOut(Duration::from_secs(121))
        );
    }

    #[test]
    fn test_traffic_resets() {
        let start = Instant::now();
        let mut liveness = Liveness::new(start);
        assert_eq!(
            liveness.check(start + Duration::from_secs(95), &CONFIG),
            LivenessCheck::SendPing
        );
        liveness.touch(start + Duration::from_secs(100));
        assert_eq!(
            liveness.check(start + Duration::from_secs(150), &CONFIG),
            LivenessCheck::Alive
        );
        assert_eq!(
            liveness.check(start + Duration::from_secs(190), &CONFIG),
            LivenessCheck::SendPing
        );
    }

    #[test]
    fn test_check_period() {
        assert_eq!(check_period(&CONFIG), Duration::from_secs(15));
        let fast = PingConfig {
            interval_secs: 1,
            timeout_secs: 2,
        };
        assert_eq!(check_period(&fast), Duration::from_millis(500));
    }
}
