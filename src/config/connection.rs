//! Per-server connection configuration.

use serde::Deserialize;
use std::time::Duration;

use super::defaults::{
    default_flood_delay, default_flood_threshold, default_messages_per_second,
    default_ping_interval, default_ping_timeout, default_port, default_realname,
    default_reconnect_delay, default_username,
};

/// One IRC server to connect to.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionConfig {
    /// Server hostname or address.
    pub server: String,
    /// Server port (plaintext).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Nickname requested at registration.
    pub nickname: String,
    /// Username (ident) sent in USER.
    #[serde(default = "default_username")]
    pub username: String,
    /// Real name sent in USER.
    #[serde(default = "default_realname")]
    pub realname: String,
    /// Server password sent in PASS (optional).
    pub password: Option<String>,
    /// Channels joined once registration completes.
    #[serde(default)]
    pub channels: Vec<String>,
    /// Owner identity, passed through to collaborators untouched.
    pub owner: Option<String>,
    /// Seconds to wait before reconnecting; 0 disables reconnection.
    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay_secs: u64,
    /// Outbound pacing.
    #[serde(default)]
    pub flood: FloodConfig,
    /// Liveness checking.
    #[serde(default)]
    pub ping: PingConfig,
}

impl ConnectionConfig {
    /// `host:port` for connecting and logging.
    pub fn address(&self) -> String {
        format!("{}:{}", self.server, self.port)
    }

    /// Delay before reconnecting, or `None` when reconnection is disabled.
    pub fn reconnect_delay(&self) -> Option<Duration> {
        (self.reconnect_delay_secs > 0).then(|| Duration::from_secs(self.reconnect_delay_secs))
    }
}

/// Outbound flood control parameters.
///
/// Once the queue holds `threshold` messages, each further message is
/// delayed by `delay_seconds` for every `messages_per_second` messages over
/// the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FloodConfig {
    #[serde(default = "default_flood_threshold")]
    pub threshold: usize,
    #[serde(default = "default_messages_per_second")]
    pub messages_per_second: u32,
    #[serde(default = "default_flood_delay")]
    pub delay_seconds: u64,
}

impl Default for FloodConfig {
    fn default() -> Self {
        Self {
            threshold: default_flood_threshold(),
            messages_per_second: default_messages_per_second(),
            delay_seconds: default_flood_delay(),
        }
    }
}

/// Idle timeout configuration for connection keepalive.
///
/// - `interval_secs`: Seconds of inbound silence before the bot sends PING (default: 90)
/// - `timeout_secs`: Seconds of inbound silence after which the link is dead (default: 120)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PingConfig {
    #[serde(default = "default_ping_interval")]
    pub interval_secs: u64,
    #[serde(default = "default_ping_timeout")]
    pub timeout_secs: u64,
}

impl PingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for PingConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_ping_interval(),
            timeout_secs: default_ping_timeout(),
        }
    }
}
