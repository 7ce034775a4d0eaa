//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

// =============================================================================
// Logging Defaults
// =============================================================================

pub fn default_log_level() -> String {
    "info".to_string()
}

// =============================================================================
// Identity Defaults
// =============================================================================

pub fn default_port() -> u16 {
    6667
}

pub fn default_username() -> String {
    "slirc".to_string()
}

pub fn default_realname() -> String {
    "slirc bot".to_string()
}

pub fn default_reconnect_delay() -> u64 {
    10
}

// =============================================================================
// Flood Control Defaults
// =============================================================================

pub fn default_flood_threshold() -> usize {
    5
}

pub fn default_messages_per_second() -> u32 {
    1
}

pub fn default_flood_delay() -> u64 {
    1
}

// =============================================================================
// Liveness Defaults
// =============================================================================

pub fn default_ping_interval() -> u64 {
    90
}

pub fn default_ping_timeout() -> u64 {
    120
}
