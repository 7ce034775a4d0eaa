//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("at least one [[connections]] block is required")]
    NoConnections,
    #[error("connections[{0}].server is required")]
    MissingServer(usize),
    #[error("connections[{0}].nickname is required")]
    MissingNickname(usize),
    #[error("connections[{0}].port must be non-zero")]
    InvalidPort(usize),
    #[error("connections[{index}]: {field} contains a space or control character: {value:?}")]
    IllegalCharacters {
        index: usize,
        field: &'static str,
        value: String,
    },
    #[error("connections[{0}].flood.messages_per_second must be at least 1")]
    InvalidFloodRate(usize),
    #[error("connections[{0}].ping.timeout_secs must exceed ping.interval_secs")]
    InvalidPingTimeout(usize),
}

/// Characters that would split or terminate a protocol line.
fn has_illegal_chars(value: &str) -> bool {
    value.contains([' ', '\r', '\n', '\0'])
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.connections.is_empty() {
        errors.push(ValidationError::NoConnections);
    }

    for (index, conn) in config.connections.iter().enumerate() {
        // Required fields
        if conn.server.is_empty() {
            errors.push(ValidationError::MissingServer(index));
        }
        if conn.nickname.is_empty() {
            errors.push(ValidationError::MissingNickname(index));
        }
        if conn.port == 0 {
            errors.push(ValidationError::InvalidPort(index));
        }

        // Values that end up on the wire as middle parameters
        let wire_fields = std::iter::once(("nickname", &conn.nickname))
            .chain(std::iter::once(("username", &conn.username)))
            .chain(conn.channels.iter().map(|c| ("channels", c)));
        for (field, value) in wire_fields {
            if has_illegal_chars(value) {
                errors.push(ValidationError::IllegalCharacters {
                    index,
                    field,
                    value: value.clone(),
                });
            }
        }

        if conn.flood.messages_per_second == 0 {
            errors.push(ValidationError::InvalidFloodRate(index));
        }
        if conn.ping.timeout_secs <= conn.ping.interval_secs {
            errors.push(ValidationError::InvalidPingTimeout(index));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
