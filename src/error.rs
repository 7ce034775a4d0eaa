//! Unified error handling for slirc-bot.
//!
//! Inbound protocol problems (unparseable lines, malformed messages, unknown
//! users or channels) never surface here: they are logged and skipped where
//! they occur. Only failures that end a connection instance are errors.

use std::time::Duration;

use thiserror::Error;

/// Why a connection instance ended.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("connection closed by peer")]
    TransportLost,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] slirc_proto::ProtocolError),

    #[error("no traffic from server for {} seconds", .0.as_secs())]
    PingTimeout(Duration),

    #[error("server closed the link: {0}")]
    ServerError(String),
}

impl ConnectionError {
    /// Static label for structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TransportLost => "transport_lost",
            Self::Io(_) => "io",
            Self::Protocol(_) => "protocol",
            Self::PingTimeout(_) => "ping_timeout",
            Self::ServerError(_) => "server_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            ConnectionError::PingTimeout(Duration::from_secs(120)).to_string(),
            "no traffic from server for 120 seconds"
        );
        assert_eq!(
            ConnectionError::ServerError("Closing Link: bot (Quit)".into()).to_string(),
            "server closed the link: Closing Link: bot (Quit)"
        );
        assert_eq!(ConnectionError::TransportLost.kind(), "transport_lost");
    }
}
