//! Network module.
//!
//! One [`Connection`] per configured server: it owns the socket, the
//! outbound queue and the mirrored state, and publishes [`BotEvent`]s.

mod connection;
mod events;
mod liveness;

pub use connection::Connection;
pub use events::{BotEvent, EVENT_CAPACITY};
