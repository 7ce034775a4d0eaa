//! Connection lifecycle events published to collaborators.

use slirc_proto::command::Incoming;

/// Capacity of each connection's event channel. Subscribers that fall
/// further behind than this see `RecvError::Lagged`.
pub const EVENT_CAPACITY: usize = 256;

/// Something collaborators may react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotEvent {
    /// The transport is up; registration has been queued.
    Connected,
    /// The server accepted registration.
    Registered { nickname: String },
    /// An inbound message, after it was applied to the connection state.
    Message(Incoming),
    /// The connection ended and its state was torn down.
    Closed { reason: String },
}
