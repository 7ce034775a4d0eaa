//! Typed IRC messages.
//!
//! Each verb of interest has its own struct. A struct that can be received
//! implements [`Decodable`]; one that can be sent implements [`Encodable`].
//! The two capabilities are independent: `USER` is send-only, numeric
//! replies are receive-only, and `PRIVMSG` is both.
//!
//! Inbound lines are routed to the right decoder by [`Incoming::decode`],
//! which looks the verb up in a table built once on first use.

mod channel;
mod connection;
mod messaging;
mod types;
pub(crate) mod util;

use std::fmt;

use crate::error::MessageError;
use crate::message::ParsedLine;

pub use self::channel::{Join, Kick, Mode, Part, Remove, Topic, Who};
pub use self::connection::{Cap, Nick, Pass, Ping, Pong, Quit, ServerError, User};
pub use self::messaging::{Notice, Privmsg, Raw};
pub use self::types::Incoming;

/// A message that can be built from a parsed line.
pub trait Decodable: Sized {
    /// The verb or numeric this type decodes.
    const VERB: &'static str;

    /// Decode a parsed line.
    ///
    /// Fails with [`MessageError::VerbMismatch`] when the line carries another
    /// verb, and with [`MessageError::Malformed`] when required parameters are
    /// missing.
    fn decode(line: &ParsedLine) -> Result<Self, MessageError>;
}

/// A message that can be rendered as a protocol line.
pub trait Encodable: fmt::Debug + Send + Sync {
    /// Render as a CRLF-terminated line.
    ///
    /// Field values must already be free of CR, LF and NUL.
    fn encode(&self) -> String;
}
