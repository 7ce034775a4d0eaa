//! # slirc-proto
//!
//! IRC line tokenizer and typed client message model.
//!
//! ## Features
//!
//! - Tokenizing raw lines into tags, prefix, verb and arguments
//! - IRCv3 message tags with value unescaping
//! - Typed messages that decode from and encode to protocol lines
//! - ISUPPORT `PREFIX` / `CHANMODES` interpretation
//! - Optional Tokio line framing codec
//!
//! ## Quick Start
//!
//! ```rust
//! use slirc_proto::command::{Encodable, Incoming, Privmsg};
//! use slirc_proto::message::parse;
//!
//! let line = parse(":nick!user@host PRIVMSG #rust :Hello, world!").unwrap();
//! match Incoming::decode(&line).unwrap() {
//!     Incoming::Privmsg(msg) => assert_eq!(msg.message, "Hello, world!"),
//!     other => panic!("unexpected {:?}", other),
//! }
//!
//! let reply = Privmsg::new("#rust", "hi there");
//! assert_eq!(reply.encode(), "PRIVMSG #rust :hi there\r\n");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod isupport;
#[cfg(feature = "tokio")]
pub mod line;
pub mod message;
pub mod mode;
pub mod prefix;
pub mod response;

pub use self::command::{Decodable, Encodable, Incoming};
pub use self::error::{MessageError, ParseError, ProtocolError};
pub use self::isupport::{ChanModes, Isupport, PrefixSpec};
#[cfg(feature = "tokio")]
pub use self::line::{LineCodec, MAX_LINE_LEN};
pub use self::message::{parse, LineWriter, ParsedLine, TagValue};
pub use self::mode::{parse_channel_modes, ModeChange};
pub use self::prefix::{Prefix, UserPrefix};
