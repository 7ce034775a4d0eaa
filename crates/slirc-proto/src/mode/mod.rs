//! Channel mode change parsing.
//!
//! Which letters consume an argument is server-defined, so parsing is
//! driven by the connection's [`Isupport`](crate::isupport::Isupport).

mod parse;

pub use self::parse::{ModeChange, parse_channel_modes};
