//! Raw line tokenizing and rendering.

mod nom_parser;
mod parse;
mod serialize;
/// IRCv3 tag utilities.
pub mod tags;
mod types;

pub use self::parse::parse;
pub use self::serialize::LineWriter;
pub use self::types::{ParsedLine, TagValue};
