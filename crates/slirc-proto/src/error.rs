//! Error types for the IRC protocol library.
//!
//! Three layers fail independently:
//! - [`ProtocolError`]: the byte stream itself (I/O, unsendable output).
//! - [`ParseError`]: a single raw line could not be tokenized.
//! - [`MessageError`]: a tokenized line does not fit the typed message it
//!   was decoded as.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Transport-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Illegal control character in an outgoing line.
    #[error("illegal control character: {0:?}")]
    IllegalControlChar(char),
}

/// Errors encountered when tokenizing a raw IRC line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// Line was empty or only whitespace.
    #[error("empty line")]
    EmptyLine,

    /// Tags and/or prefix were present but no verb followed them.
    #[error("no verb in line: {0:?}")]
    MissingVerb(String),
}

/// Errors encountered when decoding a parsed line into a typed message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MessageError {
    /// The decoder for one verb was handed a line carrying another.
    #[error("expected {expected}, got {got}")]
    VerbMismatch {
        /// Verb the decoder handles.
        expected: &'static str,
        /// Verb found on the line.
        got: String,
    },

    /// The line has fewer parameters than the verb requires.
    #[error("malformed {verb}: expected at least {expected} parameters, got {got}")]
    Malformed {
        /// Verb being decoded.
        verb: &'static str,
        /// Minimum number of parameters.
        expected: usize,
        /// Number of parameters present.
        got: usize,
    },

    /// The verb requires a source prefix and the line has none.
    #[error("{0} without a source prefix")]
    MissingPrefix(&'static str),

    /// The prefix is not of the form `nick!user@host`.
    #[error("invalid user prefix: {0}")]
    InvalidPrefix(String),
}
