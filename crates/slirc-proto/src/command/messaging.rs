use crate::error::MessageError;
use crate::message::{LineWriter, ParsedLine};
use crate::prefix::{Prefix, UserPrefix};

use super::util::{any_source, params, user_source};
use super::{Decodable, Encodable};

/// `PRIVMSG`: a message to a channel or user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Privmsg {
    /// Channel or nickname the message is addressed to.
    pub target: String,
    /// Message text.
    pub message: String,
    /// Sender (inbound only).
    pub prefix: Option<UserPrefix>,
}

impl Privmsg {
    /// Outbound PRIVMSG.
    pub fn new(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            message: message.into(),
            prefix: None,
        }
    }
}

impl Decodable for Privmsg {
    const VERB: &'static str = "PRIVMSG";

    fn decode(line: &ParsedLine) -> Result<Self, MessageError> {
        let params = params(line, Self::VERB, 2)?;
        Ok(Self {
            target: params[0].clone(),
            message: params[1].clone(),
            prefix: Some(user_source(line, Self::VERB)?),
        })
    }
}

impl Encodable for Privmsg {
    fn encode(&self) -> String {
        LineWriter::new("PRIVMSG")
            .param(&self.target)
            .trailing(&self.message)
            .finish()
    }
}

/// `NOTICE`: like PRIVMSG, but must never trigger an automatic reply.
///
/// Servers send notices too (often before registration, sometimes with no
/// prefix at all), so the source is optional and may be a server name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    /// Channel or nickname the notice is addressed to.
    pub target: String,
    /// Notice text.
    pub message: String,
    /// Sender (inbound only).
    pub prefix: Option<Prefix>,
}

impl Notice {
    /// Outbound NOTICE.
    pub fn new(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            message: message.into(),
            prefix: None,
        }
    }
}

impl Decodable for Notice {
    const VERB: &'static str = "NOTICE";

    fn decode(line: &ParsedLine) -> Result<Self, MessageError> {
        let params = params(line, Self::VERB, 2)?;
        Ok(Self {
            target: params[0].clone(),
            message: params[1].clone(),
            prefix: any_source(line),
        })
    }
}

impl Encodable for Notice {
    fn encode(&self) -> String {
        LineWriter::new("NOTICE")
            .param(&self.target)
            .trailing(&self.message)
            .finish()
    }
}

/// A pre-formatted line sent verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raw {
    /// The line, with or without its CRLF terminator.
    pub line: String,
}

impl Raw {
    /// Wrap a pre-formatted line.
    pub fn new(line: impl Into<String>) -> Self {
        Self { line: line.into() }
    }
}

impl Encodable for Raw {
    fn encode(&self) -> String {
        format!("{}\r\n", self.line.trim_end_matches(&['\r', '\n'][..]))
    }
}
