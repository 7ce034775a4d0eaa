//! Channel membership and channel state messages.

use crate::error::MessageError;
use crate::message::{LineWriter, ParsedLine};
use crate::prefix::{Prefix, UserPrefix};

use super::util::{any_source, params, split_list, user_source};
use super::{Decodable, Encodable};

/// `JOIN`: enter one or more channels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Join {
    /// Channels joined, in order.
    pub channels: Vec<String>,
    /// Channel keys, positionally matching `channels`.
    pub keys: Vec<String>,
    /// Who joined (inbound only).
    pub prefix: Option<UserPrefix>,
}

impl Join {
    /// Outbound JOIN for a single channel.
    pub fn new(channel: impl Into<String>) -> Self {
        Self::with_keys(vec![channel.into()], Vec::new())
    }

    /// Outbound JOIN for several channels with keys.
    pub fn with_keys(channels: Vec<String>, keys: Vec<String>) -> Self {
        Self {
            channels,
            keys,
            prefix: None,
        }
    }
}

impl Decodable for Join {
    const VERB: &'static str = "JOIN";

    fn decode(line: &ParsedLine) -> Result<Self, MessageError> {
        let params = params(line, Self::VERB, 1)?;
        Ok(Self {
            channels: split_list(&params[0]),
            keys: params.get(1).map(|k| split_list(k)).unwrap_or_default(),
            prefix: Some(user_source(line, Self::VERB)?),
        })
    }
}

impl Encodable for Join {
    fn encode(&self) -> String {
        let mut writer = LineWriter::new("JOIN").param(&self.channels.join(","));
        if !self.keys.is_empty() {
            writer = writer.param(&self.keys.join(","));
        }
        writer.finish()
    }
}

/// `PART`: leave one or more channels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Part {
    /// Channels left.
    pub channels: Vec<String>,
    /// Part message.
    pub message: Option<String>,
    /// Who left (inbound only).
    pub prefix: Option<UserPrefix>,
}

impl Part {
    /// Outbound PART for a single channel.
    pub fn new(channel: impl Into<String>, message: Option<String>) -> Self {
        Self {
            channels: vec![channel.into()],
            message,
            prefix: None,
        }
    }
}

impl Decodable for Part {
    const VERB: &'static str = "PART";

    fn decode(line: &ParsedLine) -> Result<Self, MessageError> {
        let params = params(line, Self::VERB, 1)?;
        Ok(Self {
            channels: split_list(&params[0]),
            message: params.get(1).cloned(),
            prefix: Some(user_source(line, Self::VERB)?),
        })
    }
}

impl Encodable for Part {
    fn encode(&self) -> String {
        LineWriter::new("PART")
            .param(&self.channels.join(","))
            .trailing_opt(self.message.as_deref())
            .finish()
    }
}

/// `KICK`: forcibly remove a user from a channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Kick {
    /// Channel the user is removed from.
    pub channel: String,
    /// Nickname of the removed user.
    pub target: String,
    /// Kick reason; empty when none was given.
    pub message: String,
    /// Who kicked (inbound only).
    pub prefix: Option<UserPrefix>,
}

impl Kick {
    /// Outbound KICK.
    pub fn new(
        channel: impl Into<String>,
        target: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            channel: channel.into(),
            target: target.into(),
            message: message.into(),
            prefix: None,
        }
    }
}

impl Decodable for Kick {
    const VERB: &'static str = "KICK";

    fn decode(line: &ParsedLine) -> Result<Self, MessageError> {
        let params = params(line, Self::VERB, 2)?;
        Ok(Self {
            channel: params[0].clone(),
            target: params[1].clone(),
            message: params.get(2).cloned().unwrap_or_default(),
            prefix: Some(user_source(line, Self::VERB)?),
        })
    }
}

impl Encodable for Kick {
    fn encode(&self) -> String {
        LineWriter::new("KICK")
            .param(&self.channel)
            .param(&self.target)
            .trailing(&self.message)
            .finish()
    }
}

/// `REMOVE`: a "forced part", supported by some networks in place of KICK.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Remove {
    /// Channel the user is removed from.
    pub channel: String,
    /// Nickname of the removed user.
    pub nickname: String,
    /// Reason.
    pub message: String,
}

impl Remove {
    /// Outbound REMOVE.
    pub fn new(
        channel: impl Into<String>,
        nickname: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            channel: channel.into(),
            nickname: nickname.into(),
            message: message.into(),
        }
    }
}

impl Encodable for Remove {
    fn encode(&self) -> String {
        LineWriter::new("REMOVE")
            .param(&self.channel)
            .param(&self.nickname)
            .trailing(&self.message)
            .finish()
    }
}

/// `MODE`: change channel or user modes.
///
/// Mode letters are kept as the raw flag string; interpreting which letters
/// consume an argument depends on the server's ISUPPORT tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mode {
    /// Channel or nickname the modes apply to.
    pub target: String,
    /// Flag string, e.g. `+ov-b`.
    pub flags: String,
    /// Mode arguments in order.
    pub args: Vec<String>,
    /// Setter; a server or a user (inbound only).
    pub prefix: Option<Prefix>,
}

impl Mode {
    /// Outbound MODE.
    pub fn new(target: impl Into<String>, flags: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            target: target.into(),
            flags: flags.into(),
            args,
            prefix: None,
        }
    }
}

impl Decodable for Mode {
    const VERB: &'static str = "MODE";

    fn decode(line: &ParsedLine) -> Result<Self, MessageError> {
        let params = params(line, Self::VERB, 2)?;
        Ok(Self {
            target: params[0].clone(),
            flags: params[1].clone(),
            args: params[2..].to_vec(),
            prefix: any_source(line),
        })
    }
}

impl Encodable for Mode {
    fn encode(&self) -> String {
        LineWriter::new("MODE")
            .param(&self.target)
            .param(&self.flags)
            .params(&self.args)
            .finish()
    }
}

/// `TOPIC`: set a channel topic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topic {
    /// Channel name.
    pub channel: String,
    /// New topic text; empty clears it.
    pub topic: String,
    /// Setter (inbound only).
    pub prefix: Option<Prefix>,
}

impl Topic {
    /// Outbound TOPIC.
    pub fn new(channel: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            topic: topic.into(),
            prefix: None,
        }
    }
}

impl Decodable for Topic {
    const VERB: &'static str = "TOPIC";

    fn decode(line: &ParsedLine) -> Result<Self, MessageError> {
        let params = params(line, Self::VERB, 2)?;
        Ok(Self {
            channel: params[0].clone(),
            topic: params[1].clone(),
            prefix: any_source(line),
        })
    }
}

impl Encodable for Topic {
    fn encode(&self) -> String {
        LineWriter::new("TOPIC")
            .param(&self.channel)
            .trailing(&self.topic)
            .finish()
    }
}

/// `WHO`: request user information for a mask or channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Who {
    /// Channel or nickname mask.
    pub mask: String,
    /// Flags or WHOX field selector (e.g. `%nuhaf`).
    pub options: Option<String>,
}

impl Who {
    /// Build a WHO request.
    pub fn new(mask: impl Into<String>, options: Option<String>) -> Self {
        Self {
            mask: mask.into(),
            options,
        }
    }
}

impl Encodable for Who {
    fn encode(&self) -> String {
        let writer = LineWriter::new("WHO").param(&self.mask);
        match self.options.as_deref() {
            Some(options) if !options.is_empty() => writer.param(options),
            _ => writer,
        }
        .finish()
    }
}
