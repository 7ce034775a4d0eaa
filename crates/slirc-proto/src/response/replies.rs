use crate::command::util::{params, split_words};
use crate::command::Decodable;
use crate::error::MessageError;
use crate::message::ParsedLine;

use super::{
    ERR_NICKNAMEINUSE, RPL_ISUPPORT, RPL_NAMREPLY, RPL_TOPIC, RPL_WELCOME, RPL_WHOSPCRPL,
};

/// 001: registration finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RplWelcome {
    /// The nickname the server registered us under.
    pub nickname: String,
    /// Server that sent the welcome.
    pub server: Option<String>,
    /// Welcome text.
    pub message: Option<String>,
}

impl Decodable for RplWelcome {
    const VERB: &'static str = RPL_WELCOME;

    fn decode(line: &ParsedLine) -> Result<Self, MessageError> {
        let params = params(line, Self::VERB, 1)?;
        Ok(Self {
            nickname: params[0].clone(),
            server: line.prefix.clone(),
            message: params.get(1).cloned(),
        })
    }
}

/// 005: feature advertisement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RplIsupport {
    /// Our nickname.
    pub nickname: String,
    /// Server that sent the tokens.
    pub server: Option<String>,
    /// `KEY`, `KEY=VALUE` or `-KEY` tokens; the closing human-readable
    /// text is dropped.
    pub tokens: Vec<String>,
}

impl Decodable for RplIsupport {
    const VERB: &'static str = RPL_ISUPPORT;

    fn decode(line: &ParsedLine) -> Result<Self, MessageError> {
        let params = params(line, Self::VERB, 1)?;
        let mut tokens = &params[1..];
        if let Some((last, rest)) = tokens.split_last() {
            if last.contains(' ') || last.is_empty() {
                tokens = rest;
            }
        }
        Ok(Self {
            nickname: params[0].clone(),
            server: line.prefix.clone(),
            tokens: tokens.to_vec(),
        })
    }
}

/// 332: topic of a channel, sent on join.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RplTopic {
    /// Our nickname.
    pub nickname: String,
    /// Channel name.
    pub channel: String,
    /// Topic text.
    pub topic: String,
}

impl Decodable for RplTopic {
    const VERB: &'static str = RPL_TOPIC;

    fn decode(line: &ParsedLine) -> Result<Self, MessageError> {
        let params = params(line, Self::VERB, 3)?;
        Ok(Self {
            nickname: params[0].clone(),
            channel: params[1].clone(),
            topic: params[2].clone(),
        })
    }
}

/// 353: one batch of channel members.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RplNamReply {
    /// Our nickname.
    pub nickname: String,
    /// `=` public, `*` private, `@` secret.
    pub visibility: String,
    /// Channel name.
    pub channel: String,
    /// Member nicknames, each possibly led by membership sigils.
    pub nicknames: Vec<String>,
}

impl Decodable for RplNamReply {
    const VERB: &'static str = RPL_NAMREPLY;

    fn decode(line: &ParsedLine) -> Result<Self, MessageError> {
        let params = params(line, Self::VERB, 4)?;
        Ok(Self {
            nickname: params[0].clone(),
            visibility: params[1].clone(),
            channel: params[2].clone(),
            nicknames: split_words(&params[3]),
        })
    }
}

/// 354: WHOX reply to a `%nuhaf` query.
///
/// Fields arrive in WHOX order: user, host, nick, flags, account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RplWhoSpcRpl {
    /// Our nickname.
    pub nickname: String,
    /// Username of the described user.
    pub username: String,
    /// Hostname of the described user.
    pub hostname: String,
    /// Nickname of the described user.
    pub target: String,
    /// Away/oper/membership flags.
    pub flags: String,
    /// Services account, `0` when not identified.
    pub account: String,
}

impl Decodable for RplWhoSpcRpl {
    const VERB: &'static str = RPL_WHOSPCRPL;

    fn decode(line: &ParsedLine) -> Result<Self, MessageError> {
        let params = params(line, Self::VERB, 6)?;
        Ok(Self {
            nickname: params[0].clone(),
            username: params[1].clone(),
            hostname: params[2].clone(),
            target: params[3].clone(),
            flags: params[4].clone(),
            account: params[5].clone(),
        })
    }
}

/// 433: the requested nickname is taken.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrNicknameInUse {
    /// Our current nickname (`*` before registration).
    pub nickname: String,
    /// The nickname that was refused.
    pub attempted: String,
}

impl Decodable for ErrNicknameInUse {
    const VERB: &'static str = ERR_NICKNAMEINUSE;

    fn decode(line: &ParsedLine) -> Result<Self, MessageError> {
        let params = params(line, Self::VERB, 2)?;
        Ok(Self {
            nickname: params[0].clone(),
            attempted: params[1].clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::parse;

    #[test]
    fn test_welcome() {
        let line = parse(":irc.example.net 001 bot :Welcome to ExampleNet bot").unwrap();
        let welcome = RplWelcome::decode(&line).unwrap();
        assert_eq!(welcome.nickname, "bot");
        assert_eq!(welcome.server.as_deref(), Some("irc.example.net"));
    }

    #[test]
    fn test_isupport_drops_trailing_text() {
        let line = parse(
            ":irc 005 bot PREFIX=(ov)@+ CHANMODES=b,k,l,imnt :are supported by this server",
        )
        .unwrap();
        let isupport = RplIsupport::decode(&line).unwrap();
        assert_eq!(isupport.tokens, ["PREFIX=(ov)@+", "CHANMODES=b,k,l,imnt"]);
    }

    #[test]
    fn test_topic_reply() {
        let line = parse(":irc 332 bot #chan :the topic").unwrap();
        let topic = RplTopic::decode(&line).unwrap();
        assert_eq!(topic.channel, "#chan");
        assert_eq!(topic.topic, "the topic");
    }

    #[test]
    fn test_namreply_splits_members() {
        let line = parse(":irc 353 bot = #chan :@alice +bob  carol").unwrap();
        let names = RplNamReply::decode(&line).unwrap();
        assert_eq!(names.channel, "#chan");
        assert_eq!(names.nicknames, ["@alice", "+bob", "carol"]);
    }

    #[test]
    fn test_namreply_malformed() {
        let line = parse(":irc 353 bot = #chan").unwrap();
        assert_eq!(
            RplNamReply::decode(&line),
            Err(MessageError::Malformed {
                verb: "353",
                expected: 4,
                got: 3
            })
        );
    }

    #[test]
    fn test_whox_reply() {
        let line = parse(":irc 354 bot ~alice host.example alice H@ alice_acct").unwrap();
        let who = RplWhoSpcRpl::decode(&line).unwrap();
        assert_eq!(who.target, "alice");
        assert_eq!(who.username, "~alice");
        assert_eq!(who.account, "alice_acct");
    }

    #[test]
    fn test_nickname_in_use() {
        let line = parse(":irc 433 * bot :Nickname is already in use").unwrap();
        let err = ErrNicknameInUse::decode(&line).unwrap();
        assert_eq!(err.attempted, "bot");
    }
}
