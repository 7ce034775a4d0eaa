//! Registration and link-maintenance messages.

use crate::error::MessageError;
use crate::message::{LineWriter, ParsedLine};
use crate::prefix::UserPrefix;

use super::util::{params, split_words, user_source};
use super::{Decodable, Encodable};

/// `NICK`: change (or, during registration, choose) a nickname.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nick {
    /// The new nickname.
    pub nickname: String,
    /// Who changed nick (inbound only).
    pub prefix: Option<UserPrefix>,
}

impl Nick {
    /// Outbound nickname change.
    pub fn new(nickname: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            prefix: None,
        }
    }
}

impl Decodable for Nick {
    const VERB: &'static str = "NICK";

    fn decode(line: &ParsedLine) -> Result<Self, MessageError> {
        let params = params(line, Self::VERB, 1)?;
        Ok(Self {
            nickname: params[0].clone(),
            prefix: Some(user_source(line, Self::VERB)?),
        })
    }
}

impl Encodable for Nick {
    fn encode(&self) -> String {
        LineWriter::new("NICK").param(&self.nickname).finish()
    }
}

/// `USER`: registration identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    /// Username (ident).
    pub username: String,
    /// Hostname field; ignored by modern servers.
    pub hostname: String,
    /// Server name field; ignored by modern servers.
    pub servername: String,
    /// Real name / GECOS.
    pub realname: String,
}

impl User {
    /// Build a USER registration line.
    pub fn new(
        username: impl Into<String>,
        hostname: impl Into<String>,
        servername: impl Into<String>,
        realname: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            hostname: hostname.into(),
            servername: servername.into(),
            realname: realname.into(),
        }
    }
}

impl Encodable for User {
    fn encode(&self) -> String {
        LineWriter::new("USER")
            .param(&self.username)
            .param(&self.hostname)
            .param(&self.servername)
            .trailing(&self.realname)
            .finish()
    }
}

/// `PASS`: connection password, sent before NICK/USER.
#[derive(Clone, PartialEq, Eq)]
pub struct Pass {
    /// The server password.
    pub password: String,
}

impl Pass {
    /// Build a PASS line.
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pass").field("password", &"<redacted>").finish()
    }
}

impl Encodable for Pass {
    fn encode(&self) -> String {
        LineWriter::new("PASS").trailing(&self.password).finish()
    }
}

/// `CAP`: capability negotiation, in either direction.
///
/// Client form: `CAP <sub> [:caps]`. Server form: `CAP <target> <sub> [*] :caps`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cap {
    /// Target nickname (`*` before registration); server form only.
    pub target: Option<String>,
    /// Subcommand such as `LS`, `REQ`, `ACK`, `END`.
    pub subcommand: String,
    /// Capability names.
    pub capabilities: Vec<String>,
}

impl Cap {
    /// Client-side CAP line.
    pub fn new(subcommand: impl Into<String>, capabilities: Vec<String>) -> Self {
        Self {
            target: None,
            subcommand: subcommand.into(),
            capabilities,
        }
    }
}

impl Decodable for Cap {
    const VERB: &'static str = "CAP";

    fn decode(line: &ParsedLine) -> Result<Self, MessageError> {
        let params = params(line, Self::VERB, 1)?;
        let (target, subcommand, caps) = match params {
            [sub] => (None, sub, None),
            [sub, caps] => (None, sub, Some(caps)),
            // A `*` continuation marker may sit between subcommand and list.
            [target, sub, .., caps] => (Some(target.clone()), sub, Some(caps)),
            [] => {
                return Err(MessageError::Malformed {
                    verb: Self::VERB,
                    expected: 1,
                    got: 0,
                })
            }
        };
        Ok(Self {
            target,
            subcommand: subcommand.clone(),
            capabilities: caps.map(|c| split_words(c)).unwrap_or_default(),
        })
    }
}

impl Encodable for Cap {
    fn encode(&self) -> String {
        let mut writer = LineWriter::new("CAP");
        if let Some(target) = &self.target {
            writer = writer.param(target);
        }
        writer = writer.param(&self.subcommand);
        if self.target.is_some() || !self.capabilities.is_empty() {
            writer = writer.trailing(&self.capabilities.join(" "));
        }
        writer.finish()
    }
}

/// `PING`: liveness probe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ping {
    /// Token (or originating server).
    pub server1: String,
    /// Optional forwarding target.
    pub server2: Option<String>,
}

impl Ping {
    /// PING carrying a single token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            server1: token.into(),
            server2: None,
        }
    }
}

impl Decodable for Ping {
    const VERB: &'static str = "PING";

    fn decode(line: &ParsedLine) -> Result<Self, MessageError> {
        let params = params(line, Self::VERB, 1)?;
        Ok(Self {
            server1: params[0].clone(),
            server2: params.get(1).cloned(),
        })
    }
}

impl Encodable for Ping {
    fn encode(&self) -> String {
        ping_like("PING", &self.server1, self.server2.as_deref())
    }
}

/// `PONG`: liveness reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pong {
    /// Echoed token (or answering server).
    pub server1: String,
    /// Optional second token.
    pub server2: Option<String>,
}

impl Pong {
    /// PONG answering the given PING.
    pub fn reply_to(ping: &Ping) -> Self {
        Self {
            server1: ping.server1.clone(),
            server2: ping.server2.clone(),
        }
    }
}

impl Decodable for Pong {
    const VERB: &'static str = "PONG";

    fn decode(line: &ParsedLine) -> Result<Self, MessageError> {
        let params = params(line, Self::VERB, 1)?;
        Ok(Self {
            server1: params[0].clone(),
            server2: params.get(1).cloned(),
        })
    }
}

impl Encodable for Pong {
    fn encode(&self) -> String {
        ping_like("PONG", &self.server1, self.server2.as_deref())
    }
}

fn ping_like(verb: &str, server1: &str, server2: Option<&str>) -> String {
    match server2 {
        Some(server2) => LineWriter::new(verb).param(server1).trailing(server2),
        None => LineWriter::new(verb).trailing(server1),
    }
    .finish()
}

/// `QUIT`: a user (or the bot) leaves the network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quit {
    /// Quit message.
    pub message: Option<String>,
    /// Who quit (inbound only).
    pub prefix: Option<UserPrefix>,
}

impl Quit {
    /// Outbound QUIT.
    pub fn new(message: Option<String>) -> Self {
        Self {
            message,
            prefix: None,
        }
    }
}

impl Decodable for Quit {
    const VERB: &'static str = "QUIT";

    fn decode(line: &ParsedLine) -> Result<Self, MessageError> {
        let params = params(line, Self::VERB, 0)?;
        Ok(Self {
            message: params.first().cloned(),
            prefix: Some(user_source(line, Self::VERB)?),
        })
    }
}

impl Encodable for Quit {
    fn encode(&self) -> String {
        LineWriter::new("QUIT")
            .trailing_opt(self.message.as_deref())
            .finish()
    }
}

/// `ERROR`: the server is about to close the link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerError {
    /// Reason given by the server.
    pub message: String,
}

impl Decodable for ServerError {
    const VERB: &'static str = "ERROR";

    fn decode(line: &ParsedLine) -> Result<Self, MessageError> {
        let params = params(line, Self::VERB, 1)?;
        Ok(Self {
            message: params[0].clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::parse;

    #[test]
    fn test_nick_requires_source() {
        let line = parse("NICK newnick").unwrap();
        assert_eq!(Nick::decode(&line), Err(MessageError::MissingPrefix("NICK")));

        let line = parse(":old!u@h NICK :newnick").unwrap();
        let nick = Nick::decode(&line).unwrap();
        assert_eq!(nick.nickname, "newnick");
        assert_eq!(nick.prefix.unwrap().nickname, "old");
    }

    #[test]
    fn test_user_encoding() {
        let user = User::new("bot", "0", "*", "A Bot");
        assert_eq!(user.encode(), "USER bot 0 * :A Bot\r\n");
    }

    #[test]
    fn test_pass_debug_hides_password() {
        let pass = Pass::new("hunter2");
        assert_eq!(pass.encode(), "PASS :hunter2\r\n");
        assert!(!format!("{:?}", pass).contains("hunter2"));
    }

    #[test]
    fn test_cap_server_forms() {
        let line = parse(":irc CAP * LS :multi-prefix sasl").unwrap();
        let cap = Cap::decode(&line).unwrap();
        assert_eq!(cap.target.as_deref(), Some("*"));
        assert_eq!(cap.subcommand, "LS");
        assert_eq!(cap.capabilities, ["multi-prefix", "sasl"]);

        let line = parse(":irc CAP * LS * :away-notify").unwrap();
        let cap = Cap::decode(&line).unwrap();
        assert_eq!(cap.capabilities, ["away-notify"]);
    }

    #[test]
    fn test_cap_client_forms() {
        assert_eq!(Cap::new("END", vec![]).encode(), "CAP END\r\n");
        assert_eq!(
            Cap::new("REQ", vec!["a".into(), "b".into()]).encode(),
            "CAP REQ :a b\r\n"
        );
    }

    #[test]
    fn test_ping_pong() {
        let ping = Ping::decode(&parse("PING :irc.example.net").unwrap()).unwrap();
        assert_eq!(ping.server1, "irc.example.net");
        assert_eq!(Pong::reply_to(&ping).encode(), "PONG :irc.example.net\r\n");
    }

    #[test]
    fn test_quit_without_message() {
        let quit = Quit::decode(&parse(":a!b@c QUIT").unwrap()).unwrap();
        assert_eq!(quit.message, None);
        assert_eq!(Quit::new(None).encode(), "QUIT\r\n");
    }

    #[test]
    fn test_server_error() {
        let err = ServerError::decode(&parse("ERROR :Closing Link: timeout").unwrap()).unwrap();
        assert_eq!(err.message, "Closing Link: timeout");
    }
}
