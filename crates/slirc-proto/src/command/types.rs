use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::MessageError;
use crate::message::ParsedLine;
use crate::response::{
    ErrNicknameInUse, RplIsupport, RplNamReply, RplTopic, RplWelcome, RplWhoSpcRpl,
};

use super::{
    Cap, Decodable, Join, Kick, Mode, Nick, Notice, Part, Ping, Pong, Privmsg, Quit, ServerError,
    Topic,
};

type DecodeFn = fn(&ParsedLine) -> Result<Incoming, MessageError>;

macro_rules! incoming {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        /// Every inbound message the engine understands.
        #[derive(Clone, Debug, PartialEq, Eq)]
        pub enum Incoming {
            $(
                #[allow(missing_docs)]
                $variant($ty),
            )*
            /// A well-formed line whose verb has no decoder.
            Unhandled(ParsedLine),
        }

        fn build_registry() -> HashMap<&'static str, DecodeFn> {
            let mut registry: HashMap<&'static str, DecodeFn> = HashMap::new();
            $(
                registry.insert(<$ty as Decodable>::VERB, |line: &ParsedLine| {
                    <$ty as Decodable>::decode(line).map(Incoming::$variant)
                });
            )*
            registry
        }
    };
}

incoming! {
    Nick(Nick),
    Join(Join),
    Part(Part),
    Kick(Kick),
    Mode(Mode),
    Topic(Topic),
    Privmsg(Privmsg),
    Notice(Notice),
    Ping(Ping),
    Pong(Pong),
    Quit(Quit),
    Cap(Cap),
    Error(ServerError),
    Welcome(RplWelcome),
    Isupport(RplIsupport),
    TopicReply(RplTopic),
    NamReply(RplNamReply),
    WhoReply(RplWhoSpcRpl),
    NicknameInUse(ErrNicknameInUse),
}

fn registry() -> &'static HashMap<&'static str, DecodeFn> {
    static REGISTRY: OnceLock<HashMap<&'static str, DecodeFn>> = OnceLock::new();
    REGISTRY.get_or_init(build_registry)
}

impl Incoming {
    /// Decode a parsed line with the decoder registered for its verb.
    ///
    /// Verbs without a decoder yield [`Incoming::Unhandled`] rather than an
    /// error.
    pub fn decode(line: &ParsedLine) -> Result<Self, MessageError> {
        match registry().get(line.verb.as_str()) {
            Some(decode) => decode(line),
            None => Ok(Incoming::Unhandled(line.clone())),
        }
    }

    /// Whether a decoder is registered for `verb`.
    pub fn is_handled(verb: &str) -> bool {
        registry().contains_key(verb)
    }

    /// Nickname of the user who sent this message, if it came from a user.
    pub fn source_nickname(&self) -> Option<&str> {
        match self {
            Incoming::Nick(m) => m.prefix.as_ref().map(|p| p.nickname.as_str()),
            Incoming::Join(m) => m.prefix.as_ref().map(|p| p.nickname.as_str()),
            Incoming::Part(m) => m.prefix.as_ref().map(|p| p.nickname.as_str()),
            Incoming::Kick(m) => m.prefix.as_ref().map(|p| p.nickname.as_str()),
            Incoming::Privmsg(m) => m.prefix.as_ref().map(|p| p.nickname.as_str()),
            Incoming::Quit(m) => m.prefix.as_ref().map(|p| p.nickname.as_str()),
            Incoming::Mode(m) => m.prefix.as_ref().and_then(|p| p.nickname()),
            Incoming::Topic(m) => m.prefix.as_ref().and_then(|p| p.nickname()),
            Incoming::Notice(m) => m.prefix.as_ref().and_then(|p| p.nickname()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::parse;

    #[test]
    fn test_dispatch_by_verb() {
        let line = parse(":a!b@c PRIVMSG #chan :hello").unwrap();
        match Incoming::decode(&line).unwrap() {
            Incoming::Privmsg(msg) => assert_eq!(msg.message, "hello"),
            other => panic!("expected PRIVMSG, got {:?}", other),
        }

        let line = parse(":irc 353 me = #c :@a b").unwrap();
        assert!(matches!(
            Incoming::decode(&line).unwrap(),
            Incoming::NamReply(_)
        ));
    }

    #[test]
    fn test_unknown_verb_is_unhandled() {
        let line = parse(":irc 372 me :- motd line").unwrap();
        assert_eq!(
            Incoming::decode(&line).unwrap(),
            Incoming::Unhandled(line.clone())
        );
        assert!(!Incoming::is_handled("372"));
        assert!(Incoming::is_handled("001"));
    }

    #[test]
    fn test_decode_errors_propagate() {
        let line = parse("KICK #c").unwrap();
        assert!(matches!(
            Incoming::decode(&line),
            Err(MessageError::Malformed { verb: "KICK", .. })
        ));
    }

    #[test]
    fn test_source_nickname() {
        let line = parse(":alice!a@h JOIN #c").unwrap();
        assert_eq!(
            Incoming::decode(&line).unwrap().source_nickname(),
            Some("alice")
        );
        let line = parse(":irc.example.net MODE #c +t").unwrap();
        assert_eq!(Incoming::decode(&line).unwrap().source_nickname(), None);
    }
}
