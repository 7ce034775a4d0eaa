//! IRC message prefix types.
//!
//! A prefix identifies the origin of a message: either a server name or a
//! user's `nick!user@host` mask.

use std::str::FromStr;

use crate::error::MessageError;

/// Source of a user-originated message, `nick!user@host`.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserPrefix {
    /// Nickname at the time the message was sent.
    pub nickname: String,
    /// Username (ident).
    pub username: String,
    /// Hostname or cloak.
    pub hostname: String,
}

impl UserPrefix {
    /// Create a user prefix from its three components.
    pub fn new(
        nickname: impl Into<String>,
        username: impl Into<String>,
        hostname: impl Into<String>,
    ) -> Self {
        Self {
            nickname: nickname.into(),
            username: username.into(),
            hostname: hostname.into(),
        }
    }
}

impl FromStr for UserPrefix {
    type Err = MessageError;

    /// Parse `nick!user@host`. Nickname and hostname must be non-empty.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MessageError::InvalidPrefix(s.to_owned());
        let (nickname, mask) = s.split_once('!').ok_or_else(invalid)?;
        let (username, hostname) = mask.split_once('@').ok_or_else(invalid)?;
        if nickname.is_empty() || hostname.is_empty() || s.contains(' ') {
            return Err(invalid());
        }
        Ok(Self::new(nickname, username, hostname))
    }
}

/// Any message source.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Prefix {
    /// Server name (e.g., "irc.example.net").
    Server(String),
    /// A user mask.
    User(UserPrefix),
}

impl Prefix {
    /// Classify a prefix string. Anything that is not a well-formed user mask
    /// is treated as a server name.
    pub fn new_from_str(s: &str) -> Self {
        match s.parse::<UserPrefix>() {
            Ok(user) => Prefix::User(user),
            Err(_) => Prefix::Server(s.to_owned()),
        }
    }

    /// Nickname if this is a user prefix.
    pub fn nickname(&self) -> Option<&str> {
        match self {
            Prefix::User(user) => Some(&user.nickname),
            Prefix::Server(_) => None,
        }
    }
}

impl From<&str> for Prefix {
    fn from(s: &str) -> Self {
        Prefix::new_from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_prefix() {
        let prefix: UserPrefix = "nick!user@host.example".parse().unwrap();
        assert_eq!(prefix.nickname, "nick");
        assert_eq!(prefix.username, "user");
        assert_eq!(prefix.hostname, "host.example");
    }

    #[test]
    fn test_user_prefix_allows_tilde_user() {
        let prefix: UserPrefix = "nick!~u@h".parse().unwrap();
        assert_eq!(prefix.username, "~u");
    }

    #[test]
    fn test_rejects_malformed_user_prefix() {
        for bad in ["irc.example.net", "nick@host", "nick!user", "!user@host", "nick!user@"] {
            assert!(
                matches!(bad.parse::<UserPrefix>(), Err(MessageError::InvalidPrefix(_))),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn test_prefix_classification() {
        assert_eq!(
            Prefix::new_from_str("irc.example.net"),
            Prefix::Server("irc.example.net".to_string())
        );
        assert_eq!(Prefix::from("a!b@c").nickname(), Some("a"));
    }

    #[test]
    fn test_display_roundtrip() {
        let prefix = UserPrefix::new("a", "b", "c");
        assert_eq!(prefix.to_string(), "a!b@c");
        assert_eq!(Prefix::User(prefix).to_string(), "a!b@c");
        assert_eq!(Prefix::Server("irc".into()).to_string(), "irc");
    }
}
