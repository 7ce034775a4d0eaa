use std::collections::HashMap;

/// Value of an IRCv3 message tag.
///
/// A tag written as `key` with no `=` is a [`TagValue::Flag`]; one written
/// as `key=value` carries the unescaped value.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TagValue {
    /// Tag present without a value (boolean true).
    Flag,
    /// Tag with an explicit (possibly empty) value.
    Value(String),
}

impl TagValue {
    /// The string value, or `None` for a bare flag.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TagValue::Flag => None,
            TagValue::Value(v) => Some(v),
        }
    }
}

/// A tokenized IRC line.
///
/// By convention `args[0]` is the verb itself, so the parameters of the
/// message start at index 1 (see [`ParsedLine::params`]).
///
/// # Example
///
/// ```
/// use slirc_proto::message::{parse, TagValue};
///
/// let line = parse("@id=1;bot :nick!u@h PRIVMSG #chan :hello world").unwrap();
/// assert_eq!(line.verb, "PRIVMSG");
/// assert_eq!(line.prefix.as_deref(), Some("nick!u@h"));
/// assert_eq!(line.tags.get("bot"), Some(&TagValue::Flag));
/// assert_eq!(line.params(), ["#chan", "hello world"]);
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedLine {
    /// IRCv3 message tags.
    pub tags: HashMap<String, TagValue>,
    /// Message source without the leading `:`.
    pub prefix: Option<String>,
    /// Upper-cased verb or three-digit numeric.
    pub verb: String,
    /// Verb followed by every parameter, trailing parameter last.
    pub args: Vec<String>,
}

impl ParsedLine {
    /// Parameters following the verb.
    pub fn params(&self) -> &[String] {
        self.args.get(1..).unwrap_or(&[])
    }

    /// Look up a tag value by key. Bare flags yield `Some("")`.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(|v| v.as_str().unwrap_or(""))
    }
}
