//! Line tokenizer.
//!
//! Splits a raw line into tags, prefix, verb and arguments. Runs of spaces
//! between tokens collapse; the trailing argument (introduced by a token
//! starting with `:`) keeps the rest of the line verbatim.

use std::str::FromStr;

use crate::error::ParseError;

use super::nom_parser::parse_tokens;
use super::tags::parse_tags;
use super::types::ParsedLine;

/// Tokenize a raw IRC line.
///
/// A trailing CR/LF is stripped first. Fails with [`ParseError::EmptyLine`]
/// when nothing but whitespace is present, and with
/// [`ParseError::MissingVerb`] when tags or a prefix are not followed by a
/// verb.
pub fn parse(raw: &str) -> Result<ParsedLine, ParseError> {
    let line = raw.trim_end_matches(&['\r', '\n'][..]);
    if line.trim_start_matches(' ').is_empty() {
        return Err(ParseError::EmptyLine);
    }

    let (_, tokens) =
        parse_tokens(line).map_err(|_| ParseError::MissingVerb(line.to_owned()))?;

    let verb = tokens.verb.to_ascii_uppercase();
    let mut args = Vec::with_capacity(tokens.params.len() + 1);
    args.push(verb.clone());
    args.extend(tokens.params.iter().map(|param| (*param).to_owned()));

    Ok(ParsedLine {
        tags: tokens.tags.map(parse_tags).unwrap_or_default(),
        prefix: tokens.prefix.map(str::to_owned),
        verb,
        args,
    })
}

impl FromStr for ParsedLine {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::TagValue;

    #[test]
    fn test_full_line() {
        let line = parse("@id=1;bot :nick!u@h PRIVMSG #chan :hello world").unwrap();
        assert_eq!(line.tags.get("id"), Some(&TagValue::Value("1".into())));
        assert_eq!(line.tags.get("bot"), Some(&TagValue::Flag));
        assert_eq!(line.prefix.as_deref(), Some("nick!u@h"));
        assert_eq!(line.verb, "PRIVMSG");
        assert_eq!(line.args, ["PRIVMSG", "#chan", "hello world"]);
    }

    #[test]
    fn test_trailing_is_single_argument() {
        let line = parse("JOIN :#a,#b").unwrap();
        assert_eq!(line.params(), ["#a,#b"]);
    }

    #[test]
    fn test_collapses_space_runs() {
        let line = parse("  :server   MODE  #chan   +o   nick  ").unwrap();
        assert_eq!(line.prefix.as_deref(), Some("server"));
        assert_eq!(line.args, ["MODE", "#chan", "+o", "nick"]);
    }

    #[test]
    fn test_trailing_preserves_spaces() {
        let line = parse("PRIVMSG #c :  two  spaces  \r\n").unwrap();
        assert_eq!(line.params(), ["#c", "  two  spaces  "]);
    }

    #[test]
    fn test_trailing_may_be_empty() {
        let line = parse("TOPIC #c :").unwrap();
        assert_eq!(line.params(), ["#c", ""]);
    }

    #[test]
    fn test_verb_is_uppercased() {
        let line = parse("privmsg #c :hi").unwrap();
        assert_eq!(line.verb, "PRIVMSG");
        assert_eq!(line.args[0], "PRIVMSG");
    }

    #[test]
    fn test_numeric_verb() {
        let line = parse(":irc.example.net 001 bot :Welcome").unwrap();
        assert_eq!(line.verb, "001");
        assert_eq!(line.params(), ["bot", "Welcome"]);
    }

    #[test]
    fn test_colon_inside_middle_param() {
        let line = parse("PRIVMSG a:b :c").unwrap();
        assert_eq!(line.params(), ["a:b", "c"]);
    }

    #[test]
    fn test_empty_line_fails() {
        assert_eq!(parse(""), Err(ParseError::EmptyLine));
        assert_eq!(parse("   \r\n"), Err(ParseError::EmptyLine));
    }

    #[test]
    fn test_tags_and_prefix_only_fail() {
        assert!(matches!(parse("@a=b"), Err(ParseError::MissingVerb(_))));
        assert!(matches!(parse(":server"), Err(ParseError::MissingVerb(_))));
        assert!(matches!(parse("@a :server  "), Err(ParseError::MissingVerb(_))));
        assert!(matches!(parse(":server :text"), Err(ParseError::MissingVerb(_))));
    }

    #[test]
    fn test_from_str() {
        let line: ParsedLine = "PING :token".parse().unwrap();
        assert_eq!(line.verb, "PING");
    }
}
