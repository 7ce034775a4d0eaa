//! IRCv3 message tag parsing and unescaping.

use std::collections::HashMap;

use super::types::TagValue;

/// Parse the tag block of a line (without the leading `@`).
///
/// Items are `;`-separated; empty items are skipped. A later duplicate key
/// overwrites an earlier one.
pub fn parse_tags(block: &str) -> HashMap<String, TagValue> {
    block
        .split(';')
        .filter(|item| !item.is_empty())
        .map(|item| match item.split_once('=') {
            Some((key, value)) => (key.to_owned(), TagValue::Value(unescape_tag_value(value))),
            None => (item.to_owned(), TagValue::Flag),
        })
        .collect()
}

/// Unescape a tag value from wire format.
pub fn unescape_tag_value(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut iter = value.chars();
    while let Some(c) = iter.next() {
        let r = if c == '\\' {
            match iter.next() {
                Some(':') => ';',
                Some('s') => ' ',
                Some('\\') => '\\',
                Some('r') => '\r',
                Some('n') => '\n',
                Some(c) => c,
                None => break,
            }
        } else {
            c
        };
        unescaped.push(r);
    }
    unescaped
}
