use crate::error::MessageError;
use crate::message::ParsedLine;
use crate::prefix::{Prefix, UserPrefix};

/// Check the verb and minimum arity, returning the parameters.
pub(crate) fn params<'a>(
    line: &'a ParsedLine,
    verb: &'static str,
    min: usize,
) -> Result<&'a [String], MessageError> {
    if line.verb != verb {
        return Err(MessageError::VerbMismatch {
            expected: verb,
            got: line.verb.clone(),
        });
    }
    let params = line.params();
    if params.len() < min {
        return Err(MessageError::Malformed {
            verb,
            expected: min,
            got: params.len(),
        });
    }
    Ok(params)
}

/// The mandatory `nick!user@host` source of a user-originated message.
pub(crate) fn user_source(line: &ParsedLine, verb: &'static str) -> Result<UserPrefix, MessageError> {
    line.prefix
        .as_deref()
        .ok_or(MessageError::MissingPrefix(verb))?
        .parse()
}

/// The optional source of a message that servers and users both send.
pub(crate) fn any_source(line: &ParsedLine) -> Option<Prefix> {
    line.prefix.as_deref().map(Prefix::new_from_str)
}

/// Split a comma-separated target list, dropping empty entries.
pub(crate) fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Split a space-separated word list, dropping empty entries.
pub(crate) fn split_words(words: &str) -> Vec<String> {
    words
        .split(' ')
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
