//! Nom-based line tokenizer.
//!
//! Borrows from the input; [`super::parse`] turns the result into an owned
//! [`ParsedLine`](super::ParsedLine).

use nom::{
    branch::alt,
    bytes::complete::{take_till, take_while, take_while1},
    character::complete::char,
    combinator::{opt, rest, verify},
    multi::many0,
    sequence::preceded,
    IResult,
};

/// Runs of spaces separate tokens; tabs are not separators.
fn spaces0(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c == ' ')(input)
}

fn spaces1(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c == ' ')(input)
}

/// Tag block without the leading `@`.
fn parse_tags(input: &str) -> IResult<&str, &str> {
    preceded(char('@'), take_till(|c: char| c == ' '))(input)
}

/// Message source without the leading `:`.
fn parse_prefix(input: &str) -> IResult<&str, &str> {
    preceded(char(':'), take_till(|c: char| c == ' '))(input)
}

/// First positional token. A trailing argument is never a verb.
fn parse_verb(input: &str) -> IResult<&str, &str> {
    verify(take_while1(|c: char| c != ' '), |verb: &str| !verb.starts_with(':'))(input)
}

/// `:`-introduced final argument: the rest of the line, spaces and all.
fn parse_trailing(input: &str) -> IResult<&str, &str> {
    preceded(char(':'), rest)(input)
}

fn parse_middle(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c != ' ')(input)
}

/// Arguments after the verb. Parsing stops after a trailing argument.
fn parse_params(input: &str) -> IResult<&str, Vec<&str>> {
    many0(preceded(spaces1, alt((parse_trailing, parse_middle))))(input)
}

/// A tokenized line borrowing from its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawTokens<'a> {
    pub tags: Option<&'a str>,
    pub prefix: Option<&'a str>,
    pub verb: &'a str,
    pub params: Vec<&'a str>,
}

/// Tokenize a line whose CR/LF terminator is already stripped.
pub(crate) fn parse_tokens(input: &str) -> IResult<&str, RawTokens<'_>> {
    let (input, _) = spaces0(input)?;
    let (input, tags) = opt(parse_tags)(input)?;
    let (input, _) = spaces0(input)?;
    let (input, prefix) = opt(parse_prefix)(input)?;
    let (input, _) = spaces0(input)?;
    let (input, verb) = parse_verb(input)?;
    let (input, params) = parse_params(input)?;

    Ok((
        input,
        RawTokens {
            tags,
            prefix,
            verb,
            params,
        },
    ))
}
