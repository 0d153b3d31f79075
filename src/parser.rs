//! Option grammar for the `isdataat` keyword.
//!
//! ```text
//! option   := ws* offset ws* ( "," ws* "relative" ws* ( "," ws* "rawbytes" ws* )? )? ws*
//! offset   := digit{1,10}
//! ```
//!
//! The text is first split into [`Token`]s, then a small recursive descent
//! parser walks the token slice. The structure is checked in full before the
//! numeric bounds, so a string that is both malformed and out of range is
//! reported as malformed.

use crate::config::KeywordConfig;
use crate::criterion::Criterion;
use crate::error::ParseError;
use std::fmt;

/// Maximum number of decimal digits accepted for the offset.
pub const MAX_OFFSET_DIGITS: usize = 10;

const RELATIVE: &str = "relative";
const RAWBYTES: &str = "rawbytes";

/// Tokens in an `isdataat` option string.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Number(String),
    Word(String),
    Comma,
    Unexpected(char),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(digits) => write!(f, "number '{digits}'"),
            Token::Word(word) => write!(f, "'{word}'"),
            Token::Comma => write!(f, "','"),
            Token::Unexpected(ch) => write!(f, "character {ch:?}"),
        }
    }
}

/// Split option text into tokens. ASCII whitespace only separates tokens.
pub(crate) fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&ch) = chars.peek() {
        match ch {
            c if c.is_ascii_whitespace() => {
                chars.next();
            }
            ',' => {
                tokens.push(Token::Comma);
                chars.next();
            }
            c if c.is_ascii_digit() => {
                let mut digits = String::new();
                while let Some(&c) = chars.peek() {
                    if !c.is_ascii_digit() {
                        break;
                    }
                    digits.push(c);
                    chars.next();
                }
                tokens.push(Token::Number(digits));
            }
            c if c.is_ascii_alphabetic() => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if !c.is_ascii_alphanumeric() {
                        break;
                    }
                    word.push(c);
                    chars.next();
                }
                tokens.push(Token::Word(word));
            }
            other => {
                tokens.push(Token::Unexpected(other));
                chars.next();
            }
        }
    }

    tokens
}

/// Recursive descent parser over a token slice.
pub(crate) struct OptionParser<'a> {
    tokens: &'a [Token],
    position: usize,
    bounds: &'a KeywordConfig,
}

impl<'a> OptionParser<'a> {
    pub(crate) fn new(tokens: &'a [Token], bounds: &'a KeywordConfig) -> Self {
        Self {
            tokens,
            position: 0,
            bounds,
        }
    }

    fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.current_token().cloned();
        self.position += 1;
        token
    }

    pub(crate) fn parse_criterion(&mut self) -> Result<Criterion, ParseError> {
        let offset = self.parse_offset()?;
        let relative = self.parse_flag(RELATIVE)?;
        let rawbytes = relative && self.parse_flag(RAWBYTES)?;

        if let Some(token) = self.current_token() {
            return Err(ParseError::Malformed(format!(
                "unexpected {token} after options"
            )));
        }

        let out_of_range = ParseError::OutOfRange {
            value: offset,
            min: self.bounds.min_offset,
            max: self.bounds.max_offset,
        };
        if !self.bounds.contains(offset) {
            return Err(out_of_range);
        }
        let offset = u32::try_from(offset).map_err(|_| out_of_range)?;
        Ok(if relative {
            Criterion::relative(offset, rawbytes)
        } else {
            Criterion::absolute(offset)
        })
    }

    fn parse_offset(&mut self) -> Result<u64, ParseError> {
        match self.advance() {
            Some(Token::Number(digits)) => {
                if digits.len() > MAX_OFFSET_DIGITS {
                    return Err(ParseError::Malformed(format!(
                        "offset has more than {} digits",
                        MAX_OFFSET_DIGITS
                    )));
                }
                digits
                    .parse::<u64>()
                    .map_err(|e| ParseError::Malformed(format!("invalid offset '{digits}': {e}")))
            }
            Some(token) => Err(ParseError::Malformed(format!(
                "expected offset, found {token}"
            ))),
            None => Err(ParseError::Malformed("expected offset".to_string())),
        }
    }

    /// Consume `, <name>` if a comma follows. A comma followed by anything
    /// other than `name` is malformed, which is what keeps `rawbytes` from
    /// appearing without `relative` in front of it.
    fn parse_flag(&mut self, name: &str) -> Result<bool, ParseError> {
        if !matches!(self.current_token(), Some(Token::Comma)) {
            return Ok(false);
        }
        self.advance();

        match self.advance() {
            Some(Token::Word(word)) if word == name => Ok(true),
            Some(token) => Err(ParseError::Malformed(format!(
                "expected '{name}', found {token}"
            ))),
            None => Err(ParseError::Malformed(format!(
                "expected '{name}' after ','"
            ))),
        }
    }
}

/// Parse option text with the default offset bounds.
///
/// # Examples
///
/// ```rust
/// use isdataat::{parse, Criterion};
///
/// assert_eq!(parse("50")?, Criterion::absolute(50));
/// assert_eq!(parse("30,relative, rawbytes ")?, Criterion::relative(30, true));
/// assert!(parse("30,rawbytes").is_err());
/// # Ok::<(), isdataat::ParseError>(())
/// ```
pub fn parse(text: &str) -> Result<Criterion, ParseError> {
    parse_with_config(text, &KeywordConfig::default())
}

/// Parse option text, enforcing the bounds in `config`.
pub fn parse_with_config(text: &str, config: &KeywordConfig) -> Result<Criterion, ParseError> {
    let tokens = tokenize(text);
    OptionParser::new(&tokens, config).parse_criterion()
}
