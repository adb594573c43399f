//! Nom Tokenizer for Roman Numerals
//!
//! Splits input into numeral symbols: a subtractive pair ("IV", "IX", "XL",
//! "XC", "CD", "CM") where one starts at the current position, otherwise a
//! single character.
//!
//! The scan is greedy with one character of lookahead and never backtracks.
//! No character is rejected here. Symbols missing from the table are the
//! valuator's concern.

use std::borrow::Cow;
use std::fmt;

use nom::{
    branch::alt,
    bytes::complete::{tag, take},
    IResult,
};
use tracing::trace;

/// One numeral unit taken from the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol<'a> {
    text: Cow<'a, str>,
    offset: usize,
}

impl<'a> Symbol<'a> {
    pub fn new(text: impl Into<Cow<'a, str>>, offset: usize) -> Self {
        Self {
            text: text.into(),
            offset,
        }
    }

    /// The symbol text, one or two characters
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte offset of the symbol in the tokenized input
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Detach from the input so the symbol can move across tasks
    pub fn into_owned(self) -> Symbol<'static> {
        Symbol {
            text: Cow::Owned(self.text.into_owned()),
            offset: self.offset,
        }
    }
}

impl fmt::Display for Symbol<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// =============================================================================
// PARSERS
// =============================================================================

/// A smaller numeral directly before a larger one: I+{V,X}, X+{L,C}, C+{D,M}
fn subtractive_pair(input: &str) -> IResult<&str, &str> {
    alt((
        tag("IV"),
        tag("IX"),
        tag("XL"),
        tag("XC"),
        tag("CD"),
        tag("CM"),
    ))(input)
}

/// Any single character, recognized numeral or not
fn single_char(input: &str) -> IResult<&str, &str> {
    take(1usize)(input)
}

/// Parse the next symbol from the front of `input`
pub fn symbol(input: &str) -> IResult<&str, &str> {
    alt((subtractive_pair, single_char))(input)
}

// =============================================================================
// LAZY SEQUENCE
// =============================================================================

/// Lazy, left-to-right sequence of symbols covering the whole input
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    remaining: &'a str,
    offset: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            remaining: input,
            offset: 0,
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Symbol<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }

        // single_char always matches non-empty input
        let (rest, text) = symbol(self.remaining).ok()?;
        let offset = self.offset;
        self.offset += text.len();
        self.remaining = rest;

        trace!(symbol = text, offset, "tokenized symbol");
        Some(Symbol::new(text, offset))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let bytes = self.remaining.len();
        (usize::from(bytes > 0), Some(bytes))
    }
}
