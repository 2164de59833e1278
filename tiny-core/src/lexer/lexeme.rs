//! Self-contained token snapshots

use std::iter::FusedIterator;

use serde::Serialize;

use super::lexer::Lexer;
use super::location::Location;
use super::source::LineSource;
use super::token::Token;

/// A token together with its location and payload
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Lexeme {
    pub token: Token,
    pub location: Location,
    /// Identifier text, for [`Token::Identifier`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Number value, for [`Token::Number`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// Iterator returned by [`Lexer::lexemes`]
///
/// Yields the end of file lexeme once, then stops.
pub struct Lexemes<'a, S> {
    lexer: &'a mut Lexer<S>,
    done: bool,
}

impl<'a, S: LineSource> Lexemes<'a, S> {
    pub(super) fn new(lexer: &'a mut Lexer<S>) -> Self {
        Self { lexer, done: false }
    }
}

impl<S: LineSource> Iterator for Lexemes<'_, S> {
    type Item = Lexeme;

    fn next(&mut self) -> Option<Lexeme> {
        if self.done {
            return None;
        }
        if self.lexer.advance() == Token::Eof {
            self.done = true;
        }
        Some(self.lexer.lexeme())
    }
}

impl<S: LineSource> FusedIterator for Lexemes<'_, S> {}
