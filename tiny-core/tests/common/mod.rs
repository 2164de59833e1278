//! Shared helpers for the lexer integration tests

#![allow(dead_code)]

use tiny_core::{BufferSource, Lexeme, Lexer, Location, Token};

pub const FILE: &str = "test.tiny";

/// Lexer over an in-memory string
pub fn lexer(input: &str) -> Lexer<BufferSource> {
    Lexer::new(BufferSource::new(input), FILE)
}

/// Every token through the first end of file
pub fn tokens(input: &str) -> Vec<Token> {
    lexemes(input).into_iter().map(|l| l.token).collect()
}

pub fn lexemes(input: &str) -> Vec<Lexeme> {
    lexer(input).lexemes().collect()
}

/// `(line, column)` of a location
pub fn at(location: &Location) -> (usize, usize) {
    (location.line, location.column)
}
