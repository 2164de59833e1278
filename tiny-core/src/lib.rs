//! Tiny language core
//!
//! A streaming lexer for the Tiny language. Raw text arrives one line at a
//! time from a [`LineSource`]; the [`Lexer`] turns it into located tokens for
//! a parser to pull one by one.

pub mod lexer;

pub use lexer::{
    BufferSource, ContractViolation, Cursor, LineSource, Lexeme, Lexemes, Lexer, Location,
    Position, ReaderSource, SourceError, Token,
};
