//! Tiny lexer
//!
//! - `source`: where lines come from (memory, readers, files, stdin)
//! - `cursor`: one character at a time across line boundaries
//! - `lexer`: token recognition with one token and one character of lookahead

pub mod cursor;
pub mod error;
pub mod lexeme;
pub mod lexer;
pub mod location;
pub mod source;
pub mod token;

pub use cursor::Cursor;
pub use error::{ContractViolation, SourceError};
pub use lexeme::{Lexeme, Lexemes};
pub use lexer::Lexer;
pub use location::{Location, Position};
pub use source::{BufferSource, LineSource, ReaderSource};
pub use token::Token;
