//! Token kinds

use std::fmt;

use serde::Serialize;

/// A classified token
///
/// Identifiers and numbers carry no payload here; the lexer keeps the text
/// or value of the current token (see [`crate::Lexer::identifier_text`] and
/// [`crate::Lexer::numeric_value`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Token {
    /// `;`
    Semicolon,
    /// `(`
    ParenOpen,
    /// `)`
    ParenClose,
    /// `{`
    BraceOpen,
    /// `}`
    BraceClose,
    /// `[`
    BracketOpen,
    /// `]`
    BracketClose,

    Return,
    Var,
    Def,
    Struct,

    Identifier,
    Number,
    Eof,

    /// Any other single character, passed through verbatim
    ///
    /// Also produced for the character that breaks an identifier's shape
    /// (a letter or `_` after a digit).
    Char(char),
}

const KEYWORDS: [(&str, Token); 4] = [
    ("return", Token::Return),
    ("def", Token::Def),
    ("var", Token::Var),
    ("struct", Token::Struct),
];

impl Token {
    /// Single character token, mapping the punctuation marks to their named
    /// variants
    pub fn from_char(c: char) -> Token {
        match c {
            ';' => Token::Semicolon,
            '(' => Token::ParenOpen,
            ')' => Token::ParenClose,
            '{' => Token::BraceOpen,
            '}' => Token::BraceClose,
            '[' => Token::BracketOpen,
            ']' => Token::BracketClose,
            other => Token::Char(other),
        }
    }

    /// Keyword spelled exactly `text`, if any
    pub fn keyword(text: &str) -> Option<Token> {
        KEYWORDS
            .iter()
            .find(|(spelling, _)| *spelling == text)
            .map(|(_, token)| *token)
    }

    /// The character of a single character token
    pub fn as_char(&self) -> Option<char> {
        match self {
            Token::Semicolon => Some(';'),
            Token::ParenOpen => Some('('),
            Token::ParenClose => Some(')'),
            Token::BraceOpen => Some('{'),
            Token::BraceClose => Some('}'),
            Token::BracketOpen => Some('['),
            Token::BracketClose => Some(']'),
            Token::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            Token::Return | Token::Var | Token::Def | Token::Struct
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Return => f.write_str("return"),
            Token::Var => f.write_str("var"),
            Token::Def => f.write_str("def"),
            Token::Struct => f.write_str("struct"),
            Token::Identifier => f.write_str("identifier"),
            Token::Number => f.write_str("number"),
            Token::Eof => f.write_str("end of file"),
            other => match other.as_char() {
                Some(c) => write!(f, "'{}'", c.escape_debug()),
                None => unreachable!("every remaining token is a single character"),
            },
        }
    }
}
