//! Token recognition
//!
//! ```
//! use tiny_core::{BufferSource, Lexer, Token};
//!
//! let mut lexer = Lexer::new(BufferSource::new("var x;\n"), "demo.tiny");
//! assert_eq!(lexer.advance(), Token::Var);
//! assert_eq!(lexer.advance(), Token::Identifier);
//! assert_eq!(lexer.identifier_text(), "x");
//! lexer.expect_and_advance(Token::Identifier);
//! assert_eq!(lexer.current_token(), Token::Semicolon);
//! ```

use std::sync::Arc;

use tiny_log::{trace, warn, Logger};

use super::cursor::Cursor;
use super::error::ContractViolation;
use super::lexeme::{Lexeme, Lexemes};
use super::location::{Location, Position};
use super::source::LineSource;
use super::token::Token;

/// Lookahead before the first token; any whitespace works.
const SEED: char = ' ';

/// Pull-based lexer with one token and one character of lookahead
///
/// The parser calls [`Lexer::advance`] to move on and inspects the current
/// token, its location and, for identifiers and numbers, its payload.
pub struct Lexer<S> {
    cursor: Cursor<S>,
    file: Arc<str>,
    current: Token,
    location: Location,
    identifier: String,
    number: f64,
    /// Always the character right after the last one consumed into a token
    lookahead: Option<char>,
    /// Position of `lookahead`
    lookahead_at: Position,
    logger: Arc<Logger>,
}

impl<S: LineSource> Lexer<S> {
    /// Lexer over `source`; `file` only labels locations
    pub fn new(source: S, file: impl Into<Arc<str>>) -> Self {
        Self::with_logger(source, file, Logger::noop())
    }

    pub fn with_logger(source: S, file: impl Into<Arc<str>>, logger: Arc<Logger>) -> Self {
        let file = file.into();
        trace!(logger, "Creating lexer for '{}'", file);
        Self {
            cursor: Cursor::with_logger(source, Arc::clone(&logger)),
            location: Location::new(Arc::clone(&file), Position::start()),
            file,
            current: Token::Eof,
            identifier: String::new(),
            number: 0.0,
            lookahead: Some(SEED),
            lookahead_at: Position::start(),
            logger,
        }
    }

    /// The most recently recognized token
    ///
    /// [`Token::Eof`] until the first [`Self::advance`].
    pub fn current_token(&self) -> Token {
        self.current
    }

    /// Recognize the next token and make it current
    pub fn advance(&mut self) -> Token {
        self.current = self.recognize();
        trace!(
            self.logger,
            "Produced token {} at {}:{}",
            self.current,
            self.location.line,
            self.location.column
        );
        self.current
    }

    /// Advance past a token the caller knows must be current
    ///
    /// # Panics
    /// If the current token is not `expected`.
    #[track_caller]
    pub fn expect_and_advance(&mut self, expected: Token) {
        if self.current != expected {
            violated(ContractViolation::UnexpectedToken {
                expected,
                found: self.current,
                location: self.location.clone(),
            });
        }
        self.advance();
    }

    /// Text of the current identifier
    ///
    /// # Panics
    /// If the current token is not [`Token::Identifier`].
    #[track_caller]
    pub fn identifier_text(&self) -> &str {
        if self.current != Token::Identifier {
            violated(ContractViolation::NotAnIdentifier {
                found: self.current,
                location: self.location.clone(),
            });
        }
        &self.identifier
    }

    /// Value of the current number
    ///
    /// # Panics
    /// If the current token is not [`Token::Number`].
    #[track_caller]
    pub fn numeric_value(&self) -> f64 {
        if self.current != Token::Number {
            violated(ContractViolation::NotANumber {
                found: self.current,
                location: self.location.clone(),
            });
        }
        self.number
    }

    /// Where the current token starts
    pub fn current_location(&self) -> Location {
        self.location.clone()
    }

    /// Line of the lookahead character
    pub fn current_line(&self) -> usize {
        self.lookahead_at.line
    }

    /// Column of the lookahead character
    pub fn current_column(&self) -> usize {
        self.lookahead_at.column
    }

    pub fn file_name(&self) -> &str {
        &self.file
    }

    /// Snapshot of the current token with its payload
    pub fn lexeme(&self) -> Lexeme {
        Lexeme {
            token: self.current,
            location: self.location.clone(),
            text: (self.current == Token::Identifier).then(|| self.identifier.clone()),
            value: (self.current == Token::Number).then_some(self.number),
        }
    }

    /// Advance repeatedly, yielding every lexeme through the first end of file
    pub fn lexemes(&mut self) -> Lexemes<'_, S> {
        Lexemes::new(self)
    }

    pub fn source(&self) -> &S {
        self.cursor.source()
    }

    pub fn source_mut(&mut self) -> &mut S {
        self.cursor.source_mut()
    }

    pub fn into_source(self) -> S {
        self.cursor.into_source()
    }

    fn bump(&mut self) {
        self.lookahead = self.cursor.next_char();
        self.lookahead_at = self.cursor.char_position();
    }

    fn recognize(&mut self) -> Token {
        loop {
            while self.lookahead.is_some_and(is_space) {
                self.bump();
            }

            self.location.line = self.lookahead_at.line;
            self.location.column = self.lookahead_at.column;

            let Some(c) = self.lookahead else {
                return Token::Eof;
            };

            if c.is_ascii_alphabetic() {
                return self.identifier_or_keyword(c);
            }
            if c.is_ascii_digit() {
                return self.number();
            }
            if c == '#' {
                self.skip_comment();
                continue;
            }

            self.bump();
            return Token::from_char(c);
        }
    }

    /// `letter (letter | digit | '_')*` where digits may only trail
    fn identifier_or_keyword(&mut self, first: char) -> Token {
        self.identifier.clear();
        self.identifier.push(first);
        self.bump();

        let mut seen_digit = false;
        while let Some(c) = self.lookahead.filter(|&c| is_identifier_char(c)) {
            if c.is_ascii_digit() {
                seen_digit = true;
            } else if seen_digit {
                // The offending character stays as lookahead.
                warn!(
                    self.logger,
                    "'{}' after digits in identifier '{}' at {}:{}",
                    c,
                    self.identifier,
                    self.location.line,
                    self.location.column
                );
                self.identifier.clear();
                return Token::from_char(c);
            }
            self.identifier.push(c);
            self.bump();
        }

        Token::keyword(&self.identifier).unwrap_or(Token::Identifier)
    }

    /// `digit (digit | '.')*`
    fn number(&mut self) -> Token {
        let mut text = String::new();
        while let Some(c) = self.lookahead.filter(|&c| c.is_ascii_digit() || c == '.') {
            text.push(c);
            self.bump();
        }

        let prefix = leading_decimal(&text);
        if prefix.len() != text.len() {
            warn!(
                self.logger,
                "Malformed number '{}' at {}:{}, using '{}'",
                text,
                self.location.line,
                self.location.column,
                prefix
            );
        }
        self.number = prefix.trim_end_matches('.').parse().unwrap_or_else(|e| {
            warn!(self.logger, "Cannot convert '{}' to a number: {}", prefix, e);
            0.0
        });
        Token::Number
    }

    /// Up to, not including, the end of the line
    fn skip_comment(&mut self) {
        loop {
            self.bump();
            match self.lookahead {
                None | Some('\n') | Some('\r') => return,
                Some(_) => {}
            }
        }
    }
}

#[track_caller]
fn violated(violation: ContractViolation) -> ! {
    panic!("lexer contract violated: {violation}")
}

/// The C `isspace` set
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Longest prefix with at most one decimal point, like `strtod` reads it
fn leading_decimal(text: &str) -> &str {
    let end = text
        .find('.')
        .and_then(|dot| text[dot + 1..].find('.').map(|next| dot + 1 + next))
        .unwrap_or(text.len());
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::source::BufferSource;
    use tiny_log::{Level, LogRingBuffer};

    fn lexer(input: &str) -> Lexer<BufferSource> {
        Lexer::new(BufferSource::new(input), "test.tiny")
    }

    fn lex_all(input: &str) -> Vec<Token> {
        let mut lexer = lexer(input);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.advance();
            tokens.push(token);
            if token == Token::Eof {
                return tokens;
            }
        }
    }

    #[test]
    fn test_initial_state() {
        let lexer = lexer("var");
        assert_eq!(lexer.current_token(), Token::Eof);
        assert_eq!(lexer.current_location().position(), Position::start());
        assert_eq!(lexer.file_name(), "test.tiny");
    }

    #[test]
    fn test_identifier_shape() {
        for valid in ["a123", "b_4", "placeholder", "x", "a_b_c9", "Zz"] {
            let mut lexer = lexer(valid);
            assert_eq!(lexer.advance(), Token::Identifier, "{valid}");
            assert_eq!(lexer.identifier_text(), valid);
            assert_eq!(lexer.advance(), Token::Eof, "{valid} should be one token");
        }
    }

    #[test]
    fn test_digit_then_letter_yields_offending_char() {
        let mut lexer = lexer("a1b");
        assert_eq!(lexer.advance(), Token::Char('b'));
        assert_eq!(lexer.current_location().position(), Position::new(0, 0));
        // 'b' was not consumed and starts the next token
        assert_eq!(lexer.advance(), Token::Identifier);
        assert_eq!(lexer.identifier_text(), "b");
        assert_eq!(lexer.current_location().position(), Position::new(0, 2));
    }

    #[test]
    fn test_digit_then_underscore() {
        assert_eq!(
            lex_all("x1_"),
            [Token::Char('_'), Token::Char('_'), Token::Eof]
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            lex_all("return def var struct"),
            [Token::Return, Token::Def, Token::Var, Token::Struct, Token::Eof]
        );
        assert_eq!(lex_all("defs"), [Token::Identifier, Token::Eof]);
    }

    #[test]
    fn test_numbers() {
        let mut lexer = lexer("3.14 42 7.");
        assert_eq!(lexer.advance(), Token::Number);
        assert!((lexer.numeric_value() - 3.14).abs() < 1e-12);
        assert_eq!(lexer.advance(), Token::Number);
        assert_eq!(lexer.numeric_value(), 42.0);
        assert_eq!(lexer.advance(), Token::Number);
        assert_eq!(lexer.numeric_value(), 7.0);
    }

    #[test]
    fn test_malformed_number_is_permissive() {
        let ring = LogRingBuffer::new(16);
        let logger = Logger::new(Level::Warn).with_sink(ring.clone());
        let mut lexer = Lexer::with_logger(BufferSource::new("1.2.3;"), "n.tiny", logger);

        assert_eq!(lexer.advance(), Token::Number);
        assert!((lexer.numeric_value() - 1.2).abs() < 1e-12);
        assert_eq!(lexer.advance(), Token::Semicolon);

        let records = ring.dump_records();
        assert!(records.iter().any(|r| r.message.contains("Malformed number '1.2.3'")));
    }

    #[test]
    fn test_number_stops_at_letter() {
        let mut lexer = lexer("12ab");
        assert_eq!(lexer.advance(), Token::Number);
        assert_eq!(lexer.numeric_value(), 12.0);
        assert_eq!(lexer.advance(), Token::Identifier);
        assert_eq!(lexer.identifier_text(), "ab");
    }

    #[test]
    fn test_comments_are_transparent() {
        assert_eq!(lex_all("# full line comment\n42\n"), [Token::Number, Token::Eof]);
        assert_eq!(lex_all("x # trailing\n;"), [Token::Identifier, Token::Semicolon, Token::Eof]);
        assert_eq!(lex_all("# no newline at end"), [Token::Eof]);
        assert_eq!(lex_all("#a\r\n#b\r\n"), [Token::Eof]);
    }

    #[test]
    fn test_many_comment_lines() {
        let input = "# comment\n".repeat(100_000) + "var";
        assert_eq!(lex_all(&input), [Token::Var, Token::Eof]);
    }

    #[test]
    fn test_fallback_characters() {
        assert_eq!(
            lex_all("+ -<>=,é"),
            [
                Token::Char('+'),
                Token::Char('-'),
                Token::Char('<'),
                Token::Char('>'),
                Token::Char('='),
                Token::Char(','),
                Token::Char('é'),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = lexer("x");
        lexer.advance();
        assert_eq!(lexer.advance(), Token::Eof);
        assert_eq!(lexer.advance(), Token::Eof);
    }

    #[test]
    fn test_current_line_and_column_track_lookahead() {
        let mut lexer = lexer("ab cd\nef");
        lexer.advance();
        assert_eq!((lexer.current_line(), lexer.current_column()), (0, 2));
        lexer.advance();
        assert_eq!((lexer.current_line(), lexer.current_column()), (0, 5));
        lexer.advance();
        assert_eq!((lexer.current_line(), lexer.current_column()), (1, 2));
    }

    #[test]
    fn test_eof_location_is_end_of_input() {
        let mut lexer = lexer("x;\n\n");
        while lexer.advance() != Token::Eof {}
        assert_eq!(lexer.current_location().position(), Position::new(2, 0));
    }

    #[test]
    fn test_expect_and_advance() {
        let mut lexer = lexer("( )");
        lexer.advance();
        lexer.expect_and_advance(Token::ParenOpen);
        assert_eq!(lexer.current_token(), Token::ParenClose);
    }

    #[test]
    #[should_panic(expected = "expected ';' but found ')' at test.tiny:0:2")]
    fn test_expect_and_advance_mismatch_panics() {
        let mut lexer = lexer("( )");
        lexer.advance();
        lexer.advance();
        lexer.expect_and_advance(Token::Semicolon);
    }

    #[test]
    #[should_panic(expected = "identifier text requested while the current token is number")]
    fn test_identifier_text_on_number_panics() {
        let mut lexer = lexer("42");
        lexer.advance();
        lexer.identifier_text();
    }

    #[test]
    #[should_panic(expected = "numeric value requested while the current token is def")]
    fn test_numeric_value_on_keyword_panics() {
        let mut lexer = lexer("def");
        lexer.advance();
        lexer.numeric_value();
    }

    #[test]
    #[should_panic(expected = "identifier text requested")]
    fn test_identifier_text_after_shape_violation_panics() {
        let mut lexer = lexer("a1b");
        lexer.advance();
        lexer.identifier_text();
    }

    #[test]
    fn test_lexeme_snapshot() {
        let mut lexer = lexer("f 2.5 ;");
        lexer.advance();
        let lexeme = lexer.lexeme();
        assert_eq!(lexeme.text.as_deref(), Some("f"));
        assert_eq!(lexeme.value, None);

        lexer.advance();
        let lexeme = lexer.lexeme();
        assert_eq!(lexeme.text, None);
        assert_eq!(lexeme.value, Some(2.5));
        assert_eq!(lexeme.location.column, 2);
    }

    #[test]
    fn test_shape_violation_is_logged() {
        let ring = LogRingBuffer::new(16);
        let logger = Logger::new(Level::Warn).with_sink(ring.clone());
        let mut lexer = Lexer::with_logger(BufferSource::new("v2x"), "w.tiny", logger);
        lexer.advance();

        let records = ring.dump_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, Level::Warn);
        assert!(records[0].message.contains("'x' after digits in identifier 'v2'"));
    }

    #[test]
    fn test_tokens_are_traced() {
        let ring = LogRingBuffer::new(64);
        let logger = Logger::new(Level::Trace).with_sink(ring.clone());
        let mut lexer = Lexer::with_logger(BufferSource::new("def"), "t.tiny", logger);

        ring.clear();
        lexer.advance();
        assert!(ring
            .dump_records()
            .iter()
            .any(|r| r.message == "Produced token def at 0:0"));
    }

    #[test]
    fn test_leading_decimal() {
        assert_eq!(leading_decimal("42"), "42");
        assert_eq!(leading_decimal("3.14"), "3.14");
        assert_eq!(leading_decimal("1.2.3"), "1.2");
        assert_eq!(leading_decimal("1..2"), "1.");
        assert_eq!(leading_decimal("7."), "7.");
    }

    #[test]
    fn test_is_space_matches_c_set() {
        for c in [' ', '\t', '\n', '\x0B', '\x0C', '\r'] {
            assert!(is_space(c), "{c:?}");
        }
        assert!(!is_space('\u{A0}'));
        assert!(!is_space('a'));
    }
}
