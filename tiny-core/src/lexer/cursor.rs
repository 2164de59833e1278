//! Character cursor over a line source

use std::sync::Arc;

use tiny_log::{debug, Logger};

use super::location::Position;
use super::source::LineSource;

/// Hands out one character at a time, pulling lines from `S` on demand
///
/// The line buffer is refilled the moment its last character is taken, so an
/// empty buffer always means the source is exhausted. The first line is
/// pulled on construction.
pub struct Cursor<S> {
    source: S,
    line: String,
    /// Byte offset of the next character in `line`
    offset: usize,
    /// Position of the next character
    position: Position,
    /// Position of the character most recently returned
    char_position: Position,
    lines_pulled: usize,
    exhausted: bool,
    logger: Arc<Logger>,
}

impl<S: LineSource> Cursor<S> {
    pub fn new(source: S) -> Self {
        Self::with_logger(source, Logger::noop())
    }

    pub fn with_logger(source: S, logger: Arc<Logger>) -> Self {
        let mut cursor = Self {
            source,
            line: String::new(),
            offset: 0,
            position: Position::start(),
            char_position: Position::start(),
            lines_pulled: 0,
            exhausted: false,
            logger,
        };
        cursor.refill();
        cursor
    }

    /// Next character, or `None` once the input is exhausted
    pub fn next_char(&mut self) -> Option<char> {
        let Some(c) = self.line[self.offset..].chars().next() else {
            self.char_position = self.position;
            return None;
        };

        self.offset += c.len_utf8();
        self.char_position = self.position;
        self.position.advance(c);

        if self.offset == self.line.len() {
            self.refill();
        }
        Some(c)
    }

    /// Position of the next character to be returned
    pub fn position(&self) -> Position {
        self.position
    }

    /// Position of the character last returned by [`Self::next_char`]
    ///
    /// After `next_char` returned `None` this is the end of input.
    pub fn char_position(&self) -> Position {
        self.char_position
    }

    /// Unconsumed remainder of the current line
    pub fn remaining_line(&self) -> &str {
        &self.line[self.offset..]
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining_line().is_empty()
    }

    pub fn lines_pulled(&self) -> usize {
        self.lines_pulled
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    fn refill(&mut self) {
        self.offset = 0;
        if self.exhausted {
            self.line.clear();
            return;
        }

        self.line = self.source.read_next_line();
        if self.line.is_empty() {
            // The source promised never to produce more; stop asking.
            self.exhausted = true;
            debug!(
                self.logger,
                "End of input after {} lines at {}:{}",
                self.lines_pulled,
                self.position.line,
                self.position.column
            );
        } else {
            self.lines_pulled += 1;
            debug!(
                self.logger,
                "Pulled line {} ({} bytes)",
                self.lines_pulled,
                self.line.len()
            );
        }
    }
}
