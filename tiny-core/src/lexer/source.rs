//! Line sources
//!
//! The lexer never touches files or buffers directly. It asks a
//! [`LineSource`] for one line at a time, so the same lexer runs over an
//! in-memory string, a file or standard input.

use std::fs::File;
use std::io::{self, BufRead, BufReader, StdinLock};
use std::path::Path;
use std::sync::Arc;

use tiny_log::{debug, error, Logger};

use super::error::SourceError;

/// Something that yields successive lines of text
pub trait LineSource {
    /// Next line, including its trailing `'\n'`
    ///
    /// The last line of the input may lack the newline. An empty string means
    /// end of input; once returned, every later call must return empty too.
    fn read_next_line(&mut self) -> String;
}

impl<S: LineSource + ?Sized> LineSource for &mut S {
    fn read_next_line(&mut self) -> String {
        (**self).read_next_line()
    }
}

impl<S: LineSource + ?Sized> LineSource for Box<S> {
    fn read_next_line(&mut self) -> String {
        (**self).read_next_line()
    }
}

/// Lines out of an in-memory string
#[derive(Debug, Clone)]
pub struct BufferSource {
    text: String,
    offset: usize,
}

impl BufferSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            offset: 0,
        }
    }

    /// Text not handed out yet
    pub fn remaining(&self) -> &str {
        &self.text[self.offset..]
    }
}

impl LineSource for BufferSource {
    fn read_next_line(&mut self) -> String {
        let rest = self.remaining();
        let len = rest.find('\n').map_or(rest.len(), |newline| newline + 1);
        let line = rest[..len].to_string();
        self.offset += len;
        line
    }
}

/// Lines out of any buffered reader
///
/// I/O failures end the input early: the error is logged and kept for
/// [`ReaderSource::take_error`], and the lexer sees a normal end of file.
pub struct ReaderSource<R> {
    reader: R,
    lines_read: usize,
    finished: bool,
    error: Option<SourceError>,
    logger: Arc<Logger>,
}

impl ReaderSource<BufReader<File>> {
    /// Open a file for reading
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        Self::open_with_logger(path, Logger::noop())
    }

    pub fn open_with_logger(
        path: impl AsRef<Path>,
        logger: Arc<Logger>,
    ) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| {
            error!(logger, "Cannot open '{}': {}", path.display(), source);
            SourceError::Open {
                path: path.display().to_string(),
                source,
            }
        })?;
        debug!(logger, "Opened '{}'", path.display());
        Ok(Self::with_logger(BufReader::new(file), logger))
    }
}

impl ReaderSource<StdinLock<'static>> {
    /// Read standard input
    pub fn stdin() -> Self {
        Self::stdin_with_logger(Logger::noop())
    }

    pub fn stdin_with_logger(logger: Arc<Logger>) -> Self {
        Self::with_logger(io::stdin().lock(), logger)
    }
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self::with_logger(reader, Logger::noop())
    }

    pub fn with_logger(reader: R, logger: Arc<Logger>) -> Self {
        Self {
            reader,
            lines_read: 0,
            finished: false,
            error: None,
            logger,
        }
    }

    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// The I/O error that ended the input, if any
    pub fn take_error(&mut self) -> Option<SourceError> {
        self.error.take()
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn read_next_line(&mut self) -> String {
        let mut line = String::new();
        if self.finished {
            return line;
        }

        match self.reader.read_line(&mut line) {
            Ok(0) => {
                debug!(self.logger, "Reader exhausted after {} lines", self.lines_read);
                self.finished = true;
            }
            Ok(_) => self.lines_read += 1,
            Err(source) => {
                error!(
                    self.logger,
                    "Read failed after line {}: {}", self.lines_read, source
                );
                self.error = Some(SourceError::Read {
                    line: self.lines_read,
                    source,
                });
                self.finished = true;
                line.clear();
            }
        }
        line
    }
}
