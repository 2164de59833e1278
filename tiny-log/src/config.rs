//! One-call logger setup

use std::sync::Arc;

use crate::logger::{FileSink, StderrSink, StdoutSink};
use crate::{Level, LogRingBuffer, Logger, Result};

#[derive(Clone, Debug, PartialEq)]
pub enum OutputConfig {
    Stdout,
    Stderr,
    /// Append to the file at this path
    File(String),
    /// Keep the last N records in memory
    RingBuffer(usize),
}

/// Logger configuration
///
/// ```
/// use tiny_log::{LogConfig, Level};
///
/// let (logger, ring) = LogConfig::new(Level::Debug)
///     .with_ring_buffer(1000)
///     .init()
///     .unwrap();
/// assert!(ring.is_some());
/// ```
#[derive(Clone, Debug)]
pub struct LogConfig {
    pub level: Level,
    pub outputs: Vec<OutputConfig>,
}

impl LogConfig {
    pub fn new(level: Level) -> Self {
        LogConfig {
            level,
            outputs: Vec::new(),
        }
    }

    /// Debug level to stderr, plus a 10000 record ring buffer
    pub fn dev() -> Self {
        Self::new(Level::Debug)
            .with_stderr()
            .with_ring_buffer(10000)
    }

    /// Error level, no outputs
    pub fn test() -> Self {
        Self::new(Level::Error)
    }

    pub fn with_stdout(mut self) -> Self {
        if !self.outputs.contains(&OutputConfig::Stdout) {
            self.outputs.push(OutputConfig::Stdout);
        }
        self
    }

    pub fn with_stderr(mut self) -> Self {
        if !self.outputs.contains(&OutputConfig::Stderr) {
            self.outputs.push(OutputConfig::Stderr);
        }
        self
    }

    pub fn with_file(mut self, path: impl Into<String>) -> Self {
        self.outputs.push(OutputConfig::File(path.into()));
        self
    }

    pub fn with_ring_buffer(mut self, capacity: usize) -> Self {
        self.outputs.push(OutputConfig::RingBuffer(capacity));
        self
    }

    /// Build the logger
    ///
    /// Returns the last configured ring buffer, if any, so callers can dump
    /// it on failure.
    pub fn init(self) -> Result<(Arc<Logger>, Option<Arc<LogRingBuffer>>)> {
        let logger = Logger::new(self.level);
        let mut ring_buffer = None;

        for output in self.outputs {
            match output {
                OutputConfig::Stdout => logger.add_sink(StdoutSink),
                OutputConfig::Stderr => logger.add_sink(StderrSink),
                OutputConfig::File(path) => logger.add_sink(FileSink::new(path)?),
                OutputConfig::RingBuffer(capacity) => {
                    let ring = LogRingBuffer::new(capacity);
                    ring_buffer = Some(Arc::clone(&ring));
                    logger.add_sink(ring);
                }
            }
        }

        Ok((logger, ring_buffer))
    }
}
