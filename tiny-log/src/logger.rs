//! Logger and sinks

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

use crate::record::{Level, Record};
use crate::{Error, Result};

/// Log output target
pub trait LogSink: Send + Sync {
    fn write(&self, record: &Record);
}

/// Level filter in front of a list of sinks
///
/// Loggers are shared as `Arc<Logger>` and handed to every component that
/// logs; there is no process-wide instance.
pub struct Logger {
    level: AtomicU8,
    sinks: Mutex<Vec<Box<dyn LogSink>>>,
}

impl Logger {
    pub fn new(level: Level) -> Arc<Self> {
        Arc::new(Logger {
            level: AtomicU8::new(level as u8),
            sinks: Mutex::new(Vec::new()),
        })
    }

    /// Logger with no sinks, for callers that do not care about logs
    pub fn noop() -> Arc<Self> {
        Self::new(Level::Error)
    }

    /// Builder-style sink registration
    pub fn with_sink<S: LogSink + 'static>(self: Arc<Self>, sink: S) -> Arc<Self> {
        self.add_sink(sink);
        self
    }

    pub fn add_sink<S: LogSink + 'static>(&self, sink: S) {
        self.sinks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Box::new(sink));
    }

    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed)).unwrap_or(Level::Info)
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        level >= self.level()
    }

    /// Number of registered sinks
    pub fn sink_count(&self) -> usize {
        self.sinks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Write a message to every sink if `level` is enabled
    ///
    /// Prefer the `trace!`..`error!` macros, which skip formatting when the
    /// level is filtered out.
    #[inline(never)]
    pub fn log(&self, level: Level, target: &'static str, message: impl Into<String>) {
        if !self.is_enabled(level) {
            return;
        }

        let record = Record::new(level, target, message);
        let sinks = self
            .sinks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for sink in sinks.iter() {
            sink.write(&record);
        }
    }
}

// Lets one logger forward into another.
impl LogSink for Arc<Logger> {
    fn write(&self, record: &Record) {
        self.log(record.level, record.target, record.message.clone());
    }
}

pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn write(&self, record: &Record) {
        println!("{}", record.format());
    }
}

pub struct StderrSink;

impl LogSink for StderrSink {
    fn write(&self, record: &Record) {
        eprintln!("{}", record.format());
    }
}

/// Appends formatted records to a file
pub struct FileSink {
    file: Mutex<File>,
}

impl FileSink {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| Error::OpenFile {
                path: path.display().to_string(),
                source,
            })?;

        Ok(FileSink {
            file: Mutex::new(file),
        })
    }
}

impl LogSink for FileSink {
    fn write(&self, record: &Record) {
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{}", record.format());
        }
    }
}
