//! tiny-log - structured logging for the Tiny toolchain
//!
//! - **Explicit passing**: there is no global logger; components receive an
//!   `Arc<Logger>` when they are built.
//! - **Cheap when off**: the macros check the level before formatting.
//! - **Crash recovery**: a `LogRingBuffer` sink keeps the last N records.
//!
//! ```ignore
//! use tiny_log::{LogConfig, debug};
//!
//! let (logger, ring) = LogConfig::dev().init()?;
//! debug!(logger, "lexer ready");
//! ```

mod config;
mod logger;
mod macros;
mod record;
mod ring_buffer;

pub use config::{LogConfig, OutputConfig};
pub use logger::{FileSink, LogSink, Logger, StderrSink, StdoutSink};
pub use record::{Level, Record};
pub use ring_buffer::{LogRingBuffer, RingBufferStats};

/// Result type of fallible logging setup
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while setting up sinks
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file sink could not be opened
    #[error("cannot open log file '{path}': {source}")]
    OpenFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// A level name was not recognized
    #[error("unknown log level '{0}'")]
    UnknownLevel(String),
}
