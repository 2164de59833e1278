//! CLI logging setup
//!
//! Based on `tracing-subscriber` with per-target filtering. The core crates
//! log through `tiny-log`; [`TracingSink`] forwards those records into
//! `tracing` so everything ends up in one place.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tiny_config::Phase;
use tiny_log::{Level, LogSink, Logger, Record};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use tracing_subscriber::{Layer, Registry};

use crate::config::LogConfig;
use crate::error::CliError;

/// Log output style
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Multi-line, for reading
    Pretty,
    /// One line per event
    Compact,
    /// JSON lines, for tools
    Json,
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber: stderr always, plus `file` if given
pub fn init(log_config: &LogConfig, format: LogFormat, file: Option<&Path>) -> Result<(), CliError> {
    let targets = targets(log_config);
    let mut layers: Vec<BoxedLayer> = vec![create_format_layer(format, io::stderr)
        .with_filter(targets.clone())
        .boxed()];

    if let Some(path) = file {
        let handle = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| CliError::LogFile {
                path: path.display().to_string(),
                source,
            })?;
        layers.push(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(handle))
                .with_filter(targets)
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| CliError::LogInit(e.to_string()))
}

/// Logger for the core crates, forwarding into `tracing`
pub fn core_logger(log_config: &LogConfig) -> Arc<Logger> {
    Logger::new(log_config.core_level()).with_sink(TracingSink)
}

fn targets(log_config: &LogConfig) -> Targets {
    [Phase::Lexer, Phase::Source, Phase::Cli]
        .into_iter()
        .fold(Targets::new().with_default(log_config.global), |targets, phase| {
            let target = phase.target();
            let level = log_config.level_for(&target);
            targets.with_target(target, level)
        })
}

fn create_format_layer<W>(format: LogFormat, make_writer: W) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .without_time()
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_writer(make_writer)
            .boxed(),
    }
}

/// Forwards `tiny-log` records as `tracing` events
///
/// Records from line sources go to `tiny::source`, everything else to
/// `tiny::lexer`; the emitting module path is kept in the `module` field.
pub struct TracingSink;

impl TracingSink {
    /// Target a record is forwarded to
    pub fn target_for(record: &Record) -> Phase {
        if record.target.ends_with("::source") {
            Phase::Source
        } else {
            Phase::Lexer
        }
    }
}

macro_rules! forward {
    ($target:literal, $record:expr) => {{
        let record = $record;
        match record.level {
            Level::Trace => tracing::trace!(target: $target, module = record.target, "{}", record.message),
            Level::Debug => tracing::debug!(target: $target, module = record.target, "{}", record.message),
            Level::Info => tracing::info!(target: $target, module = record.target, "{}", record.message),
            Level::Warn => tracing::warn!(target: $target, module = record.target, "{}", record.message),
            Level::Error => tracing::error!(target: $target, module = record.target, "{}", record.message),
        }
    }};
}

impl LogSink for TracingSink {
    fn write(&self, record: &Record) {
        match Self::target_for(record) {
            Phase::Source => forward!("tiny::source", record),
            _ => forward!("tiny::lexer", record),
        }
    }
}
