//! CLI errors

use std::io;

use tiny_core::SourceError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("cannot read project file '{path}': {source}")]
    ProjectRead {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid project file '{path}': {source}")]
    ProjectParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown log level '{0}' (expected trace, debug, info, warn or error)")]
    LogLevel(String),

    #[error("cannot open log file '{path}': {source}")]
    LogFile {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot install logger: {0}")]
    LogInit(String),

    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),

    #[error("cannot encode output: {0}")]
    Json(#[from] serde_json::Error),
}
