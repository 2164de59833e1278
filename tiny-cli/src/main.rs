//! tiny-lex - dump the token stream of a Tiny source file
//!
//! Options come from the command line, optionally on top of a `tiny.json`
//! project file.

use clap::Parser;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process;

mod config;
mod error;
mod logging;
mod platform;

use crate::config::{Input, Settings};
use crate::error::CliError;
use crate::logging::LogFormat;
use tiny_config::{DumpFormat, ProjectConfig};
use tiny_core::{Lexeme, Lexer, ReaderSource};

#[derive(Parser, Debug)]
#[command(
    name = "tiny-lex",
    about = "Tiny lexer - print the tokens of a source file",
    version
)]
struct Cli {
    /// Source file; `-` reads standard input (default: project entry or stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Project file providing defaults
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format: text or json
    #[arg(long)]
    format: Option<DumpFormat>,

    /// Global log level: trace, debug, info, warn, error
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Log level for the lexer and line sources
    #[arg(long, value_name = "LEVEL")]
    lexer_log_level: Option<String>,

    /// Log output style
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Also append logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Omit token locations from text output
    #[arg(long)]
    no_location: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        platform::print_error(&e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let project = match &cli.config {
        Some(path) => read_project_config(path)?,
        None => ProjectConfig::default(),
    };
    let settings = Settings::resolve(cli, &project)?;

    logging::init(&settings.log, cli.log_format, cli.log_file.as_deref())?;
    let logger = logging::core_logger(&settings.log);

    tracing::debug!(target: "tiny::cli", ?settings, "Resolved settings");

    let lexemes = match &settings.input {
        Input::Stdin => lex(ReaderSource::stdin_with_logger(logger.clone()), "<stdin>", logger)?,
        Input::File(path) => {
            let source = ReaderSource::open_with_logger(path, logger.clone())?;
            lex(source, &path.display().to_string(), logger)?
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    platform::write_lexemes(&mut out, &lexemes, settings.format, settings.show_location)?;
    platform::print_raw_summary(&lexemes);
    Ok(())
}

/// Lex everything, failing if the reader broke off early
fn lex<R: BufRead>(
    source: ReaderSource<R>,
    name: &str,
    logger: std::sync::Arc<tiny_log::Logger>,
) -> Result<Vec<Lexeme>, CliError> {
    let mut lexer = Lexer::with_logger(source, name, logger);
    let lexemes: Vec<Lexeme> = lexer.lexemes().collect();

    if let Some(e) = lexer.source_mut().take_error() {
        return Err(e.into());
    }
    tracing::info!(target: "tiny::cli", file = name, tokens = lexemes.len(), "Lexed");
    Ok(lexemes)
}

fn read_project_config(path: &Path) -> Result<ProjectConfig, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::ProjectRead {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CliError::ProjectParse {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_project_config() {
        let path = std::env::temp_dir().join(format!("tiny_cli_project_{}.json", process::id()));
        std::fs::write(&path, r#"{ "entry": "src/main.tiny", "show_location": false }"#).unwrap();

        let project = read_project_config(&path).unwrap();
        assert_eq!(project.entry.as_deref(), Some("src/main.tiny"));
        assert_eq!(project.show_location, Some(false));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_read_project_config_errors() {
        let missing = std::env::temp_dir().join("tiny_cli_no_such_project.json");
        assert!(matches!(
            read_project_config(&missing),
            Err(CliError::ProjectRead { .. })
        ));

        let path = std::env::temp_dir().join(format!("tiny_cli_broken_{}.json", process::id()));
        std::fs::write(&path, "{ entry: ").unwrap();
        assert!(matches!(
            read_project_config(&path),
            Err(CliError::ProjectParse { .. })
        ));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_lex_reader() {
        let source = ReaderSource::new(io::Cursor::new("var x;\n"));
        let lexemes = lex(source, "mem", tiny_log::Logger::noop()).unwrap();
        assert_eq!(lexemes.len(), 4);
        assert_eq!(&*lexemes[0].location.file, "mem");
    }

    #[test]
    fn test_lex_reader_failure() {
        let source = ReaderSource::new(io::Cursor::new(b"var\n\xFF\n".to_vec()));
        let result = lex(source, "mem", tiny_log::Logger::noop());
        assert!(matches!(result, Err(CliError::Source(_))));
    }
}
