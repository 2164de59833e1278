//! CLI configuration
//!
//! Merges command line flags over the project file into one [`Settings`].

use std::path::{Path, PathBuf};

use tiny_config::{DumpFormat, Phase, ProjectConfig};
use tracing::Level;

use crate::error::CliError;
use crate::Cli;

/// Tracing levels per target
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    pub global: Level,
    /// Override for `tiny::lexer` and `tiny::source`
    pub lexer: Option<Level>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: Level::INFO,
            lexer: None,
        }
    }
}

impl LogConfig {
    /// Get log level for a specific target
    pub fn level_for(&self, target: &str) -> Level {
        let lexer_targets = [Phase::Lexer.target(), Phase::Source.target()];
        if lexer_targets.iter().any(|t| t == target) {
            self.lexer.unwrap_or(self.global)
        } else {
            self.global
        }
    }

    /// Level the core logger must let through
    pub fn core_level(&self) -> tiny_log::Level {
        to_core_level(self.level_for(&Phase::Lexer.target()))
    }
}

/// Map a tracing level onto a tiny-log level
pub fn to_core_level(level: Level) -> tiny_log::Level {
    if level == Level::TRACE {
        tiny_log::Level::Trace
    } else if level == Level::DEBUG {
        tiny_log::Level::Debug
    } else if level == Level::INFO {
        tiny_log::Level::Info
    } else if level == Level::WARN {
        tiny_log::Level::Warn
    } else {
        tiny_log::Level::Error
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub input: Input,
    pub format: DumpFormat,
    pub show_location: bool,
    pub log: LogConfig,
}

impl Settings {
    pub fn resolve(cli: &Cli, project: &ProjectConfig) -> Result<Self, CliError> {
        let project_dir = cli.config.as_deref().and_then(Path::parent);

        let input = match (&cli.input, &project.entry) {
            (Some(path), _) if path.as_os_str() == "-" => Input::Stdin,
            (Some(path), _) => Input::File(path.clone()),
            (None, Some(entry)) => Input::File(resolve_entry_path(project_dir, entry)),
            (None, None) => Input::Stdin,
        };

        let global = match cli.log_level.as_deref().or(project.log_level.as_deref()) {
            Some(name) => parse_level(name)?,
            None => LogConfig::default().global,
        };
        let lexer = cli
            .lexer_log_level
            .as_deref()
            .or(project.lexer_log_level.as_deref())
            .map(parse_level)
            .transpose()?;

        Ok(Self {
            input,
            format: cli.format.or(project.format).unwrap_or_default(),
            show_location: !cli.no_location && project.show_location.unwrap_or(true),
            log: LogConfig { global, lexer },
        })
    }
}

fn parse_level(name: &str) -> Result<Level, CliError> {
    name.parse()
        .map_err(|_| CliError::LogLevel(name.to_string()))
}

/// Entry paths are relative to the project file's directory
fn resolve_entry_path(project_dir: Option<&Path>, entry: &str) -> PathBuf {
    match project_dir {
        Some(dir) => dir.join(entry),
        None => PathBuf::from(entry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("tiny-lex").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(&cli(&[]), &ProjectConfig::default()).unwrap();
        assert_eq!(settings.input, Input::Stdin);
        assert_eq!(settings.format, DumpFormat::Text);
        assert!(settings.show_location);
        assert_eq!(settings.log, LogConfig::default());
    }

    #[test]
    fn test_dash_is_stdin() {
        let settings = Settings::resolve(&cli(&["-"]), &ProjectConfig::default()).unwrap();
        assert_eq!(settings.input, Input::Stdin);
    }

    #[test]
    fn test_flags_override_project() {
        let project = ProjectConfig {
            entry: Some("main.tiny".to_string()),
            format: Some(DumpFormat::Json),
            log_level: Some("warn".to_string()),
            lexer_log_level: Some("debug".to_string()),
            show_location: Some(true),
        };
        let args = cli(&[
            "other.tiny",
            "--format",
            "text",
            "--log-level",
            "error",
            "--no-location",
        ]);

        let settings = Settings::resolve(&args, &project).unwrap();
        assert_eq!(settings.input, Input::File(PathBuf::from("other.tiny")));
        assert_eq!(settings.format, DumpFormat::Text);
        assert!(!settings.show_location);
        assert_eq!(settings.log.global, Level::ERROR);
        assert_eq!(settings.log.lexer, Some(Level::DEBUG));
    }

    #[test]
    fn test_entry_relative_to_project_file() {
        let project = ProjectConfig {
            entry: Some("src/main.tiny".to_string()),
            ..ProjectConfig::default()
        };
        let args = cli(&["--config", "demo/tiny.json"]);

        let settings = Settings::resolve(&args, &project).unwrap();
        assert_eq!(
            settings.input,
            Input::File(Path::new("demo").join("src/main.tiny"))
        );
    }

    #[test]
    fn test_bad_level() {
        let result = Settings::resolve(&cli(&["--log-level", "loud"]), &ProjectConfig::default());
        assert!(matches!(result, Err(CliError::LogLevel(name)) if name == "loud"));
    }

    #[test]
    fn test_level_for_targets() {
        let config = LogConfig {
            global: Level::WARN,
            lexer: Some(Level::TRACE),
        };
        assert_eq!(config.level_for("tiny::lexer"), Level::TRACE);
        assert_eq!(config.level_for("tiny::source"), Level::TRACE);
        assert_eq!(config.level_for("tiny::cli"), Level::WARN);
        assert_eq!(config.core_level(), tiny_log::Level::Trace);

        assert_eq!(LogConfig::default().core_level(), tiny_log::Level::Info);
    }
}
