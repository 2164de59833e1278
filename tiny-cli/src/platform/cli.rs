//! CLI formatted output
//!
//! Lexeme dumps go to stdout, diagnostics to stderr.

use std::error::Error;
use std::io::Write;

use tiny_config::DumpFormat;
use tiny_core::{Lexeme, Token};

use crate::error::CliError;

/// Print an error and every cause below it
pub fn print_error(e: &CliError) {
    eprintln!("❌ {}", e);

    let mut cause = e.source();
    while let Some(inner) = cause {
        eprintln!("   caused by: {}", inner);
        cause = inner.source();
    }
}

/// Write `lexemes` to `out` in the chosen format
pub fn write_lexemes<W: Write>(
    out: &mut W,
    lexemes: &[Lexeme],
    format: DumpFormat,
    show_location: bool,
) -> Result<(), CliError> {
    match format {
        DumpFormat::Text => {
            for lexeme in lexemes {
                writeln!(out, "{}", format_lexeme(lexeme, show_location))?;
            }
        }
        DumpFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, lexemes)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// One text line: `[file:line:col] token [payload]`
fn format_lexeme(lexeme: &Lexeme, show_location: bool) -> String {
    let mut line = String::new();
    if show_location {
        line.push_str(&format!("{:<16} ", lexeme.location.to_string()));
    }
    line.push_str(&lexeme.token.to_string());

    match (&lexeme.text, lexeme.value) {
        (Some(text), _) => line.push_str(&format!(" {}", text)),
        (None, Some(value)) => line.push_str(&format!(" {}", value)),
        (None, None) => {}
    }
    line.trim_end().to_string()
}

/// Warn about characters the lexer passed through unrecognized
pub fn print_raw_summary(lexemes: &[Lexeme]) {
    let mut raw = lexemes
        .iter()
        .filter(|l| matches!(l.token, Token::Char(_)));

    if let Some(first) = raw.next() {
        let count = 1 + raw.count();
        eprintln!(
            "⚠️  {} single-character token(s), first {} at {}",
            count, first.token, first.location
        );
    }
}
