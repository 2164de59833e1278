//! Lexer error types
//!
//! Malformed input never produces an error: odd characters become tokens
//! and the parser reports them. What remains are caller bugs
//! ([`ContractViolation`], always fatal) and I/O failures of reader-backed
//! sources ([`SourceError`]).

use std::io;

use super::location::Location;
use super::token::Token;

/// A broken precondition of the token stream API
///
/// The lexer panics with this as the message; these are bugs in the calling
/// parser and are never handed back as values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContractViolation {
    #[error("expected {expected} but found {found} at {location}")]
    UnexpectedToken {
        expected: Token,
        found: Token,
        location: Location,
    },

    #[error("identifier text requested while the current token is {found} at {location}")]
    NotAnIdentifier { found: Token, location: Location },

    #[error("numeric value requested while the current token is {found} at {location}")]
    NotANumber { found: Token, location: Location },
}

/// Failure to get lines out of a reader-backed source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("cannot open '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    /// `line` is the number of lines read successfully before the failure
    #[error("read failed after line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Position;

    #[test]
    fn test_contract_violation_message() {
        let violation = ContractViolation::UnexpectedToken {
            expected: Token::Semicolon,
            found: Token::Identifier,
            location: Location::new("a.tiny".into(), Position::new(4, 7)),
        };
        assert_eq!(
            violation.to_string(),
            "expected ';' but found identifier at a.tiny:4:7"
        );
    }

    #[test]
    fn test_source_error_message() {
        let err = SourceError::Read {
            line: 3,
            source: io::Error::new(io::ErrorKind::InvalidData, "bad bytes"),
        };
        assert_eq!(err.to_string(), "read failed after line 3: bad bytes");
        assert!(std::error::Error::source(&err).is_some());
    }
}
