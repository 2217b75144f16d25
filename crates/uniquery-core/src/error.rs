//! Error types for SQL parsing.
//!
//! # Error Handling Strategy
//!
//! Every structural mismatch between the input text and the supported SQL
//! surface (see spec §6) is reported as a single [`ParseError`], whose
//! [`ParseErrorKind`] narrows down *why*. There is no partial success: a
//! call to [`crate::parser::parse`] either returns a complete [`crate::lqr::Lqr`]
//! or raises an error — never both, never silent success with partial data.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
#[cfg(feature = "tracing")]
use tracing::trace;

/// Error encountered while turning SQL text into a logical query representation.
///
/// Preserves structured information from the underlying grammar engine,
/// including byte/line position when available, plus a `kind` that lets
/// callers distinguish "outside the supported SQL surface" from the more
/// specific join/having restrictions.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Human-readable error message.
    pub message: String,
    /// Line/column where the error occurred, if available.
    pub position: Option<Position>,
    /// The specific category of parse error.
    pub kind: ParseErrorKind,
}

/// Position information for a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

/// Category of parse error for programmatic handling.
///
/// Mirrors the error taxonomy in spec §7: `UnsupportedStatement`,
/// `UnsupportedJoinOn`, and `UnsupportedHaving` are distinguished kinds of
/// `ParseError` rather than separate types, since all three are raised from
/// inside the parser and carry the same `{kind, message}` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseErrorKind {
    /// Input text does not fit the supported SQL grammar at all.
    #[default]
    Syntax,
    /// Root statement recognized by the grammar engine but its family falls
    /// outside the supported surface (e.g. a subquery, a CTE, a window
    /// function).
    UnsupportedStatement,
    /// A JOIN's ON clause is not a simple equality between two qualified
    /// column references (or, for the Cypher target, a `RELATION(...)` call).
    UnsupportedJoinOn,
    /// HAVING is compound (more than one leaf) or references a non-aggregate
    /// column.
    UnsupportedHaving,
}

impl ParseError {
    /// Creates a new parse error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
            kind: ParseErrorKind::Syntax,
        }
    }

    /// Creates a parse error with position information.
    pub fn with_position(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            position: Some(Position { line, column }),
            kind: ParseErrorKind::Syntax,
        }
    }

    /// Sets the error kind.
    pub fn with_kind(mut self, kind: ParseErrorKind) -> Self {
        self.kind = kind;
        self
    }

    /// Shorthand for an `UnsupportedStatement` error.
    pub fn unsupported_statement(message: impl Into<String>) -> Self {
        Self::new(message).with_kind(ParseErrorKind::UnsupportedStatement)
    }

    /// Shorthand for an `UnsupportedJoinOn` error.
    pub fn unsupported_join_on(message: impl Into<String>) -> Self {
        Self::new(message).with_kind(ParseErrorKind::UnsupportedJoinOn)
    }

    /// Shorthand for an `UnsupportedHaving` error.
    pub fn unsupported_having(message: impl Into<String>) -> Self {
        Self::new(message).with_kind(ParseErrorKind::UnsupportedHaving)
    }

    /// Parses position from sqlparser's error message format.
    ///
    /// sqlparser uses a format like "Expected ..., found ... at Line: X, Column: Y".
    /// Gracefully returns `None` when the expected format is not found.
    fn parse_position_from_message(message: &str) -> Option<Position> {
        static POSITION_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = POSITION_REGEX.get_or_init(|| {
            Regex::new(r"Line:\s*(\d+)\s*,\s*Column:\s*(\d+)").expect("invalid regex pattern")
        });

        let result = re.captures(message).and_then(|caps| {
            let line: usize = caps.get(1)?.as_str().parse().ok()?;
            let column: usize = caps.get(2)?.as_str().parse().ok()?;
            Some(Position { line, column })
        });

        #[cfg(feature = "tracing")]
        if result.is_none() && (message.contains("Line") || message.contains("Column")) {
            trace!(
                "failed to parse position from error message that appears to contain one: {}",
                message
            );
        }

        result
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error")?;
        if let Some(pos) = self.position {
            write!(f, " at line {}, column {}", pos.line, pos.column)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for ParseError {}

impl From<sqlparser::parser::ParserError> for ParseError {
    fn from(err: sqlparser::parser::ParserError) -> Self {
        let message = err.to_string();
        let position = Self::parse_position_from_message(&message);
        Self {
            message,
            position,
            kind: ParseErrorKind::Syntax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_position_from_sqlparser_message() {
        let msg = "Expected SELECT, found 'INSERT' at Line: 1, Column: 5";
        let pos = ParseError::parse_position_from_message(msg);
        assert_eq!(pos, Some(Position { line: 1, column: 5 }));
    }

    #[test]
    fn missing_position_returns_none() {
        assert_eq!(ParseError::parse_position_from_message("bad token"), None);
    }

    #[test]
    fn display_includes_position_when_present() {
        let err = ParseError::with_position("unexpected token", 10, 5);
        assert_eq!(err.to_string(), "parse error at line 10, column 5: unexpected token");
    }

    #[test]
    fn shorthand_constructors_set_kind() {
        assert_eq!(
            ParseError::unsupported_join_on("bad on clause").kind,
            ParseErrorKind::UnsupportedJoinOn
        );
        assert_eq!(
            ParseError::unsupported_having("compound having").kind,
            ParseErrorKind::UnsupportedHaving
        );
        assert_eq!(
            ParseError::unsupported_statement("CTEs are not supported").kind,
            ParseErrorKind::UnsupportedStatement
        );
    }
}
