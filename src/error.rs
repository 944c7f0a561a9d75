//! Parse error types.

use std::fmt;
use thiserror::Error;

/// Closed set of reasons an SDP document can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A line is not of the form `<letter>=<value>`.
    InvalidLine,
    /// The document does not start with a `v=` line.
    MissingVersion,
    /// The `v=` line carries something other than `0`.
    UnsupportedVersion,
    /// No `o=` line.
    MissingOrigin,
    /// Malformed `o=` line.
    InvalidOrigin,
    /// No `s=` line.
    MissingSessionName,
    /// No `t=` line.
    MissingTiming,
    /// Malformed `t=` line.
    InvalidTiming,
    /// Malformed `c=` line.
    InvalidConnection,
    /// A media section has no `c=` line and the session has none either.
    MissingConnection,
    /// Malformed `b=` line.
    InvalidBandwidth,
    /// Malformed `m=` line.
    InvalidMedia,
    /// Malformed or misplaced `a=` line.
    InvalidAttribute,
    /// An attribute references a payload type missing from its `m=` line.
    UnknownFormat,
}

impl ParseErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseErrorKind::InvalidLine => "invalid-line",
            ParseErrorKind::MissingVersion => "missing-version",
            ParseErrorKind::UnsupportedVersion => "unsupported-version",
            ParseErrorKind::MissingOrigin => "missing-origin",
            ParseErrorKind::InvalidOrigin => "invalid-origin",
            ParseErrorKind::MissingSessionName => "missing-session-name",
            ParseErrorKind::MissingTiming => "missing-timing",
            ParseErrorKind::InvalidTiming => "invalid-timing",
            ParseErrorKind::InvalidConnection => "invalid-connection",
            ParseErrorKind::MissingConnection => "missing-connection",
            ParseErrorKind::InvalidBandwidth => "invalid-bandwidth",
            ParseErrorKind::InvalidMedia => "invalid-media",
            ParseErrorKind::InvalidAttribute => "invalid-attribute",
            ParseErrorKind::UnknownFormat => "unknown-format",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by [`parse`](crate::parse).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at line {line}: {message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// 1-based line number, 0 when the error concerns the whole document.
    pub line: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            message: message.into(),
        }
    }

    /// Error about the document as a whole rather than a single line.
    pub fn document(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self::new(kind, 0, message)
    }
}

/// Result type for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;
