//! vCard parse error types.

use std::fmt;

/// A grammar-level error with the position it was raised at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// File name, or "input" for in-memory text.
    pub source_name: String,
    /// Physical line, 1-based. Folded continuation lines count.
    pub line: usize,
    /// Byte offset into the physical line, 1-based.
    pub column: usize,
    pub message: String,
}

impl ParseError {
    #[must_use]
    pub fn new(
        kind: ParseErrorKind,
        source_name: impl Into<String>,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            source_name: source_name.into(),
            line,
            column,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}:{}): {}: {}",
            self.source_name, self.line, self.column, self.kind, self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// What went wrong, independent of where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnexpectedEof,
    /// Input did not match the expected literal or character class.
    UnexpectedToken,
    /// A value is malformed for its property (bad escape, missing field).
    InvalidValue,
    InvalidPropertyName,
    /// A parameter is missing, empty, or not allowed on the property.
    InvalidParameter,
    InvalidDateTime,
    /// `VERSION` is anything other than `3.0`.
    UnsupportedVersion,
}

impl ParseErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnexpectedEof => "unexpected end of input",
            Self::UnexpectedToken => "unexpected token",
            Self::InvalidValue => "invalid value",
            Self::InvalidPropertyName => "invalid property name",
            Self::InvalidParameter => "invalid parameter",
            Self::InvalidDateTime => "invalid date/time",
            Self::UnsupportedVersion => "unsupported version",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
