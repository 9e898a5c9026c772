//! Recurrence-rule parsing error types.

use std::fmt;

/// Result type for recurrence-rule parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Error type for recurrence-rule parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Kind of error.
    pub kind: ParseErrorKind,
    /// Line number where the error occurred (1-based).
    pub line: usize,
    /// Column number where the error occurred (1-based).
    pub column: usize,
    /// Additional context about the error.
    pub context: Option<String>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, line: usize, column: usize) -> Self {
        Self {
            kind,
            line,
            column,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}, column {}", self.kind, self.line, self.column)?;
        if let Some(ref ctx) = self.context {
            write!(f, ": {ctx}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Kinds of parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Rule text does not have exactly two lines.
    InvalidLineCount,
    /// Missing colon separator.
    MissingColon,
    /// Property name other than the one expected on this line.
    UnexpectedProperty,
    /// Property parameters (e.g. `;TZID=`) are not supported.
    UnsupportedParameter,
    /// Invalid date-time format.
    InvalidDateTime,
    /// Rule part without `=`.
    InvalidRRule,
    /// Frequency other than DAILY.
    InvalidFrequency,
    /// Invalid or ordinal weekday token.
    InvalidWeekday,
    /// BYDAY with no weekdays.
    EmptyByDay,
    /// Rule part outside FREQ, BYDAY and UNTIL.
    UnsupportedRulePart,
    /// Rule part given more than once.
    DuplicateRulePart,
    /// Required rule part absent.
    MissingRulePart,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLineCount => write!(f, "expected exactly DTSTART and RRULE lines"),
            Self::MissingColon => write!(f, "missing colon separator"),
            Self::UnexpectedProperty => write!(f, "unexpected property"),
            Self::UnsupportedParameter => write!(f, "property parameters are not supported"),
            Self::InvalidDateTime => write!(f, "invalid date-time format"),
            Self::InvalidRRule => write!(f, "invalid recurrence rule"),
            Self::InvalidFrequency => write!(f, "only FREQ=DAILY is supported"),
            Self::InvalidWeekday => write!(f, "invalid weekday"),
            Self::EmptyByDay => write!(f, "BYDAY lists no weekdays"),
            Self::UnsupportedRulePart => write!(f, "unsupported rule part"),
            Self::DuplicateRulePart => write!(f, "duplicate rule part"),
            Self::MissingRulePart => write!(f, "missing rule part"),
        }
    }
}
