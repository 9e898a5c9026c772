//! Recurrence-rule parsing (RFC 5545 subset).
//!
//! The parser is strict: anything the compiler would not have written is
//! rejected with a positioned [`ParseError`] rather than ignored.

mod error;
mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use values::{parse_byday, parse_rule};
