use thiserror::Error;

use crate::rfc::ical::parse::ParseError;
use crate::time::{TimeField, TimeOfDay};

/// Time and recurrence-rule errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Negative duration: {end} is {} minutes before {start}", magnitude(.minutes))]
    NegativeDuration {
        start: TimeOfDay,
        end: TimeOfDay,
        minutes: i64,
    },

    #[error("Invalid time: {field} {value} is out of range {}", .field.range_label())]
    InvalidTime { field: TimeField, value: u8 },

    #[error("Unrecognized time format: {}", describe_input(.0))]
    UnrecognizedTimeFormat(String),

    #[error("Malformed recurrence rule: {0}")]
    MalformedRecurrenceRule(#[from] ParseError),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Non-existent local time (DST gap): {0}")]
    NonexistentLocalTime(String),

    #[error(transparent)]
    CoreError(#[from] cadence_core::error::CoreError),
}

#[expect(
    clippy::trivially_copy_pass_by_ref,
    reason = "thiserror passes format arguments by reference"
)]
fn magnitude(minutes: &i64) -> u64 {
    minutes.unsigned_abs()
}

fn describe_input(input: &str) -> String {
    if input.is_empty() {
        "empty string".to_string()
    } else {
        format!("{input:?}")
    }
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
