//! RFC 5545 recurrence subset.
//!
//! Only the shape written by the schedule compiler is supported:
//! `DTSTART` followed by `RRULE:FREQ=DAILY;BYDAY=...;UNTIL=...`.

pub mod build;
pub mod core;
pub mod expand;
pub mod parse;
