//! Recurrence-rule serialization (RFC 5545 subset).

use crate::rfc::ical::core::DailyRecurrence;

/// Property name of the first line.
pub const DTSTART: &str = "DTSTART";
/// Property name of the second line.
pub const RRULE: &str = "RRULE";

/// ## Summary
/// Renders the two-line rule text.
///
/// BYDAY tokens are emitted in canonical `SU..SA` order, never in insertion
/// order, so equal rules always serialize identically.
#[must_use]
pub fn serialize(rule: &DailyRecurrence) -> String {
    format!(
        "{DTSTART}:{}\n{RRULE}:FREQ=DAILY;BYDAY={};UNTIL={}",
        rule.dtstart.format_basic(),
        rule.by_day,
        rule.until.format_basic(),
    )
}
