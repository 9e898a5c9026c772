//! Occurrence enumeration using the `rrule` crate.

use chrono::{Datelike, TimeDelta, Utc};
use rrule::{RRuleSet, Tz};

use crate::error::RfcResult;
use crate::rfc::ical::core::{DailyRecurrence, FloatingDateTime, Weekday};
use crate::rfc::ical::parse::{ParseError, ParseErrorKind};

/// Inclusive `[start, end]` range of floating timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatingWindow {
    pub start: FloatingDateTime,
    pub end: FloatingDateTime,
}

impl FloatingWindow {
    #[must_use]
    pub const fn new(start: FloatingDateTime, end: FloatingDateTime) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn contains(&self, value: FloatingDateTime) -> bool {
        self.start <= value && value <= self.end
    }
}

/// ## Summary
/// Enumerates the occurrences of `rule` that start within `window`, ascending.
///
/// Floating values are handed to the recurrence engine as UTC fields, so no
/// DST arithmetic happens here; the wall clock is what repeats.
///
/// A rule whose UNTIL precedes its DTSTART has no occurrences.
///
/// ## Errors
/// Returns `RfcError::MalformedRecurrenceRule` if the recurrence engine
/// rejects the rule.
pub fn occurrences_within(
    rule: &DailyRecurrence,
    window: &FloatingWindow,
) -> RfcResult<Vec<FloatingDateTime>> {
    if rule.until < rule.dtstart {
        tracing::debug!(
            dtstart = %rule.dtstart,
            until = %rule.until,
            "Recurrence ends before it starts"
        );
        return Ok(Vec::new());
    }

    let rule_text = rule.to_string();
    let rrule_set = rule_text.parse::<RRuleSet>().map_err(|err| {
        ParseError::new(ParseErrorKind::InvalidRRule, 2, 1).with_context(err.to_string())
    })?;

    // The engine's bounds are exclusive; widen by a second and filter exactly below.
    let after = (window.start.as_utc_fields() - TimeDelta::seconds(1)).with_timezone(&Tz::UTC);
    let before = (window.end.as_utc_fields() + TimeDelta::seconds(1)).with_timezone(&Tz::UTC);

    let result = rrule_set.after(after).before(before).all(u16::MAX);

    let occurrences: Vec<FloatingDateTime> = result
        .dates
        .iter()
        .map(|date| FloatingDateTime::from_utc_fields(&date.with_timezone(&Utc)))
        .filter(|occurrence| window.contains(*occurrence))
        // DTSTART only counts when it falls on a BYDAY weekday.
        .filter(|occurrence| rule.by_day.contains(Weekday::from(occurrence.date().weekday())))
        .collect();

    tracing::trace!(
        rule = %rule_text,
        window_start = %window.start,
        window_end = %window.end,
        count = occurrences.len(),
        "Expanded recurrence rule"
    );

    Ok(occurrences)
}
