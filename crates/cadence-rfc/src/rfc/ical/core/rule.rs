use std::fmt;
use std::str::FromStr;

use super::{FloatingDateTime, WeekdaySet};
use crate::error::RfcError;

/// Daily-frequency recurrence filtered by weekday, bounded by an inclusive UNTIL.
///
/// Wire form (two lines):
///
/// ```text
/// DTSTART:20220627T130000Z
/// RRULE:FREQ=DAILY;BYDAY=MO,WE,FR;UNTIL=20221227T235900Z
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DailyRecurrence {
    /// First candidate occurrence.
    pub dtstart: FloatingDateTime,
    /// Weekdays the rule fires on.
    pub by_day: WeekdaySet,
    /// Last instant an occurrence may start at (inclusive).
    pub until: FloatingDateTime,
}

impl DailyRecurrence {
    #[must_use]
    pub const fn new(dtstart: FloatingDateTime, by_day: WeekdaySet, until: FloatingDateTime) -> Self {
        Self {
            dtstart,
            by_day,
            until,
        }
    }
}

impl fmt::Display for DailyRecurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::rfc::ical::build::serialize(self))
    }
}

impl FromStr for DailyRecurrence {
    type Err = RfcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(crate::rfc::ical::parse::parse_rule(s)?)
    }
}
