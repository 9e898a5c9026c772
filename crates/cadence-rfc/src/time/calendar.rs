//! Calendar-date normalisation between client-local dates and UTC midnights.

use chrono::{DateTime, NaiveTime, TimeZone, Utc};

use crate::error::{RfcError, RfcResult};

/// ## Summary
/// Strips the time of day, returning UTC midnight on the input's calendar date.
///
/// The input's calendar date is taken as-is in its own offset; no timezone
/// re-interpretation happens in this direction.
#[must_use]
pub fn normalize_calendar_date<Tz: TimeZone>(date_time: &DateTime<Tz>) -> DateTime<Utc> {
    date_time
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc()
}

/// ## Summary
/// Builds local midnight in `tz` carrying the UTC calendar fields of `date_time`.
///
/// This reads year, month and day from the UTC representation and rebuilds
/// them in `tz` instead of converting the instant, so a zone behind UTC does
/// not shift the date back by one day.
///
/// ## Errors
/// Returns `RfcError::NonexistentLocalTime` if local midnight falls into a
/// DST gap in `tz`.
pub fn normalize_from_utc<Tz: TimeZone>(date_time: &DateTime<Utc>, tz: &Tz) -> RfcResult<DateTime<Tz>> {
    let midnight = date_time.date_naive().and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .ok_or_else(|| RfcError::NonexistentLocalTime(midnight.to_string()))
}
