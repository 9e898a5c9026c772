//! Floating (offset-free) timestamps.
//!
//! A floating timestamp is a calendar date plus a wall-clock time that only
//! becomes an instant once a timezone is supplied. The wire form reuses the
//! UTC basic format (`YYYYMMDDTHHMMSSZ`) for compatibility with stored rules,
//! but the `Z` carries no offset meaning here.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{RfcError, RfcResult};
use crate::time::TimeOfDay;

const BASIC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloatingDateTime(NaiveDateTime);

impl FloatingDateTime {
    #[must_use]
    pub const fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self(NaiveDateTime::new(date, time))
    }

    /// ## Summary
    /// Combines a calendar date with a validated time of day (seconds zero).
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidTime` if `time` is out of range.
    pub fn from_time_of_day(date: NaiveDate, time: TimeOfDay) -> RfcResult<Self> {
        Ok(Self::new(date, time.to_naive_time()?))
    }

    /// Reads the wall clock of `instant` in `tz`.
    #[must_use]
    pub fn from_instant<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> Self {
        Self(instant.with_timezone(tz).naive_local())
    }

    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0.date()
    }

    #[must_use]
    pub const fn time(self) -> NaiveTime {
        self.0.time()
    }

    #[must_use]
    pub const fn as_naive(self) -> NaiveDateTime {
        self.0
    }

    /// Treats the fields as UTC, the representation used on the wire and by
    /// the recurrence engine.
    #[must_use]
    pub fn as_utc_fields(self) -> DateTime<Utc> {
        self.0.and_utc()
    }

    /// Inverse of [`Self::as_utc_fields`].
    #[must_use]
    pub fn from_utc_fields(fields: &DateTime<Utc>) -> Self {
        Self(fields.naive_utc())
    }

    /// Formats as `YYYYMMDDTHHMMSSZ`.
    #[must_use]
    pub fn format_basic(self) -> String {
        self.0.format(BASIC_FORMAT).to_string()
    }

    /// Parses `YYYYMMDDTHHMMSSZ`. Returns `None` for any other shape,
    /// including the offset-less `YYYYMMDDTHHMMSS` form.
    #[must_use]
    pub fn parse_basic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 16 || bytes[8] != b'T' || bytes[15] != b'Z' {
            return None;
        }
        let digits_ok = bytes[..8]
            .iter()
            .chain(&bytes[9..15])
            .all(u8::is_ascii_digit);
        if !digits_ok {
            return None;
        }

        let field = |range: std::ops::Range<usize>| s[range].parse::<u32>().ok();
        let date = NaiveDate::from_ymd_opt(
            i32::try_from(field(0..4)?).ok()?,
            field(4..6)?,
            field(6..8)?,
        )?;
        let time = NaiveTime::from_hms_opt(field(9..11)?, field(11..13)?, field(13..15)?)?;
        Some(Self::new(date, time))
    }

    /// ## Summary
    /// Resolves this wall-clock value to a real instant in `tz`.
    ///
    /// Ambiguous times (DST fold) resolve to the earlier instant.
    ///
    /// ## Errors
    /// Returns `RfcError::NonexistentLocalTime` if the value falls into a DST gap.
    pub fn to_zoned<Tz: TimeZone>(self, tz: &Tz) -> RfcResult<DateTime<Tz>> {
        tz.from_local_datetime(&self.0)
            .earliest()
            .ok_or_else(|| RfcError::NonexistentLocalTime(self.0.to_string()))
    }
}

impl fmt::Display for FloatingDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S"))
    }
}
