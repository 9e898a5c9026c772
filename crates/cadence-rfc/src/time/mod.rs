//! Wall-clock time-of-day values and the arithmetic the schedule compiler needs.
//!
//! A [`TimeOfDay`] carries no date and no timezone. Its fields are public so
//! callers can hold out-of-range values; every operation that renders or
//! converts one validates it first and never clamps.

mod calendar;

pub use calendar::{normalize_calendar_date, normalize_from_utc};

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{RfcError, RfcResult};

/// Wall-clock time with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeOfDay {
    /// Hour (0-23).
    pub hour: u8,
    /// Minute (0-59).
    pub minute: u8,
}

/// Field of a [`TimeOfDay`], used to report which one is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Hour,
    Minute,
}

impl TimeField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Minute => "minute",
        }
    }

    #[must_use]
    pub const fn range_label(self) -> &'static str {
        match self {
            Self::Hour => "0-23",
            Self::Minute => "0-59",
        }
    }
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TimeOfDay {
    /// ## Summary
    /// Creates a validated time of day.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidTime` naming the first field out of range.
    pub fn new(hour: u8, minute: u8) -> RfcResult<Self> {
        let time = Self { hour, minute };
        time.validate()?;
        Ok(time)
    }

    /// ## Summary
    /// Checks `hour` in 0-23 and `minute` in 0-59.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidTime` naming the first field out of range.
    pub fn validate(&self) -> RfcResult<()> {
        if self.hour > 23 {
            return Err(RfcError::InvalidTime {
                field: TimeField::Hour,
                value: self.hour,
            });
        }
        if self.minute > 59 {
            return Err(RfcError::InvalidTime {
                field: TimeField::Minute,
                value: self.minute,
            });
        }
        Ok(())
    }

    /// Minutes elapsed since midnight, without validation.
    #[must_use]
    pub fn minutes_since_midnight(self) -> i64 {
        i64::from(self.hour) * 60 + i64::from(self.minute)
    }

    /// ## Summary
    /// Converts to a `chrono::NaiveTime` with zero seconds.
    ///
    /// ## Errors
    /// Returns `RfcError::InvalidTime` if the value is out of range.
    pub fn to_naive_time(self) -> RfcResult<NaiveTime> {
        self.validate()?;
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0).ok_or(
            RfcError::InvalidTime {
                field: TimeField::Hour,
                value: self.hour,
            },
        )
    }
}

/// Zero-padded `HH:MM`, without validation. Use [`stringify_time`] when the
/// value may be out of range.
impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = RfcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_time(&raw).map_err(serde::de::Error::custom)
    }
}

/// ## Summary
/// Returns `end - start` in minutes on the same notional day.
///
/// ## Errors
/// Returns `RfcError::NegativeDuration` if `end` is before `start`; there is
/// no wraparound past midnight.
pub fn calculate_duration_in_minutes(start: TimeOfDay, end: TimeOfDay) -> RfcResult<u32> {
    let minutes = end.minutes_since_midnight() - start.minutes_since_midnight();
    u32::try_from(minutes).map_err(|_err| RfcError::NegativeDuration {
        start,
        end,
        minutes,
    })
}

/// ## Summary
/// Renders a time as zero-padded 24-hour `HH:MM`.
///
/// ## Errors
/// Returns `RfcError::InvalidTime` citing the offending field if the hour or
/// minute is out of range.
pub fn stringify_time(time: TimeOfDay) -> RfcResult<String> {
    time.validate()?;
    Ok(time.to_string())
}

/// ## Summary
/// Parses `HH:MM` or `H:MM`.
///
/// The match is strict: no surrounding whitespace, exactly one colon, a one
/// or two digit hour and a two digit minute.
///
/// ## Errors
/// Returns `RfcError::UnrecognizedTimeFormat` carrying the input when the
/// pattern does not match, or `RfcError::InvalidTime` when it matches but a
/// field is out of range.
pub fn parse_time(s: &str) -> RfcResult<TimeOfDay> {
    let unrecognized = || RfcError::UnrecognizedTimeFormat(s.to_string());

    let (hour_str, minute_str) = s.split_once(':').ok_or_else(unrecognized)?;

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !(1..=2).contains(&hour_str.len())
        || minute_str.len() != 2
        || !all_digits(hour_str)
        || !all_digits(minute_str)
    {
        return Err(unrecognized());
    }

    let hour = hour_str.parse::<u8>().map_err(|_err| unrecognized())?;
    let minute = minute_str.parse::<u8>().map_err(|_err| unrecognized())?;

    TimeOfDay::new(hour, minute)
}
