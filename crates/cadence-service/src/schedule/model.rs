//! Schedule input, persisted recurrence records, and computed session instances.

use cadence_core::error::{CoreError, CoreResult};
use cadence_core::types::{EventType, MeetingType, Subject};
use cadence_rfc::error::RfcResult;
use cadence_rfc::rfc::ical::core::{DailyRecurrence, FloatingDateTime, Weekday, WeekdaySet};
use cadence_rfc::time::{TimeOfDay, normalize_calendar_date};
use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

/// One subject session inside a weekday bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub subject: Subject,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    /// IANA zone name.
    pub time_zone: String,
}

/// Raw schedule input bucketed by weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeekdayBuckets {
    pub sunday: Vec<ScheduleItem>,
    pub monday: Vec<ScheduleItem>,
    pub tuesday: Vec<ScheduleItem>,
    pub wednesday: Vec<ScheduleItem>,
    pub thursday: Vec<ScheduleItem>,
    pub friday: Vec<ScheduleItem>,
    pub saturday: Vec<ScheduleItem>,
}

impl WeekdayBuckets {
    /// Returns the bucket for `weekday`.
    #[must_use]
    pub fn bucket(&self, weekday: Weekday) -> &[ScheduleItem] {
        match weekday {
            Weekday::Sunday => &self.sunday,
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
        }
    }

    /// Returns a mutable handle to the bucket for `weekday`.
    pub fn bucket_mut(&mut self, weekday: Weekday) -> &mut Vec<ScheduleItem> {
        match weekday {
            Weekday::Sunday => &mut self.sunday,
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
        }
    }
}

/// A schedule item stamped with the weekday bucket it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub weekday: Weekday,
    pub subject: Subject,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub time_zone: String,
}

impl ScheduleEntry {
    #[must_use]
    pub fn from_item(weekday: Weekday, item: &ScheduleItem) -> Self {
        Self {
            weekday,
            subject: item.subject,
            start_time: item.start_time,
            end_time: item.end_time,
            time_zone: item.time_zone.clone(),
        }
    }
}

/// Inclusive calendar range a schedule runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// ## Summary
    /// Creates a range, rejecting one that ends before it starts.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidInput` if `end` precedes `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> CoreResult<Self> {
        if end < start {
            return Err(CoreError::InvalidInput(format!(
                "date range ends ({end}) before it starts ({start})"
            )));
        }
        Ok(Self { start, end })
    }

    /// ## Summary
    /// Creates a range from the calendar dates of two instants.
    ///
    /// Each date is read in the instant's own offset, so `2023-01-05T18:30-07:00`
    /// contributes 2023-01-05 even though it is already the 6th in UTC. The
    /// time of day is dropped.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidInput` if the end date precedes the start date.
    pub fn from_instants<Tz: TimeZone>(
        start: &DateTime<Tz>,
        end: &DateTime<Tz>,
    ) -> CoreResult<Self> {
        Self::new(
            normalize_calendar_date(start).date_naive(),
            normalize_calendar_date(end).date_naive(),
        )
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }
}

/// Persisted description of one recurring session series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRecord {
    pub event_type: EventType,
    pub meeting_type: MeetingType,
    pub subject: Subject,
    /// Floating first occurrence; read against `time_zone`.
    pub start_date_time: FloatingDateTime,
    pub time_zone: String,
    pub duration_minutes: u32,
    /// Two-line `DTSTART` / `RRULE` text.
    pub recurrence_rule: String,
}

impl RecurrenceRecord {
    /// ## Summary
    /// Decodes the stored rule text.
    ///
    /// ## Errors
    /// Returns `RfcError::MalformedRecurrenceRule` if the text is outside the
    /// supported subset.
    pub fn rule(&self) -> RfcResult<DailyRecurrence> {
        self.recurrence_rule.parse()
    }

    /// ## Summary
    /// Returns the weekdays named by the rule's BYDAY clause.
    ///
    /// ## Errors
    /// Returns `RfcError::MalformedRecurrenceRule` if the rule cannot be decoded.
    pub fn weekdays(&self) -> RfcResult<WeekdaySet> {
        Ok(self.rule()?.by_day)
    }
}

/// One concrete session produced by expanding a record over a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInstance {
    pub start_floating_date_time: FloatingDateTime,
    pub duration_minutes: u32,
    pub time_zone: String,
    pub subject: Subject,
}
