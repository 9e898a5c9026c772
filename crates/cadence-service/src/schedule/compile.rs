//! Compiles flattened schedule entries into recurrence records.

use std::hash::Hash;

use cadence_core::config::ScheduleConfig;
use cadence_core::constants::{
    DEFAULT_UNTIL_BOUNDARY_SECONDS, UNTIL_BOUNDARY_HOUR, UNTIL_BOUNDARY_MINUTE,
};
use cadence_core::error::{CoreError, CoreResult};
use cadence_core::types::{EventType, MeetingType};
use cadence_rfc::error::RfcResult;
use cadence_rfc::rfc::ical::core::{DailyRecurrence, FloatingDateTime, WeekdaySet};
use cadence_rfc::rfc::ical::expand::TimeZoneResolver;
use cadence_rfc::time::{calculate_duration_in_minutes, stringify_time};
use chrono::NaiveTime;
use indexmap::IndexMap;

use super::extract::extract_schedules;
use super::model::{DateRange, RecurrenceRecord, ScheduleEntry, WeekdayBuckets};
use crate::error::{ServiceError, ServiceResult};

/// Knobs for rule generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Seconds field of the UNTIL boundary, which is always `23:59:SS` on the
    /// range's last calendar date.
    pub until_boundary_seconds: u32,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            until_boundary_seconds: DEFAULT_UNTIL_BOUNDARY_SECONDS,
        }
    }
}

impl From<&ScheduleConfig> for CompileOptions {
    fn from(config: &ScheduleConfig) -> Self {
        Self {
            until_boundary_seconds: config.until_boundary_seconds,
        }
    }
}

impl CompileOptions {
    /// ## Summary
    /// Returns the wall-clock time used for every UNTIL boundary.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` if the seconds field is not a
    /// valid second.
    pub fn until_boundary_time(&self) -> CoreResult<NaiveTime> {
        NaiveTime::from_hms_opt(
            UNTIL_BOUNDARY_HOUR,
            UNTIL_BOUNDARY_MINUTE,
            self.until_boundary_seconds,
        )
        .ok_or_else(|| {
            CoreError::InvalidConfiguration(format!(
                "until boundary seconds out of range: {}",
                self.until_boundary_seconds
            ))
        })
    }
}

/// Merge key for entries of one subject: rendered start, rendered end, zone.
type TimeKey = (String, String, String);

/// ## Summary
/// Compiles schedule entries into one recurrence record per
/// `(subject, start, end, zone)` cluster.
///
/// Subjects are emitted in first-appearance order, and clusters within a
/// subject likewise. Weekdays of a cluster collapse into its BYDAY set.
///
/// ## Errors
/// The whole call fails on the first invalid entry:
/// - `RfcError::InvalidTime` if a time is out of range
/// - `RfcError::NegativeDuration` if a session ends before it starts
/// - `RfcError::UnknownTimezone` if a zone name is not an IANA zone
/// - `CoreError::InvalidConfiguration` if `options` is out of range
#[tracing::instrument(skip(schedules), fields(entries = schedules.len()))]
pub fn compile_recurrence(
    range: &DateRange,
    schedules: &[ScheduleEntry],
    options: &CompileOptions,
) -> ServiceResult<Vec<RecurrenceRecord>> {
    if schedules.is_empty() {
        tracing::debug!("No schedule entries to compile");
        return Ok(Vec::new());
    }

    let start_date = range.start();
    let until = FloatingDateTime::new(range.end(), options.until_boundary_time()?);

    let mut resolver = TimeZoneResolver::new();
    let mut records = Vec::new();

    let subjects = group_stable(schedules, |entry| Ok::<_, ServiceError>(entry.subject))?;
    for (subject, entries) in subjects {
        let clusters = group_stable(entries, |entry| -> RfcResult<TimeKey> {
            Ok((
                stringify_time(entry.start_time)?,
                stringify_time(entry.end_time)?,
                entry.time_zone.clone(),
            ))
        })?;

        for ((_, _, time_zone), entries) in clusters {
            let Some(first) = entries.first() else {
                continue;
            };

            let weekdays: WeekdaySet = entries.iter().map(|entry| entry.weekday).collect();
            let duration_minutes = calculate_duration_in_minutes(first.start_time, first.end_time)?;
            resolver.resolve(&time_zone)?;

            let dtstart = FloatingDateTime::from_time_of_day(start_date, first.start_time)?;
            let rule = DailyRecurrence::new(dtstart, weekdays, until);

            tracing::trace!(
                %subject,
                %time_zone,
                by_day = %weekdays,
                duration_minutes,
                "Compiled recurrence cluster"
            );

            records.push(RecurrenceRecord {
                event_type: EventType::Recurring,
                meeting_type: MeetingType::StudentSession,
                subject,
                start_date_time: dtstart,
                time_zone,
                duration_minutes,
                recurrence_rule: rule.to_string(),
            });
        }
    }

    tracing::debug!(records = records.len(), "Compiled recurrence records");

    Ok(records)
}

/// ## Summary
/// Extracts entries from weekday buckets and compiles them.
///
/// ## Errors
/// Same as [`compile_recurrence`].
pub fn compile_from_buckets(
    range: &DateRange,
    buckets: &WeekdayBuckets,
    options: &CompileOptions,
) -> ServiceResult<Vec<RecurrenceRecord>> {
    compile_recurrence(range, &extract_schedules(buckets), options)
}

/// Groups `items` by key, keeping first-appearance order for both groups and members.
fn group_stable<T, K, E>(
    items: impl IntoIterator<Item = T>,
    mut key_of: impl FnMut(&T) -> Result<K, E>,
) -> Result<IndexMap<K, Vec<T>>, E>
where
    K: Eq + Hash,
{
    let mut groups: IndexMap<K, Vec<T>> = IndexMap::new();
    for item in items {
        groups.entry(key_of(&item)?).or_default().push(item);
    }
    Ok(groups)
}
