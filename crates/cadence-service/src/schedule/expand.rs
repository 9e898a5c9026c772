//! Materializes session instances from stored recurrence records.

use cadence_core::error::CoreError;
use cadence_rfc::rfc::ical::core::{FloatingDateTime, Weekday};
use cadence_rfc::rfc::ical::expand::{FloatingWindow, occurrences_within, resolve_timezone};
use chrono::{DateTime, Datelike, Days, NaiveTime, Utc};
use chrono_tz::Tz;

use super::model::{RecurrenceRecord, SessionInstance};
use crate::error::ServiceResult;

/// Sunday-to-Saturday week containing an instant, as seen in one zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub time_zone: Tz,
    /// Sunday 00:00:00 through Saturday 23:59:59, floating.
    pub window: FloatingWindow,
}

impl WeekWindow {
    /// ## Summary
    /// Computes the local week of `now` in `time_zone`.
    ///
    /// ## Errors
    /// Returns `CoreError::InvariantViolation` if the week runs off the end of
    /// the supported calendar.
    pub fn containing(now: &DateTime<Utc>, time_zone: Tz) -> ServiceResult<Self> {
        let local_date = FloatingDateTime::from_instant(now, &time_zone).date();
        let since_sunday = Weekday::from(local_date.weekday()).num_days_from_sunday();

        let sunday = local_date
            .checked_sub_days(Days::new(u64::from(since_sunday)))
            .ok_or(CoreError::InvariantViolation("week start out of calendar range"))?;
        let saturday = sunday
            .checked_add_days(Days::new(6))
            .ok_or(CoreError::InvariantViolation("week end out of calendar range"))?;
        let last_second = NaiveTime::from_hms_opt(23, 59, 59)
            .ok_or(CoreError::InvariantViolation("invalid end-of-day time"))?;

        Ok(Self {
            time_zone,
            window: FloatingWindow::new(
                FloatingDateTime::new(sunday, NaiveTime::MIN),
                FloatingDateTime::new(saturday, last_second),
            ),
        })
    }
}

/// ## Summary
/// Expands every record over `window` and returns the sessions sorted by
/// start time.
///
/// Ties keep record order.
///
/// ## Errors
/// Fails on the first record whose rule cannot be decoded or enumerated;
/// no partial result is returned.
pub fn expand_window(
    records: &[RecurrenceRecord],
    window: &FloatingWindow,
) -> ServiceResult<Vec<SessionInstance>> {
    let mut sessions = Vec::new();

    for record in records {
        let rule = record.rule().inspect_err(|err| {
            tracing::warn!(
                subject = %record.subject,
                rule = %record.recurrence_rule,
                error = %err,
                "Stored recurrence rule is malformed"
            );
        })?;

        sessions.extend(occurrences_within(&rule, window)?.into_iter().map(|start| {
            SessionInstance {
                start_floating_date_time: start,
                duration_minutes: record.duration_minutes,
                time_zone: record.time_zone.clone(),
                subject: record.subject,
            }
        }));
    }

    sessions.sort_by_key(|session| session.start_floating_date_time);

    Ok(sessions)
}

/// ## Summary
/// Expands `records` over the week containing `now`.
///
/// The week is computed in the zone of the first record and applied to all
/// of them.
///
/// ## Errors
/// Returns `RfcError::UnknownTimezone` if the first record's zone is unknown,
/// or any error from [`expand_window`].
#[tracing::instrument(skip(records), fields(records = records.len()))]
pub fn expand_current_week(
    records: &[RecurrenceRecord],
    now: &DateTime<Utc>,
) -> ServiceResult<Vec<SessionInstance>> {
    let Some(first) = records.first() else {
        return Ok(Vec::new());
    };

    let time_zone = resolve_timezone(&first.time_zone)?;
    let week = WeekWindow::containing(now, time_zone)?;

    tracing::debug!(
        %time_zone,
        week_start = %week.window.start,
        week_end = %week.window.end,
        "Expanding current week"
    );

    expand_window(records, &week.window)
}
