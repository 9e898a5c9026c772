use cadence_rfc::rfc::ical::core::Weekday;

use super::model::{ScheduleEntry, WeekdayBuckets};

/// ## Summary
/// Flattens weekday buckets into one list, stamping each item with its weekday.
///
/// Buckets are concatenated Sunday through Saturday. Nothing is dropped or
/// deduplicated.
#[must_use]
pub fn extract_schedules(buckets: &WeekdayBuckets) -> Vec<ScheduleEntry> {
    Weekday::all()
        .into_iter()
        .flat_map(|weekday| {
            buckets
                .bucket(weekday)
                .iter()
                .map(move |item| ScheduleEntry::from_item(weekday, item))
        })
        .collect()
}
