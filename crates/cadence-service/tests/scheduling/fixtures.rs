use cadence_core::types::Subject;
use cadence_rfc::rfc::ical::core::Weekday;
use cadence_service::schedule::{
    CompileOptions, DateRange, RecurrenceRecord, ScheduleItem, WeekdayBuckets, compile_from_buckets,
};
use chrono::NaiveDate;

pub const LOS_ANGELES: &str = "America/Los_Angeles";
pub const DENVER: &str = "America/Denver";

pub fn item(subject: Subject, start: &str, end: &str, time_zone: &str) -> ScheduleItem {
    ScheduleItem {
        subject,
        start_time: start.parse().unwrap(),
        end_time: end.parse().unwrap(),
        time_zone: time_zone.to_string(),
    }
}

/// Inclusive range between two calendar dates.
pub fn range(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
        NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
    )
    .unwrap()
}

/// Builds buckets from `(weekday, item)` pairs, preserving order within a day.
pub fn buckets(items: impl IntoIterator<Item = (Weekday, ScheduleItem)>) -> WeekdayBuckets {
    let mut buckets = WeekdayBuckets::default();
    for (weekday, item) in items {
        buckets.bucket_mut(weekday).push(item);
    }
    buckets
}

/// Three subjects across the school week in Los Angeles.
pub fn multi_subject_week() -> WeekdayBuckets {
    let general = || item(Subject::General, "13:00", "14:07", LOS_ANGELES);
    buckets([
        (Weekday::Monday, general()),
        (Weekday::Tuesday, item(Subject::Ela, "8:30", "9:45", LOS_ANGELES)),
        (Weekday::Tuesday, item(Subject::Math, "10:00", "11:00", LOS_ANGELES)),
        (Weekday::Wednesday, general()),
        (Weekday::Thursday, item(Subject::Ela, "8:30", "9:45", LOS_ANGELES)),
        (Weekday::Thursday, item(Subject::Math, "15:00", "16:15", LOS_ANGELES)),
        (Weekday::Friday, general()),
    ])
}

pub fn multi_subject_range() -> DateRange {
    range((2022, 6, 27), (2022, 12, 27))
}

/// Two GENERAL sessions and one ELA session, all on Monday in Denver.
pub fn same_day_sessions() -> WeekdayBuckets {
    buckets([
        (Weekday::Monday, item(Subject::General, "7:13", "8:21", DENVER)),
        (Weekday::Monday, item(Subject::General, "12:36", "13:20", DENVER)),
        (Weekday::Monday, item(Subject::Ela, "16:15", "17:03", DENVER)),
    ])
}

pub fn same_day_range() -> DateRange {
    range((2023, 1, 1), (2023, 1, 5))
}

pub fn multi_subject_records() -> Vec<RecurrenceRecord> {
    compile_from_buckets(
        &multi_subject_range(),
        &multi_subject_week(),
        &CompileOptions::default(),
    )
    .unwrap()
}
