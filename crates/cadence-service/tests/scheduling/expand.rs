use cadence_core::types::Subject;
use cadence_rfc::error::RfcError;
use cadence_rfc::rfc::ical::core::Weekday;
use cadence_service::error::ServiceError;
use cadence_service::schedule::{
    CompileOptions, SessionInstance, WeekWindow, compile_from_buckets, expand_current_week,
};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};

use crate::fixtures::{
    DENVER, LOS_ANGELES, buckets, item, multi_subject_records, same_day_range, same_day_sessions,
};

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn rendered(sessions: &[SessionInstance]) -> Vec<(String, Subject, u32)> {
    sessions
        .iter()
        .map(|s| (s.start_floating_date_time.to_string(), s.subject, s.duration_minutes))
        .collect()
}

#[test_log::test]
fn multi_subject_week_expands_in_start_order() {
    let sessions = expand_current_week(&multi_subject_records(), &utc(2022, 7, 6, 20, 0)).unwrap();

    let expected = [
        ("2022-07-04T13:00:00", Subject::General, 67),
        ("2022-07-05T08:30:00", Subject::Ela, 75),
        ("2022-07-05T10:00:00", Subject::Math, 60),
        ("2022-07-06T13:00:00", Subject::General, 67),
        ("2022-07-07T08:30:00", Subject::Ela, 75),
        ("2022-07-07T15:00:00", Subject::Math, 75),
        ("2022-07-08T13:00:00", Subject::General, 67),
    ]
    .map(|(start, subject, minutes)| (start.to_string(), subject, minutes));

    assert_eq!(rendered(&sessions), expected);
    assert!(sessions.iter().all(|s| s.time_zone == LOS_ANGELES));
}

#[test]
fn sessions_stay_within_week_and_sorted() {
    let records = multi_subject_records();
    let mut now = utc(2022, 6, 12, 3, 30);
    let last = utc(2023, 1, 10, 3, 30);

    while now <= last {
        let window = WeekWindow::containing(&now, chrono_tz::America::Los_Angeles)
            .unwrap()
            .window;
        let sessions = expand_current_week(&records, &now).unwrap();

        assert!(
            sessions
                .iter()
                .all(|s| window.contains(s.start_floating_date_time)),
            "session outside week of {now}"
        );
        assert!(
            sessions
                .windows(2)
                .all(|pair| pair[0].start_floating_date_time <= pair[1].start_floating_date_time),
            "sessions unsorted for week of {now}"
        );

        now += TimeDelta::hours(17);
    }
}

#[test]
fn expansion_is_repeatable() {
    let records = multi_subject_records();
    let now = utc(2022, 9, 14, 18, 0);
    assert_eq!(
        expand_current_week(&records, &now).unwrap(),
        expand_current_week(&records, &now).unwrap()
    );
}

#[test]
fn weeks_outside_range_are_empty() {
    let records = multi_subject_records();
    assert!(expand_current_week(&records, &utc(2022, 6, 22, 18, 0)).unwrap().is_empty());
    assert!(expand_current_week(&records, &utc(2023, 1, 4, 18, 0)).unwrap().is_empty());
}

#[test]
fn first_and_last_weeks_are_clipped() {
    let records = multi_subject_records();

    let first = expand_current_week(&records, &utc(2022, 6, 29, 18, 0)).unwrap();
    assert_eq!(
        first[0].start_floating_date_time.to_string(),
        "2022-06-27T13:00:00"
    );
    assert_eq!(first.len(), 7);

    // UNTIL is 2022-12-27 23:59, a Tuesday.
    let last = expand_current_week(&records, &utc(2022, 12, 28, 18, 0)).unwrap();
    assert_eq!(
        rendered(&last),
        [
            ("2022-12-26T13:00:00".to_string(), Subject::General, 67),
            ("2022-12-27T08:30:00".to_string(), Subject::Ela, 75),
            ("2022-12-27T10:00:00".to_string(), Subject::Math, 60),
        ]
    );
}

#[test]
fn same_day_sessions_expand_separately() {
    let records =
        compile_from_buckets(&same_day_range(), &same_day_sessions(), &CompileOptions::default())
            .unwrap();
    let sessions = expand_current_week(&records, &utc(2023, 1, 3, 17, 0)).unwrap();

    assert_eq!(
        rendered(&sessions),
        [
            ("2023-01-02T07:13:00".to_string(), Subject::General, 68),
            ("2023-01-02T12:36:00".to_string(), Subject::General, 44),
            ("2023-01-02T16:15:00".to_string(), Subject::Ela, 48),
        ]
    );
}

#[test]
fn dst_transition_week_keeps_wall_clock_times() {
    // US clocks fall back on Sunday 2022-11-06.
    let sessions = expand_current_week(&multi_subject_records(), &utc(2022, 11, 9, 20, 0)).unwrap();
    assert_eq!(sessions.len(), 7);
    assert_eq!(sessions[0].start_floating_date_time.to_string(), "2022-11-07T13:00:00");

    let zoned = sessions[0]
        .start_floating_date_time
        .to_zoned(&chrono_tz::America::Los_Angeles)
        .unwrap();
    assert_eq!(zoned.with_timezone(&Utc), utc(2022, 11, 7, 21, 0));
}

#[test]
fn week_follows_first_record_zone() {
    // 00:30 Sunday in Denver, still 23:30 Saturday in Los Angeles.
    let now = utc(2023, 1, 8, 7, 30);

    let denver =
        compile_from_buckets(&same_day_range(), &same_day_sessions(), &CompileOptions::default())
            .unwrap();
    let los_angeles = compile_from_buckets(
        &same_day_range(),
        &buckets([(Weekday::Tuesday, item(Subject::Math, "10:00", "11:00", LOS_ANGELES))]),
        &CompileOptions::default(),
    )
    .unwrap();

    let denver_first: Vec<_> = denver.iter().chain(&los_angeles).cloned().collect();
    assert!(expand_current_week(&denver_first, &now).unwrap().is_empty());

    let los_angeles_first: Vec<_> = los_angeles.iter().chain(&denver).cloned().collect();
    let sessions = expand_current_week(&los_angeles_first, &now).unwrap();
    assert_eq!(sessions.len(), 4);
    assert_eq!(sessions[3].start_floating_date_time.to_string(), "2023-01-03T10:00:00");
    assert_eq!(sessions[0].time_zone, DENVER);
}

#[test]
fn equal_starts_keep_record_order() {
    let records = compile_from_buckets(
        &same_day_range(),
        &buckets([
            (Weekday::Monday, item(Subject::Math, "9:00", "10:00", DENVER)),
            (Weekday::Monday, item(Subject::Ela, "9:00", "9:30", DENVER)),
        ]),
        &CompileOptions::default(),
    )
    .unwrap();
    let sessions = expand_current_week(&records, &utc(2023, 1, 2, 20, 0)).unwrap();
    let subjects: Vec<Subject> = sessions.iter().map(|s| s.subject).collect();
    assert_eq!(subjects, [Subject::Math, Subject::Ela]);
}

#[test]
fn malformed_rule_fails_whole_expansion() {
    let mut records = multi_subject_records();
    records[2].recurrence_rule = "DTSTART:20220627T100000Z\nRRULE:FREQ=WEEKLY;BYDAY=TU".to_string();

    let err = expand_current_week(&records, &utc(2022, 7, 6, 20, 0)).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::RfcError(RfcError::MalformedRecurrenceRule(_))
    ));
}

#[test]
fn unknown_first_zone_fails() {
    let mut records = multi_subject_records();
    records[0].time_zone = "Nowhere/Special".to_string();
    let err = expand_current_week(&records, &utc(2022, 7, 6, 20, 0)).unwrap_err();
    assert!(matches!(err, ServiceError::RfcError(RfcError::UnknownTimezone(_))));
}
