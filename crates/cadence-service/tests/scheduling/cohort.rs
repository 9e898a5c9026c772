use cadence_core::config::Settings;
use cadence_core::types::{CohortId, Subject};
use cadence_rfc::error::RfcError;
use cadence_rfc::rfc::ical::core::Weekday;
use cadence_service::cohort::CohortScheduleService;
use cadence_service::error::ServiceError;
use cadence_service::schedule::CompileOptions;
use cadence_service::store::{InMemoryRecurrenceStore, RecurrenceStore};
use chrono::{TimeZone, Utc};
use config::{Config, File, FileFormat};

use crate::fixtures::{DENVER, buckets, item, multi_subject_range, multi_subject_week};

fn service() -> CohortScheduleService<InMemoryRecurrenceStore> {
    CohortScheduleService::new(InMemoryRecurrenceStore::new(), CompileOptions::default())
}

#[test_log::test(tokio::test)]
async fn replace_then_read_current_week() {
    let service = service();
    let cohort = CohortId::generate();

    let saved = service
        .replace_schedule(cohort, &multi_subject_range(), &multi_subject_week())
        .await
        .unwrap();
    assert_eq!(saved.len(), 4);
    assert_eq!(service.records(cohort).await.unwrap(), saved);

    let now = Utc.with_ymd_and_hms(2022, 7, 6, 20, 0, 0).unwrap();
    let sessions = service.current_week(cohort, &now).await.unwrap();
    assert_eq!(sessions.len(), 7);
}

#[test_log::test(tokio::test)]
async fn unknown_cohort_has_empty_week() {
    let service = service();
    let now = Utc.with_ymd_and_hms(2022, 7, 6, 20, 0, 0).unwrap();
    let sessions = service.current_week(CohortId::generate(), &now).await.unwrap();
    assert!(sessions.is_empty());
}

#[test_log::test(tokio::test)]
async fn replace_overwrites_previous_schedule() {
    let service = service();
    let cohort = CohortId::generate();

    service
        .replace_schedule(cohort, &multi_subject_range(), &multi_subject_week())
        .await
        .unwrap();
    let replacement = buckets([(Weekday::Monday, item(Subject::Ela, "9:00", "9:45", DENVER))]);
    service
        .replace_schedule(cohort, &multi_subject_range(), &replacement)
        .await
        .unwrap();

    let records = service.records(cohort).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].subject, Subject::Ela);
}

#[test_log::test(tokio::test)]
async fn failed_compile_keeps_stored_records() {
    let service = service();
    let cohort = CohortId::generate();

    service
        .replace_schedule(cohort, &multi_subject_range(), &multi_subject_week())
        .await
        .unwrap();
    let broken = buckets([(Weekday::Monday, item(Subject::Ela, "10:00", "9:45", DENVER))]);
    let err = service
        .replace_schedule(cohort, &multi_subject_range(), &broken)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::RfcError(RfcError::NegativeDuration { .. })
    ));
    assert_eq!(service.records(cohort).await.unwrap().len(), 4);
}

#[test_log::test(tokio::test)]
async fn settings_drive_until_boundary() {
    let settings = Settings::from_builder(Config::builder().add_source(File::from_str(
        "[schedule]\nuntil_boundary_seconds = 59\n",
        FileFormat::Toml,
    )))
    .unwrap();
    let store = InMemoryRecurrenceStore::new();
    let service = CohortScheduleService::from_settings(store, &settings);
    assert_eq!(service.options().until_boundary_seconds, 59);

    let cohort = CohortId::generate();
    service
        .replace_schedule(cohort, &multi_subject_range(), &multi_subject_week())
        .await
        .unwrap();

    let records = service.records(cohort).await.unwrap();
    assert!(
        records
            .iter()
            .all(|r| r.recurrence_rule.ends_with("UNTIL=20221227T235959Z"))
    );
}

#[test_log::test(tokio::test)]
async fn records_written_directly_are_expanded() {
    let store = InMemoryRecurrenceStore::new();
    let cohort = CohortId::generate();
    let records = crate::fixtures::multi_subject_records();
    store
        .save_recurrence_records(cohort, records[..1].to_vec())
        .await
        .unwrap();

    let service = CohortScheduleService::new(store, CompileOptions::default());
    let now = Utc.with_ymd_and_hms(2022, 7, 6, 20, 0, 0).unwrap();
    let sessions = service.current_week(cohort, &now).await.unwrap();
    assert!(sessions.iter().all(|s| s.subject == Subject::General));
    assert_eq!(sessions.len(), 3);
}
