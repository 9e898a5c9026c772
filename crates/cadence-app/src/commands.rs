//! Subcommand handlers.

use std::path::{Path, PathBuf};

use cadence_core::config::Settings;
use cadence_core::error::CoreResult;
use cadence_rfc::rfc::ical::expand::resolve_timezone;
use cadence_rfc::time::normalize_from_utc;
use cadence_service::cohort::CohortScheduleService;
use cadence_service::schedule::{DateRange, RecurrenceRecord, SessionInstance, WeekdayBuckets};
use cadence_service::store::RecurrenceStore;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::cli::{Cli, CohortArgs, Command, CompileArgs, WeekArgs};
use crate::error::{AppError, AppResult};
use crate::store::JsonFileRecurrenceStore;

/// Contents of a `compile --input` file.
///
/// Dates are either `YYYY-MM-DD` or RFC 3339 instants. Only the calendar date
/// is used, read in the instant's own offset.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileInput {
    #[serde(deserialize_with = "calendar_instant")]
    pub start_date: DateTime<FixedOffset>,
    #[serde(deserialize_with = "calendar_instant")]
    pub end_date: DateTime<FixedOffset>,
    #[serde(default)]
    pub schedules: WeekdayBuckets,
}

impl CompileInput {
    /// ## Summary
    /// Returns the validated date range of this input.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidInput` if the end date precedes the start date.
    pub fn range(&self) -> CoreResult<DateRange> {
        DateRange::from_instants(&self.start_date, &self.end_date)
    }
}

fn calendar_instant<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<DateTime<FixedOffset>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc().fixed_offset());
    }
    DateTime::parse_from_rfc3339(&raw).map_err(serde::de::Error::custom)
}

/// ## Summary
/// Runs the parsed command against the configured JSON store and prints the
/// result as JSON on stdout.
///
/// ## Errors
/// Returns any input, compilation, expansion or store error.
pub async fn run(cli: Cli, settings: &Settings) -> AppResult<()> {
    let store_path = cli
        .store
        .unwrap_or_else(|| PathBuf::from(&settings.store.path));
    tracing::debug!(store = %store_path.display(), "Opening record store");

    let service =
        CohortScheduleService::from_settings(JsonFileRecurrenceStore::new(store_path), settings);

    match cli.command {
        Command::Compile(args) => print_json(&compile(&service, &args).await?),
        Command::Week(args) => print_json(&week(&service, &args).await?),
        Command::Records(args) => print_json(&records(&service, &args).await?),
    }
}

/// ## Summary
/// Reads the input file, compiles it and replaces the cohort's records.
///
/// ## Errors
/// Returns `AppError::InputRead` or `AppError::InputParse` for a bad input
/// file, or any compilation or store error.
#[tracing::instrument(skip(service))]
pub async fn compile<S: RecurrenceStore>(
    service: &CohortScheduleService<S>,
    args: &CompileArgs,
) -> AppResult<Vec<RecurrenceRecord>> {
    let input = read_input(&args.input).await?;
    let range = input.range()?;
    let records = service
        .replace_schedule(args.cohort.cohort, &range, &input.schedules)
        .await?;

    if let Some(first) = records.first() {
        let time_zone = resolve_timezone(&first.time_zone)?;
        let start = normalize_from_utc(&utc_midnight(range.start()), &time_zone)?;
        let end = normalize_from_utc(&utc_midnight(range.end()), &time_zone)?;
        tracing::info!(
            %start,
            %end,
            %time_zone,
            records = records.len(),
            "Compiled cohort schedule"
        );
    } else {
        tracing::info!("Schedule input is empty; cohort records cleared");
    }

    Ok(records)
}

/// ## Summary
/// Expands the cohort's sessions for the week containing `--now`.
///
/// ## Errors
/// Returns any store or expansion error.
pub async fn week<S: RecurrenceStore>(
    service: &CohortScheduleService<S>,
    args: &WeekArgs,
) -> AppResult<Vec<SessionInstance>> {
    let now = args.now.unwrap_or_else(Utc::now);
    Ok(service.current_week(args.cohort.cohort, &now).await?)
}

/// ## Summary
/// Loads the cohort's stored records.
///
/// ## Errors
/// Returns any store error.
pub async fn records<S: RecurrenceStore>(
    service: &CohortScheduleService<S>,
    args: &CohortArgs,
) -> AppResult<Vec<RecurrenceRecord>> {
    Ok(service.records(args.cohort).await?)
}

fn utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

async fn read_input(path: &Path) -> AppResult<CompileInput> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| AppError::InputRead {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&raw).map_err(|source| AppError::InputParse {
        path: path.to_path_buf(),
        source,
    })
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
