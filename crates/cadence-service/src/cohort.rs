//! Cohort-level orchestration over a [`RecurrenceStore`].

use cadence_core::config::Settings;
use cadence_core::types::CohortId;
use chrono::{DateTime, Utc};

use crate::error::ServiceResult;
use crate::schedule::{
    CompileOptions, DateRange, RecurrenceRecord, SessionInstance, WeekdayBuckets,
    compile_from_buckets, expand_current_week,
};
use crate::store::RecurrenceStore;

/// Compiles and expands cohort schedules against an injected store.
#[derive(Debug)]
pub struct CohortScheduleService<S> {
    store: S,
    options: CompileOptions,
}

impl<S: RecurrenceStore> CohortScheduleService<S> {
    #[must_use]
    pub const fn new(store: S, options: CompileOptions) -> Self {
        Self { store, options }
    }

    /// Builds a service using the schedule section of `settings`.
    #[must_use]
    pub fn from_settings(store: S, settings: &Settings) -> Self {
        Self::new(store, CompileOptions::from(&settings.schedule))
    }

    #[must_use]
    pub const fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// ## Summary
    /// Compiles `buckets` over `range` and replaces the cohort's stored records.
    ///
    /// Nothing is saved when compilation fails.
    ///
    /// ## Errors
    /// Returns any compilation error, or `ServiceError::StoreError` if saving fails.
    #[tracing::instrument(skip(self, buckets), fields(%cohort))]
    pub async fn replace_schedule(
        &self,
        cohort: CohortId,
        range: &DateRange,
        buckets: &WeekdayBuckets,
    ) -> ServiceResult<Vec<RecurrenceRecord>> {
        let records = compile_from_buckets(range, buckets, &self.options)?;
        self.store
            .save_recurrence_records(cohort, records.clone())
            .await?;

        tracing::info!(records = records.len(), "Replaced cohort schedule");

        Ok(records)
    }

    /// ## Summary
    /// Loads the cohort's records and expands the week containing `now`.
    ///
    /// ## Errors
    /// Returns `ServiceError::StoreError` if loading fails, or any expansion error.
    #[tracing::instrument(skip(self), fields(%cohort))]
    pub async fn current_week(
        &self,
        cohort: CohortId,
        now: &DateTime<Utc>,
    ) -> ServiceResult<Vec<SessionInstance>> {
        let records = self.store.get_recurrence_records(cohort).await?;
        expand_current_week(&records, now)
    }

    /// ## Summary
    /// Returns the cohort's stored records.
    ///
    /// ## Errors
    /// Returns `ServiceError::StoreError` if loading fails.
    pub async fn records(&self, cohort: CohortId) -> ServiceResult<Vec<RecurrenceRecord>> {
        self.store.get_recurrence_records(cohort).await
    }
}
