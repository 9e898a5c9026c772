//! Persistence seam for compiled recurrence records.

use std::collections::HashMap;
use std::future::Future;

use cadence_core::types::CohortId;
use tokio::sync::RwLock;

use crate::error::ServiceResult;
use crate::schedule::RecurrenceRecord;

/// Storage of recurrence records keyed by cohort.
pub trait RecurrenceStore: Send + Sync {
    /// ## Summary
    /// Replaces the cohort's whole record set.
    ///
    /// ## Errors
    /// Returns `ServiceError::StoreError` if the backend fails to persist.
    fn save_recurrence_records(
        &self,
        cohort: CohortId,
        records: Vec<RecurrenceRecord>,
    ) -> impl Future<Output = ServiceResult<()>> + Send;

    /// ## Summary
    /// Returns the cohort's records in saved order; empty for an unknown cohort.
    ///
    /// ## Errors
    /// Returns `ServiceError::StoreError` if the backend fails to read.
    fn get_recurrence_records(
        &self,
        cohort: CohortId,
    ) -> impl Future<Output = ServiceResult<Vec<RecurrenceRecord>>> + Send;
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct InMemoryRecurrenceStore {
    records: RwLock<HashMap<CohortId, Vec<RecurrenceRecord>>>,
}

impl InMemoryRecurrenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecurrenceStore for InMemoryRecurrenceStore {
    async fn save_recurrence_records(
        &self,
        cohort: CohortId,
        records: Vec<RecurrenceRecord>,
    ) -> ServiceResult<()> {
        tracing::trace!(%cohort, count = records.len(), "Saving recurrence records");
        self.records.write().await.insert(cohort, records);
        Ok(())
    }

    async fn get_recurrence_records(
        &self,
        cohort: CohortId,
    ) -> ServiceResult<Vec<RecurrenceRecord>> {
        Ok(self
            .records
            .read()
            .await
            .get(&cohort)
            .cloned()
            .unwrap_or_default())
    }
}
