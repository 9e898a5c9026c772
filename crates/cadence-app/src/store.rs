//! Recurrence store backed by a single JSON file.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use cadence_core::types::CohortId;
use cadence_service::error::{ServiceError, ServiceResult};
use cadence_service::schedule::RecurrenceRecord;
use cadence_service::store::RecurrenceStore;
use tokio::sync::Mutex;

type StoreContents = BTreeMap<CohortId, Vec<RecurrenceRecord>>;

/// Stores every cohort's records in one JSON object keyed by cohort id.
///
/// Writes go to a sibling temp file that is then renamed over the store.
#[derive(Debug)]
pub struct JsonFileRecurrenceStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileRecurrenceStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> ServiceResult<StoreContents> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Store file absent, starting empty");
                return Ok(StoreContents::new());
            }
            Err(err) => return Err(self.store_error("read", &err)),
        };

        serde_json::from_slice(&bytes).map_err(|err| self.store_error("parse", &err))
    }

    async fn persist(&self, contents: &StoreContents) -> ServiceResult<()> {
        let json =
            serde_json::to_vec_pretty(contents).map_err(|err| self.store_error("encode", &err))?;

        let mut temp_name = self.path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        tokio::fs::write(&temp_path, json)
            .await
            .map_err(|err| self.store_error("write", &err))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|err| self.store_error("replace", &err))
    }

    fn store_error(&self, action: &str, err: &dyn std::error::Error) -> ServiceError {
        tracing::error!(
            path = %self.path.display(),
            action,
            error = %err,
            "Store file operation failed"
        );
        ServiceError::StoreError(format!("failed to {action} {}: {err}", self.path.display()))
    }
}

impl RecurrenceStore for JsonFileRecurrenceStore {
    async fn save_recurrence_records(
        &self,
        cohort: CohortId,
        records: Vec<RecurrenceRecord>,
    ) -> ServiceResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut contents = self.load().await?;
        tracing::debug!(%cohort, count = records.len(), "Writing cohort records");
        contents.insert(cohort, records);
        self.persist(&contents).await
    }

    async fn get_recurrence_records(
        &self,
        cohort: CohortId,
    ) -> ServiceResult<Vec<RecurrenceRecord>> {
        let mut contents = self.load().await?;
        Ok(contents.remove(&cohort).unwrap_or_default())
    }
}
