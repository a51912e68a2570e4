use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use models::reservation::{apply_webhook, validate_overwrite};
use models::{ReservationStore, WebhookOutcome, WebhookUpdate};
use tracing::info;

use crate::errors::ServiceError;
use crate::reservations::ReservationRepository;
use crate::storage::json_file_store::JsonFileStore;

/// Reservation document kept in one JSON file (`reservations.json` by default).
pub struct FileReservationRepository {
    store: JsonFileStore,
}

impl FileReservationRepository {
    pub fn new<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { store: JsonFileStore::new(path) })
    }
}

#[async_trait]
impl ReservationRepository for FileReservationRepository {
    fn source_name(&self) -> String {
        self.store
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.store.path().display().to_string())
    }

    async fn read_raw(&self) -> Result<String, ServiceError> {
        self.store.read_raw().await
    }

    async fn load(&self) -> Result<ReservationStore, ServiceError> {
        self.store.read().await
    }

    async fn overwrite(&self, payload: &serde_json::Value) -> Result<(), ServiceError> {
        validate_overwrite(payload)?;
        self.store.write_pretty(payload).await?;
        info!(path = %self.store.path().display(), "reservations overwritten");
        Ok(())
    }

    async fn apply_webhook(&self, update: &WebhookUpdate) -> Result<WebhookOutcome, ServiceError> {
        let outcome = self
            .store
            .update(|doc: &mut serde_json::Value| {
                apply_webhook(doc, update).map_err(|e| ServiceError::Parse(e.to_string()))
            })
            .await?;
        info!(date = %update.date, time = %update.time, seats = update.seats, ?outcome, "webhook booking applied");
        Ok(outcome)
    }
}
