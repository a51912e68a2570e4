use async_trait::async_trait;
use models::{ReservationStore, WebhookOutcome, WebhookUpdate};

use crate::errors::ServiceError;

/// Trait abstraction for reservation storage.
/// The shipped implementation is a single JSON file; tests may swap in others.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Short label of the backing source, shown on the board.
    fn source_name(&self) -> String;

    /// Stored document verbatim, without reparsing.
    async fn read_raw(&self) -> Result<String, ServiceError>;

    async fn load(&self) -> Result<ReservationStore, ServiceError>;

    /// Replace the whole document. The payload must be an object with `days`;
    /// nothing deeper is checked and it is persisted as given.
    async fn overwrite(&self, payload: &serde_json::Value) -> Result<(), ServiceError>;

    /// Merge a webhook booking into the stored document.
    async fn apply_webhook(&self, update: &WebhookUpdate) -> Result<WebhookOutcome, ServiceError>;
}
