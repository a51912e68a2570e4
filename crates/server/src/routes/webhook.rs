use axum::{body::Bytes, extract::State, Json};
use common::types::Ack;
use models::{ModelError, WebhookUpdate};

use crate::errors::{ApiError, UPDATE_FAILED};
use crate::routes::json_body;
use crate::state::ServerState;

/// Incremental booking, e.g. from a form-submit script:
/// `{"date": "2025-11-21", "time": "19:00", "seats": 2}`.
/// Runs behind `require_webhook_secret`.
pub async fn receive(State(state): State<ServerState>, body: Bytes) -> Result<Json<Ack>, ApiError> {
    let payload = json_body(&body).ok_or_else(|| ApiError::BadRequest(ModelError::InvalidBody.to_string()))?;
    let update = WebhookUpdate::from_json(&payload).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    state
        .reservations
        .apply_webhook(&update)
        .await
        .map_err(|e| ApiError::from_service(UPDATE_FAILED, e))?;
    Ok(Json(Ack::ok()))
}
