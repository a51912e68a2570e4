use axum::{body::Bytes, extract::State, Json};
use common::types::Ack;
use models::ModelError;

use crate::errors::{ApiError, SAVE_FAILED};
use crate::routes::json_body;
use crate::state::ServerState;

/// Full overwrite of the reservation file. Runs behind `require_admin_password`.
pub async fn update(State(state): State<ServerState>, body: Bytes) -> Result<Json<Ack>, ApiError> {
    let payload = json_body(&body).ok_or_else(|| ApiError::BadRequest(ModelError::InvalidPayload.to_string()))?;
    state
        .reservations
        .overwrite(&payload)
        .await
        .map_err(|e| ApiError::from_service(SAVE_FAILED, e))?;
    Ok(Json(Ack::ok()))
}
