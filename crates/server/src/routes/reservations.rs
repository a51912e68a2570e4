use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::errors::{ApiError, READ_FAILED};
use crate::state::ServerState;

/// Stored document as-is, never reparsed.
pub async fn get_reservations(State(state): State<ServerState>) -> Result<impl IntoResponse, ApiError> {
    let raw = state
        .reservations
        .read_raw()
        .await
        .map_err(|e| ApiError::from_service(READ_FAILED, e))?;
    Ok(([(header::CONTENT_TYPE, "application/json; charset=utf-8")], raw))
}
