use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::ServiceError;
use thiserror::Error;
use tracing::error;

pub const READ_FAILED: &str = "データの読み込みに失敗しました";
pub const SAVE_FAILED: &str = "保存に失敗しました";
pub const UPDATE_FAILED: &str = "更新に失敗しました";

/// Errors surfaced to API callers as `{error}` / `{error, detail}` JSON.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{0}")]
    BadRequest(String),
    #[error("{error}: {detail}")]
    Internal { error: &'static str, detail: String },
}

impl ApiError {
    /// Payload rejections become 400; anything else is a 500 labelled `error`.
    pub fn from_service(error: &'static str, e: ServiceError) -> Self {
        match e {
            ServiceError::Model(m) => Self::BadRequest(m.to_string()),
            other => Self::Internal { error, detail: other.detail() },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, ErrorBody::new("Unauthorized")),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::new(msg)),
            Self::Internal { error, detail } => {
                error!(%error, %detail, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::with_detail(error, detail))
            }
        };
        (status, Json(body)).into_response()
    }
}
