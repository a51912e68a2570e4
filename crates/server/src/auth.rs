//! Shared-secret guards for the write endpoints.

use axum::extract::{Query, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use serde::Deserialize;
use tracing::warn;

use crate::errors::ApiError;
use crate::state::ServerState;

pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";
pub const WEBHOOK_SECRET_HEADER: &str = "x-webhook-secret";

#[derive(Debug, Deserialize)]
struct SecretQuery {
    secret: Option<String>,
}

fn header_value(req: &Request, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Middleware: `x-admin-password` must equal the configured admin password.
pub async fn require_admin_password(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let supplied = header_value(&req, ADMIN_PASSWORD_HEADER).unwrap_or_default();
    if supplied != state.auth.admin_password {
        warn!(path = %req.uri().path(), "admin password mismatch");
        return Err(ApiError::Unauthorized);
    }
    Ok(next.run(req).await)
}

/// Middleware: webhook secret from `x-webhook-secret`, falling back to the
/// `secret` query parameter when the header is absent or empty.
pub async fn require_webhook_secret(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let supplied = header_value(&req, WEBHOOK_SECRET_HEADER)
        .or_else(|| {
            Query::<SecretQuery>::try_from_uri(req.uri())
                .ok()
                .and_then(|Query(q)| q.secret)
        })
        .unwrap_or_default();
    if supplied != state.auth.webhook_secret {
        warn!(path = %req.uri().path(), "webhook secret mismatch");
        return Err(ApiError::Unauthorized);
    }
    Ok(next.run(req).await)
}
