pub mod reservations;
pub mod admin;
pub mod webhook;
pub mod board;

use axum::{
    body::Bytes,
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::auth;
use crate::state::ServerState;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Request bodies are read by hand so the auth guards run before any
/// payload validation. An empty body reads as `{}`.
pub(crate) fn json_body(body: &Bytes) -> Option<serde_json::Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Some(serde_json::Value::Object(Default::default()));
    }
    serde_json::from_slice(body).ok()
}

/// Build the full application router: board page, read API, guarded write
/// API, and static files from `static_dir` for everything else.
pub fn build_router(state: ServerState, cors: CorsLayer, static_dir: &str) -> Router {
    let public = Router::new()
        .route("/", get(board::index))
        .route("/api/board", get(board::board_json))
        .route("/api/reservations", get(reservations::get_reservations))
        .route("/health", get(health));

    let admin_routes = Router::new()
        .route("/api/admin/update", post(admin::update))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin_password,
        ));

    let webhook_routes = Router::new()
        .route("/api/webhook", post(webhook::receive))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_webhook_secret,
        ));

    public
        .merge(admin_routes)
        .merge(webhook_routes)
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
