use axum::extract::State;
use axum::response::Html;
use axum::Json;
use models::board::Board;

use crate::page;
use crate::state::ServerState;

pub async fn index(State(state): State<ServerState>) -> Html<String> {
    let board = state.board.load_board().await;
    Html(page::render_board(&board, &state.page))
}

pub async fn board_json(State(state): State<ServerState>) -> Json<Board> {
    Json(state.board.load_board().await)
}
