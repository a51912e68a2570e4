use std::sync::Arc;

use configs::{AuthConfig, PageConfig};
use service::board::BoardService;
use service::reservations::ReservationRepository;

/// Shared handles every route can reach.
#[derive(Clone)]
pub struct ServerState {
    pub reservations: Arc<dyn ReservationRepository>,
    pub board: Arc<BoardService>,
    pub auth: Arc<AuthConfig>,
    pub page: Arc<PageConfig>,
}
