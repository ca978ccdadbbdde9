use axum::{Json, Router, extract::State, routing::get};
use std::sync::Arc;

use crate::roster::{RosterService, StatusMessage};
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new().route("/api/v1/status", get(get_status))
}

/// The single status line of the last action
#[utoipa::path(
    get,
    path = "/api/v1/status",
    responses(
        (status = 200, description = "Current status", body = StatusMessage)
    ),
    tag = "Status"
)]
pub async fn get_status(State(roster): State<Arc<RosterService>>) -> Json<StatusMessage> {
    Json(roster.status())
}
