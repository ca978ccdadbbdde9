use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;

use super::dto::{AdminCheckResponse, AdminRequest, OwnerResponse};
use crate::blockchain::{format_address, parse_address};
use crate::roster::{Action, RosterService};
use crate::routes::action::{ActionResponse, action_response};
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/v1/owner", get(get_owner))
        .route("/api/v1/admins", post(add_admin).delete(delete_admin))
        .route("/api/v1/admins/check", post(check_admin))
}

/// Contract owner, the only account allowed to manage admins
#[utoipa::path(
    get,
    path = "/api/v1/owner",
    responses(
        (status = 200, description = "Owner retrieved", body = OwnerResponse)
    ),
    tag = "Admins"
)]
pub async fn get_owner(State(roster): State<Arc<RosterService>>) -> Json<OwnerResponse> {
    let owner = roster.get_owner().await;
    Json(OwnerResponse {
        owner: owner.as_ref().map(format_address),
    })
}

/// Grant admin rights (owner only)
#[utoipa::path(
    post,
    path = "/api/v1/admins",
    request_body = AdminRequest,
    responses(
        (status = 200, description = "Admin added", body = ActionResponse),
        (status = 400, description = "Invalid address", body = ActionResponse),
        (status = 403, description = "Not owner or already admin", body = ActionResponse),
        (status = 502, description = "Transaction failed", body = ActionResponse)
    ),
    tag = "Admins"
)]
pub async fn add_admin(
    State(roster): State<Arc<RosterService>>,
    Json(payload): Json<AdminRequest>,
) -> (StatusCode, Json<ActionResponse>) {
    let outcome = roster.add_admin(&payload.address).await;
    action_response(Action::AddAdmin, outcome)
}

/// Revoke admin rights (owner only, never the owner itself)
#[utoipa::path(
    delete,
    path = "/api/v1/admins",
    request_body = AdminRequest,
    responses(
        (status = 200, description = "Admin deleted", body = ActionResponse),
        (status = 400, description = "Invalid address", body = ActionResponse),
        (status = 403, description = "Not owner, not admin or owner removal", body = ActionResponse),
        (status = 502, description = "Transaction failed", body = ActionResponse)
    ),
    tag = "Admins"
)]
pub async fn delete_admin(
    State(roster): State<Arc<RosterService>>,
    Json(payload): Json<AdminRequest>,
) -> (StatusCode, Json<ActionResponse>) {
    let outcome = roster.delete_admin(&payload.address).await;
    action_response(Action::DeleteAdmin, outcome)
}

/// Check if an address is an admin
#[utoipa::path(
    post,
    path = "/api/v1/admins/check",
    request_body = AdminRequest,
    responses(
        (status = 200, description = "Admin check completed", body = AdminCheckResponse),
        (status = 400, description = "Bad request")
    ),
    tag = "Admins"
)]
pub async fn check_admin(
    State(roster): State<Arc<RosterService>>,
    Json(payload): Json<AdminRequest>,
) -> Result<(StatusCode, Json<AdminCheckResponse>), (StatusCode, String)> {
    let address = parse_address(&payload.address)
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("{e:#}")))?;

    let response = AdminCheckResponse {
        address: format_address(&address),
        is_admin: roster.is_admin(address).await,
    };

    Ok((StatusCode::OK, Json(response)))
}
