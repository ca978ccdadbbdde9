use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;

use super::dto::{SessionResponse, SwitchAccountRequest};
use crate::blockchain::{format_address, parse_address};
use crate::error::SessionError;
use crate::roster::{ActionPhase, RosterService, StatusMessage};
use crate::session::SessionManager;
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/v1/session", get(get_session))
        .route("/api/v1/session/connect", post(connect_wallet))
        .route("/api/v1/session/account", post(switch_account))
}

fn session_response(session: &SessionManager) -> SessionResponse {
    let snapshot = session.snapshot();
    SessionResponse {
        connected_account: snapshot.connected_account.as_ref().map(format_address),
        wallet_present: session.wallet().is_some(),
        read_ready: snapshot.reader.is_some(),
        write_ready: snapshot.writer.is_some(),
    }
}

/// Current connection state
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses(
        (status = 200, description = "Session retrieved", body = SessionResponse)
    ),
    tag = "Session"
)]
pub async fn get_session(
    State(session): State<Arc<SessionManager>>,
) -> (StatusCode, Json<SessionResponse>) {
    (StatusCode::OK, Json(session_response(&session)))
}

/// Request account access from the wallet and rebuild the write binding
#[utoipa::path(
    post,
    path = "/api/v1/session/connect",
    responses(
        (status = 200, description = "Wallet connected", body = SessionResponse),
        (status = 502, description = "Wallet refused or binding failed"),
        (status = 503, description = "No wallet available")
    ),
    tag = "Session"
)]
pub async fn connect_wallet(
    State(session): State<Arc<SessionManager>>,
    State(roster): State<Arc<RosterService>>,
) -> Result<(StatusCode, Json<SessionResponse>), (StatusCode, String)> {
    match session.connect_write().await {
        Ok(_) => Ok((StatusCode::OK, Json(session_response(&session)))),
        Err(e @ SessionError::WalletUnavailable) => {
            roster.notify(StatusMessage::new(ActionPhase::Failed, e.to_string()));
            Err((StatusCode::SERVICE_UNAVAILABLE, e.to_string()))
        }
        Err(e) => Err((StatusCode::BAD_GATEWAY, e.to_string())),
    }
}

/// Switch the wallet's active account; the session follows asynchronously
#[utoipa::path(
    post,
    path = "/api/v1/session/account",
    request_body = SwitchAccountRequest,
    responses(
        (status = 202, description = "Account switch requested"),
        (status = 400, description = "Bad request"),
        (status = 503, description = "No wallet available")
    ),
    tag = "Session"
)]
pub async fn switch_account(
    State(session): State<Arc<SessionManager>>,
    Json(payload): Json<SwitchAccountRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    let wallet = session.wallet().ok_or_else(|| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            SessionError::WalletUnavailable.to_string(),
        )
    })?;

    let account = parse_address(&payload.address)
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("{e:#}")))?;

    wallet
        .select_account(account)
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Failed to switch account: {e:#}")))?;

    Ok(StatusCode::ACCEPTED)
}
