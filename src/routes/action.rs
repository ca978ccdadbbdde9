use crate::roster::{Action, ActionOutcome, ActionPhase, Rejection};
use axum::{Json, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;

/// Final state of a mutating request, mirrored from the status line
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionResponse {
    pub phase: ActionPhase,
    pub message: String,
    pub tx_hash: Option<String>,
}

pub fn action_response(action: Action, outcome: ActionOutcome) -> (StatusCode, Json<ActionResponse>) {
    let status = match &outcome {
        ActionOutcome::Succeeded(_) => StatusCode::OK,
        ActionOutcome::Rejected(Rejection::InvalidAddress(_)) => StatusCode::BAD_REQUEST,
        ActionOutcome::Rejected(_) => StatusCode::FORBIDDEN,
        ActionOutcome::Failed => StatusCode::BAD_GATEWAY,
    };

    let tx_hash = match &outcome {
        ActionOutcome::Succeeded(tx) => Some(format!("{tx:?}")),
        _ => None,
    };

    let body = ActionResponse {
        phase: outcome.phase(),
        message: outcome.status(action).text,
        tx_hash,
    };

    (status, Json(body))
}
