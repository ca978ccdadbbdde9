use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use std::sync::Arc;

use super::dto::{AddStudentRequest, StudentListResponse};
use crate::roster::{Action, RosterService};
use crate::routes::action::{ActionResponse, action_response};
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api/v1/students", get(list_students).post(add_student))
        .route("/api/v1/students/refresh", post(refresh_students))
        .route("/api/v1/students/{position}", delete(delete_student))
}

/// Last fetched roster, without touching the contract
#[utoipa::path(
    get,
    path = "/api/v1/students",
    responses(
        (status = 200, description = "Roster snapshot", body = StudentListResponse)
    ),
    tag = "Students"
)]
pub async fn list_students(State(roster): State<Arc<RosterService>>) -> Json<StudentListResponse> {
    Json(StudentListResponse::from_roster(
        &roster.students(),
        roster.is_fresh(),
    ))
}

/// Re-read the whole roster from the contract
#[utoipa::path(
    post,
    path = "/api/v1/students/refresh",
    responses(
        (status = 200, description = "Roster after refresh", body = StudentListResponse)
    ),
    tag = "Students"
)]
pub async fn refresh_students(
    State(roster): State<Arc<RosterService>>,
) -> Json<StudentListResponse> {
    roster.fetch_students().await;
    Json(StudentListResponse::from_roster(
        &roster.students(),
        roster.is_fresh(),
    ))
}

/// Add a student (admins only)
#[utoipa::path(
    post,
    path = "/api/v1/students",
    request_body = AddStudentRequest,
    responses(
        (status = 200, description = "Student added", body = ActionResponse),
        (status = 403, description = "Not admin", body = ActionResponse),
        (status = 502, description = "Transaction failed", body = ActionResponse)
    ),
    tag = "Students"
)]
pub async fn add_student(
    State(roster): State<Arc<RosterService>>,
    Json(payload): Json<AddStudentRequest>,
) -> (StatusCode, Json<ActionResponse>) {
    let outcome = roster.add_student(&payload.name, &payload.enrollment).await;
    action_response(Action::AddStudent, outcome)
}

/// Delete the student at a roster position (admins only)
#[utoipa::path(
    delete,
    path = "/api/v1/students/{position}",
    params(
        ("position" = u64, Path, description = "1-based roster position")
    ),
    responses(
        (status = 200, description = "Student deleted", body = ActionResponse),
        (status = 403, description = "Not admin", body = ActionResponse),
        (status = 502, description = "Transaction failed", body = ActionResponse)
    ),
    tag = "Students"
)]
pub async fn delete_student(
    State(roster): State<Arc<RosterService>>,
    Path(position): Path<u64>,
) -> (StatusCode, Json<ActionResponse>) {
    let outcome = roster.delete_student(position).await;
    action_response(Action::DeleteStudent, outcome)
}
