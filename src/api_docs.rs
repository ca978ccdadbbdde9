use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::route::health_check,
        crate::routes::session::route::get_session,
        crate::routes::session::route::connect_wallet,
        crate::routes::session::route::switch_account,
        crate::routes::admins::route::get_owner,
        crate::routes::admins::route::add_admin,
        crate::routes::admins::route::delete_admin,
        crate::routes::admins::route::check_admin,
        crate::routes::students::route::list_students,
        crate::routes::students::route::refresh_students,
        crate::routes::students::route::add_student,
        crate::routes::students::route::delete_student,
        crate::routes::status::route::get_status,
    ),
    components(
        schemas(
            crate::routes::action::ActionResponse,
            crate::routes::session::dto::SessionResponse,
            crate::routes::session::dto::SwitchAccountRequest,
            crate::routes::admins::dto::AdminRequest,
            crate::routes::admins::dto::AdminCheckResponse,
            crate::routes::admins::dto::OwnerResponse,
            crate::routes::students::dto::AddStudentRequest,
            crate::routes::students::dto::StudentResponse,
            crate::routes::students::dto::StudentListResponse,
            crate::roster::StatusMessage,
            crate::roster::ActionPhase,
        ),
    ),
    tags(
        (name = "Session", description = "Wallet connection"),
        (name = "Admins", description = "Owner-only admin management"),
        (name = "Students", description = "Admin-only roster management"),
        (name = "Status", description = "Status line of the last action"),
        (name = "health", description = "Health check endpoints")
    ),
)]
pub struct ApiDoc;
