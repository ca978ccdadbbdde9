use crate::api_docs::ApiDoc;
use crate::routes;
use crate::state::AppState;
use axum::Router;
use http::header;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{ServiceBuilderExt, propagate_header::PropagateHeaderLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub fn create_app(state: AppState, swagger_enabled: bool) -> Router {
    let mut router = Router::new()
        .merge(routes::health::create_route())
        .merge(routes::session::create_route())
        .merge(routes::admins::create_route())
        .merge(routes::students::create_route())
        .merge(routes::status::create_route());

    // Add Swagger UI
    if swagger_enabled {
        let swagger_ui =
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());
        router = router.merge(swagger_ui);
    }

    // Apply middleware
    let sensitive_headers: Arc<[_]> = vec![header::AUTHORIZATION, header::COOKIE].into();

    let middleware = ServiceBuilder::new()
        .layer(PropagateHeaderLayer::new(header::HeaderName::from_static(
            "x-request-id",
        )))
        .sensitive_request_headers(sensitive_headers.clone())
        .layer(TraceLayer::new_for_http())
        .sensitive_response_headers(sensitive_headers)
        .compression();

    router.with_state(state).layer(middleware)
}
