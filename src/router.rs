use crate::docs::ApiDoc;
use crate::modules::facilities::init_facilities_router;
use crate::modules::faculties::{
    init_departments_router, init_faculties_router, init_programs_router,
};
use crate::modules::fees::init_fees_router;
use crate::modules::institutions::init_institutions_router;
use crate::modules::payments::init_payments_router;
use crate::modules::permissions::init_permissions_router;
use crate::modules::staff::init_staff_router;
use crate::modules::students::init_students_router;
use crate::modules::vacancies::init_vacancies_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use campusdesk_observability::{logging_middleware, metrics_middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/institutions", init_institutions_router())
                .nest("/facilities", init_facilities_router())
                .nest("/faculties", init_faculties_router())
                .nest("/departments", init_departments_router())
                .nest("/programs", init_programs_router())
                .nest("/students", init_students_router())
                .nest("/fee-structures", init_fees_router())
                .nest("/payments", init_payments_router())
                .nest("/staff", init_staff_router())
                .nest("/vacancies", init_vacancies_router())
                .nest("/permissions", init_permissions_router()),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
