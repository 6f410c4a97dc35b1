use axum::{Router, routing::get};

use crate::modules::fees::controller::get_program_fees;
use crate::state::AppState;

use super::controller::{
    create_department, create_faculty, create_program, delete_department, delete_faculty,
    delete_program, get_department, get_departments, get_faculties, get_faculty, get_program,
    get_programs,
};

pub fn init_faculties_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_faculties).post(create_faculty))
        .route("/{id}", get(get_faculty).delete(delete_faculty))
}

pub fn init_departments_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_departments).post(create_department))
        .route("/{id}", get(get_department).delete(delete_department))
}

pub fn init_programs_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_programs).post(create_program))
        .route("/{id}", get(get_program).delete(delete_program))
        .route("/{id}/fees", get(get_program_fees))
}
