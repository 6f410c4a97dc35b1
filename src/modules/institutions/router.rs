use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_institution, delete_institution, get_institution, get_institution_facilities,
    get_institution_staff, get_institution_students, get_institution_vacancies,
    get_institutions, update_institution,
};

pub fn init_institutions_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_institutions).post(create_institution))
        .route(
            "/{id}",
            get(get_institution)
                .patch(update_institution)
                .delete(delete_institution),
        )
        .route("/{id}/facilities", get(get_institution_facilities))
        .route("/{id}/students", get(get_institution_students))
        .route("/{id}/staff", get(get_institution_staff))
        .route("/{id}/vacancies", get(get_institution_vacancies))
}
