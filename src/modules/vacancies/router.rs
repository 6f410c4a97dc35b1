use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_vacancy, delete_vacancy, get_vacancies, get_vacancy, update_vacancy,
};

pub fn init_vacancies_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_vacancies).post(create_vacancy))
        .route(
            "/{id}",
            get(get_vacancy).patch(update_vacancy).delete(delete_vacancy),
        )
}
