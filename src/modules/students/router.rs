use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_student, delete_student, get_student, get_student_payments, get_students,
    update_student,
};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_students).post(create_student))
        .route(
            "/{id}",
            get(get_student).patch(update_student).delete(delete_student),
        )
        .route("/{id}/payments", get(get_student_payments))
}
