use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_staff, delete_staff, get_staff, get_staff_member, update_staff};

pub fn init_staff_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_staff).post(create_staff))
        .route(
            "/{id}",
            get(get_staff_member).patch(update_staff).delete(delete_staff),
        )
}
