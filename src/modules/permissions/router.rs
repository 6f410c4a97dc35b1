use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::get_permissions;

pub fn init_permissions_router() -> Router<AppState> {
    Router::new().route("/", get(get_permissions))
}
