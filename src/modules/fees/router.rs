use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_fee_structure, delete_fee_structure, get_fee_structure, get_fee_structures,
    update_fee_structure,
};

/// Mounted at `/api/fee-structures`. The per-program lookup lives on the
/// programs router.
pub fn init_fees_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_fee_structures).post(create_fee_structure))
        .route(
            "/{id}",
            get(get_fee_structure)
                .patch(update_fee_structure)
                .delete(delete_fee_structure),
        )
}
