use axum::Json;
use campusdesk_core::permissions::{self, PermissionDef};

/// Permission codenames declared by the schema, for an external authoriser.
#[utoipa::path(
    get,
    path = "/api/permissions",
    responses(
        (status = 200, description = "Declared permissions", body = [PermissionDef])
    ),
    tag = "Permissions"
)]
pub async fn get_permissions() -> Json<&'static [PermissionDef]> {
    Json(permissions::ALL)
}
