use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use campusdesk_core::AppError;
use campusdesk_models::StaffId;
use uuid::Uuid;

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    CreateStaffDto, PaginatedStaffResponse, Staff, StaffFilterParams, UpdateStaffDto,
};
use super::service::StaffService;

#[utoipa::path(
    post,
    path = "/api/staff",
    request_body = CreateStaffDto,
    responses(
        (status = 201, description = "Staff member created", body = Staff),
        (status = 400, description = "Malformed body or unknown institution, faculty or department"),
        (status = 409, description = "Employee id or user already taken"),
        (status = 422, description = "Validation error, or faculty/department outside the institution")
    ),
    tag = "Staff"
)]
pub async fn create_staff(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateStaffDto>,
) -> Result<(StatusCode, Json<Staff>), AppError> {
    let staff = StaffService::create_staff(&state.db, &state.cipher, dto).await?;
    Ok((StatusCode::CREATED, Json(staff)))
}

#[utoipa::path(
    get,
    path = "/api/staff",
    params(StaffFilterParams),
    responses(
        (status = 200, description = "Paginated list of staff members", body = PaginatedStaffResponse),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "Staff"
)]
pub async fn get_staff(
    State(state): State<AppState>,
    filters: Result<Query<StaffFilterParams>, QueryRejection>,
) -> Result<Json<PaginatedStaffResponse>, AppError> {
    let Query(filters) = filters
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e)))?;
    let staff = StaffService::get_staff(&state.db, &state.cipher, filters).await?;
    Ok(Json(staff))
}

#[utoipa::path(
    get,
    path = "/api/staff/{id}",
    params(("id" = Uuid, Path, description = "Staff member ID")),
    responses(
        (status = 200, description = "Staff member details", body = Staff),
        (status = 404, description = "Staff member not found")
    ),
    tag = "Staff"
)]
pub async fn get_staff_member(
    State(state): State<AppState>,
    Path(id): Path<StaffId>,
) -> Result<Json<Staff>, AppError> {
    let staff = StaffService::get_staff_member(&state.db, &state.cipher, id).await?;
    Ok(Json(staff))
}

#[utoipa::path(
    patch,
    path = "/api/staff/{id}",
    params(("id" = Uuid, Path, description = "Staff member ID")),
    request_body = UpdateStaffDto,
    responses(
        (status = 200, description = "Staff member updated", body = Staff),
        (status = 404, description = "Staff member not found"),
        (status = 409, description = "Employee id or user already taken"),
        (status = 422, description = "Validation error, or faculty/department outside the institution")
    ),
    tag = "Staff"
)]
pub async fn update_staff(
    State(state): State<AppState>,
    Path(id): Path<StaffId>,
    ValidatedJson(dto): ValidatedJson<UpdateStaffDto>,
) -> Result<Json<Staff>, AppError> {
    let staff = StaffService::update_staff(&state.db, &state.cipher, id, dto).await?;
    Ok(Json(staff))
}

#[utoipa::path(
    delete,
    path = "/api/staff/{id}",
    params(("id" = Uuid, Path, description = "Staff member ID")),
    responses(
        (status = 204, description = "Staff member deleted"),
        (status = 404, description = "Staff member not found")
    ),
    tag = "Staff"
)]
pub async fn delete_staff(
    State(state): State<AppState>,
    Path(id): Path<StaffId>,
) -> Result<StatusCode, AppError> {
    StaffService::delete_staff(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
