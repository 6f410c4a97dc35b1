use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use campusdesk_core::AppError;
use campusdesk_models::FacilityId;
use uuid::Uuid;

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    CreateFacilityDto, Facility, FacilityFilterParams, PaginatedFacilitiesResponse,
    UpdateFacilityDto,
};
use super::service::FacilityService;

#[utoipa::path(
    post,
    path = "/api/facilities",
    request_body = CreateFacilityDto,
    responses(
        (status = 201, description = "Facility created", body = Facility),
        (status = 400, description = "Malformed body or unknown institution"),
        (status = 409, description = "The institution already has a facility with this name"),
        (status = 422, description = "Validation error")
    ),
    tag = "Facilities"
)]
pub async fn create_facility(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateFacilityDto>,
) -> Result<(StatusCode, Json<Facility>), AppError> {
    let facility = FacilityService::create_facility(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(facility)))
}

#[utoipa::path(
    get,
    path = "/api/facilities",
    params(FacilityFilterParams),
    responses(
        (status = 200, description = "Paginated list of facilities", body = PaginatedFacilitiesResponse),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "Facilities"
)]
pub async fn get_facilities(
    State(state): State<AppState>,
    filters: Result<Query<FacilityFilterParams>, QueryRejection>,
) -> Result<Json<PaginatedFacilitiesResponse>, AppError> {
    let Query(filters) = filters
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e)))?;
    let facilities = FacilityService::get_facilities(&state.db, filters).await?;
    Ok(Json(facilities))
}

#[utoipa::path(
    get,
    path = "/api/facilities/{id}",
    params(("id" = Uuid, Path, description = "Facility ID")),
    responses(
        (status = 200, description = "Facility details", body = Facility),
        (status = 404, description = "Facility not found")
    ),
    tag = "Facilities"
)]
pub async fn get_facility(
    State(state): State<AppState>,
    Path(id): Path<FacilityId>,
) -> Result<Json<Facility>, AppError> {
    let facility = FacilityService::get_facility(&state.db, id).await?;
    Ok(Json(facility))
}

#[utoipa::path(
    patch,
    path = "/api/facilities/{id}",
    params(("id" = Uuid, Path, description = "Facility ID")),
    request_body = UpdateFacilityDto,
    responses(
        (status = 200, description = "Facility updated", body = Facility),
        (status = 404, description = "Facility not found"),
        (status = 409, description = "The institution already has a facility with this name"),
        (status = 422, description = "Validation error")
    ),
    tag = "Facilities"
)]
pub async fn update_facility(
    State(state): State<AppState>,
    Path(id): Path<FacilityId>,
    ValidatedJson(dto): ValidatedJson<UpdateFacilityDto>,
) -> Result<Json<Facility>, AppError> {
    let facility = FacilityService::update_facility(&state.db, id, dto).await?;
    Ok(Json(facility))
}

#[utoipa::path(
    delete,
    path = "/api/facilities/{id}",
    params(("id" = Uuid, Path, description = "Facility ID")),
    responses(
        (status = 204, description = "Facility deleted"),
        (status = 404, description = "Facility not found")
    ),
    tag = "Facilities"
)]
pub async fn delete_facility(
    State(state): State<AppState>,
    Path(id): Path<FacilityId>,
) -> Result<StatusCode, AppError> {
    FacilityService::delete_facility(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
