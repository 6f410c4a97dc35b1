use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use campusdesk_core::AppError;
use campusdesk_models::{FeeStructureId, ProgramId};
use uuid::Uuid;

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    CreateFeeStructureDto, FeeStructure, FeeStructureFilterParams,
    PaginatedFeeStructuresResponse, UpdateFeeStructureDto,
};
use super::service::FeeStructureService;

#[utoipa::path(
    post,
    path = "/api/fee-structures",
    request_body = CreateFeeStructureDto,
    responses(
        (status = 201, description = "Fee structure created", body = FeeStructure),
        (status = 400, description = "Malformed body or unknown program"),
        (status = 409, description = "The program already has a fee structure"),
        (status = 422, description = "Validation error")
    ),
    tag = "Fees"
)]
pub async fn create_fee_structure(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateFeeStructureDto>,
) -> Result<(StatusCode, Json<FeeStructure>), AppError> {
    let fee_structure = FeeStructureService::create_fee_structure(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(fee_structure)))
}

#[utoipa::path(
    get,
    path = "/api/fee-structures",
    params(FeeStructureFilterParams),
    responses(
        (status = 200, description = "Paginated list of fee structures", body = PaginatedFeeStructuresResponse),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "Fees"
)]
pub async fn get_fee_structures(
    State(state): State<AppState>,
    filters: Result<Query<FeeStructureFilterParams>, QueryRejection>,
) -> Result<Json<PaginatedFeeStructuresResponse>, AppError> {
    let Query(filters) = filters
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e)))?;
    let fee_structures = FeeStructureService::get_fee_structures(&state.db, filters).await?;
    Ok(Json(fee_structures))
}

#[utoipa::path(
    get,
    path = "/api/fee-structures/{id}",
    params(("id" = Uuid, Path, description = "Fee structure ID")),
    responses(
        (status = 200, description = "Fee structure details", body = FeeStructure),
        (status = 404, description = "Fee structure not found")
    ),
    tag = "Fees"
)]
pub async fn get_fee_structure(
    State(state): State<AppState>,
    Path(id): Path<FeeStructureId>,
) -> Result<Json<FeeStructure>, AppError> {
    let fee_structure = FeeStructureService::get_fee_structure(&state.db, id).await?;
    Ok(Json(fee_structure))
}

#[utoipa::path(
    get,
    path = "/api/programs/{id}/fees",
    params(("id" = Uuid, Path, description = "Program ID")),
    responses(
        (status = 200, description = "Fee structure of the program", body = FeeStructure),
        (status = 404, description = "The program has no fee structure")
    ),
    tag = "Fees"
)]
pub async fn get_program_fees(
    State(state): State<AppState>,
    Path(program_id): Path<ProgramId>,
) -> Result<Json<FeeStructure>, AppError> {
    let fee_structure = FeeStructureService::get_by_program(&state.db, program_id).await?;
    Ok(Json(fee_structure))
}

#[utoipa::path(
    patch,
    path = "/api/fee-structures/{id}",
    params(("id" = Uuid, Path, description = "Fee structure ID")),
    request_body = UpdateFeeStructureDto,
    responses(
        (status = 200, description = "Fee structure updated", body = FeeStructure),
        (status = 404, description = "Fee structure not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Fees"
)]
pub async fn update_fee_structure(
    State(state): State<AppState>,
    Path(id): Path<FeeStructureId>,
    ValidatedJson(dto): ValidatedJson<UpdateFeeStructureDto>,
) -> Result<Json<FeeStructure>, AppError> {
    let fee_structure = FeeStructureService::update_fee_structure(&state.db, id, dto).await?;
    Ok(Json(fee_structure))
}

#[utoipa::path(
    delete,
    path = "/api/fee-structures/{id}",
    params(("id" = Uuid, Path, description = "Fee structure ID")),
    responses(
        (status = 204, description = "Fee structure deleted"),
        (status = 404, description = "Fee structure not found")
    ),
    tag = "Fees"
)]
pub async fn delete_fee_structure(
    State(state): State<AppState>,
    Path(id): Path<FeeStructureId>,
) -> Result<StatusCode, AppError> {
    FeeStructureService::delete_fee_structure(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
