use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use campusdesk_core::AppError;
use campusdesk_models::VacancyId;
use uuid::Uuid;

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    CreateVacancyDto, PaginatedVacanciesResponse, UpdateVacancyDto, Vacancy, VacancyFilterParams,
};
use super::service::VacancyService;

#[utoipa::path(
    post,
    path = "/api/vacancies",
    request_body = CreateVacancyDto,
    responses(
        (status = 201, description = "Vacancy created", body = Vacancy),
        (status = 400, description = "Malformed body or unknown institution, faculty or department"),
        (status = 422, description = "Validation error, or faculty/department outside the institution")
    ),
    tag = "Vacancies"
)]
pub async fn create_vacancy(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateVacancyDto>,
) -> Result<(StatusCode, Json<Vacancy>), AppError> {
    let vacancy = VacancyService::create_vacancy(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(vacancy)))
}

#[utoipa::path(
    get,
    path = "/api/vacancies",
    params(VacancyFilterParams),
    responses(
        (status = 200, description = "Paginated list of vacancies", body = PaginatedVacanciesResponse),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "Vacancies"
)]
pub async fn get_vacancies(
    State(state): State<AppState>,
    filters: Result<Query<VacancyFilterParams>, QueryRejection>,
) -> Result<Json<PaginatedVacanciesResponse>, AppError> {
    let Query(filters) = filters
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e)))?;
    let vacancies = VacancyService::get_vacancies(&state.db, filters).await?;
    Ok(Json(vacancies))
}

#[utoipa::path(
    get,
    path = "/api/vacancies/{id}",
    params(("id" = Uuid, Path, description = "Vacancy ID")),
    responses(
        (status = 200, description = "Vacancy details", body = Vacancy),
        (status = 404, description = "Vacancy not found")
    ),
    tag = "Vacancies"
)]
pub async fn get_vacancy(
    State(state): State<AppState>,
    Path(id): Path<VacancyId>,
) -> Result<Json<Vacancy>, AppError> {
    let vacancy = VacancyService::get_vacancy(&state.db, id).await?;
    Ok(Json(vacancy))
}

#[utoipa::path(
    patch,
    path = "/api/vacancies/{id}",
    params(("id" = Uuid, Path, description = "Vacancy ID")),
    request_body = UpdateVacancyDto,
    responses(
        (status = 200, description = "Vacancy updated", body = Vacancy),
        (status = 404, description = "Vacancy not found"),
        (status = 422, description = "Validation error, or faculty/department outside the institution")
    ),
    tag = "Vacancies"
)]
pub async fn update_vacancy(
    State(state): State<AppState>,
    Path(id): Path<VacancyId>,
    ValidatedJson(dto): ValidatedJson<UpdateVacancyDto>,
) -> Result<Json<Vacancy>, AppError> {
    let vacancy = VacancyService::update_vacancy(&state.db, id, dto).await?;
    Ok(Json(vacancy))
}

#[utoipa::path(
    delete,
    path = "/api/vacancies/{id}",
    params(("id" = Uuid, Path, description = "Vacancy ID")),
    responses(
        (status = 204, description = "Vacancy deleted"),
        (status = 404, description = "Vacancy not found")
    ),
    tag = "Vacancies"
)]
pub async fn delete_vacancy(
    State(state): State<AppState>,
    Path(id): Path<VacancyId>,
) -> Result<StatusCode, AppError> {
    VacancyService::delete_vacancy(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
