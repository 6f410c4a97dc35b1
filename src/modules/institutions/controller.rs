use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use campusdesk_core::AppError;
use campusdesk_models::InstitutionId;
use uuid::Uuid;

use crate::modules::facilities::{
    FacilityFilterParams, PaginatedFacilitiesResponse, service::FacilityService,
};
use crate::modules::staff::{PaginatedStaffResponse, StaffFilterParams, service::StaffService};
use crate::modules::students::{
    PaginatedStudentsResponse, StudentFilterParams, service::StudentService,
};
use crate::modules::vacancies::{
    PaginatedVacanciesResponse, VacancyFilterParams, service::VacancyService,
};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    CreateInstitutionDto, Institution, InstitutionFilterParams, PaginatedInstitutionsResponse,
    UpdateInstitutionDto,
};
use super::service::InstitutionService;

fn query_rejection(e: QueryRejection) -> AppError {
    AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e))
}

#[utoipa::path(
    post,
    path = "/api/institutions",
    request_body = CreateInstitutionDto,
    responses(
        (status = 201, description = "Institution created", body = Institution),
        (status = 400, description = "Malformed body"),
        (status = 409, description = "An institution with this name already exists"),
        (status = 422, description = "Validation error")
    ),
    tag = "Institutions"
)]
pub async fn create_institution(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateInstitutionDto>,
) -> Result<(StatusCode, Json<Institution>), AppError> {
    let institution = InstitutionService::create_institution(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(institution)))
}

#[utoipa::path(
    get,
    path = "/api/institutions",
    params(InstitutionFilterParams),
    responses(
        (status = 200, description = "Paginated list of institutions", body = PaginatedInstitutionsResponse),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "Institutions"
)]
pub async fn get_institutions(
    State(state): State<AppState>,
    filters: Result<Query<InstitutionFilterParams>, QueryRejection>,
) -> Result<Json<PaginatedInstitutionsResponse>, AppError> {
    let Query(filters) = filters.map_err(query_rejection)?;
    let institutions = InstitutionService::get_institutions(&state.db, filters).await?;
    Ok(Json(institutions))
}

#[utoipa::path(
    get,
    path = "/api/institutions/{id}",
    params(("id" = Uuid, Path, description = "Institution ID")),
    responses(
        (status = 200, description = "Institution details", body = Institution),
        (status = 404, description = "Institution not found")
    ),
    tag = "Institutions"
)]
pub async fn get_institution(
    State(state): State<AppState>,
    Path(id): Path<InstitutionId>,
) -> Result<Json<Institution>, AppError> {
    let institution = InstitutionService::get_institution(&state.db, id).await?;
    Ok(Json(institution))
}

#[utoipa::path(
    patch,
    path = "/api/institutions/{id}",
    params(("id" = Uuid, Path, description = "Institution ID")),
    request_body = UpdateInstitutionDto,
    responses(
        (status = 200, description = "Institution updated", body = Institution),
        (status = 404, description = "Institution not found"),
        (status = 409, description = "An institution with this name already exists"),
        (status = 422, description = "Validation error")
    ),
    tag = "Institutions"
)]
pub async fn update_institution(
    State(state): State<AppState>,
    Path(id): Path<InstitutionId>,
    ValidatedJson(dto): ValidatedJson<UpdateInstitutionDto>,
) -> Result<Json<Institution>, AppError> {
    let institution = InstitutionService::update_institution(&state.db, id, dto).await?;
    Ok(Json(institution))
}

#[utoipa::path(
    delete,
    path = "/api/institutions/{id}",
    params(("id" = Uuid, Path, description = "Institution ID")),
    responses(
        (status = 204, description = "Institution deleted"),
        (status = 404, description = "Institution not found"),
        (status = 409, description = "Students are still enrolled at the institution")
    ),
    tag = "Institutions"
)]
pub async fn delete_institution(
    State(state): State<AppState>,
    Path(id): Path<InstitutionId>,
) -> Result<StatusCode, AppError> {
    InstitutionService::delete_institution(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/institutions/{id}/facilities",
    params(("id" = Uuid, Path, description = "Institution ID"), FacilityFilterParams),
    responses(
        (status = 200, description = "Facilities of the institution", body = PaginatedFacilitiesResponse),
        (status = 404, description = "Institution not found")
    ),
    tag = "Institutions"
)]
pub async fn get_institution_facilities(
    State(state): State<AppState>,
    Path(id): Path<InstitutionId>,
    filters: Result<Query<FacilityFilterParams>, QueryRejection>,
) -> Result<Json<PaginatedFacilitiesResponse>, AppError> {
    let Query(mut filters) = filters.map_err(query_rejection)?;
    InstitutionService::ensure_exists(&state.db, id).await?;
    filters.institution_id = Some(id);
    let facilities = FacilityService::get_facilities(&state.db, filters).await?;
    Ok(Json(facilities))
}

#[utoipa::path(
    get,
    path = "/api/institutions/{id}/students",
    params(("id" = Uuid, Path, description = "Institution ID"), StudentFilterParams),
    responses(
        (status = 200, description = "Students enrolled at the institution", body = PaginatedStudentsResponse),
        (status = 404, description = "Institution not found")
    ),
    tag = "Institutions"
)]
pub async fn get_institution_students(
    State(state): State<AppState>,
    Path(id): Path<InstitutionId>,
    filters: Result<Query<StudentFilterParams>, QueryRejection>,
) -> Result<Json<PaginatedStudentsResponse>, AppError> {
    let Query(mut filters) = filters.map_err(query_rejection)?;
    InstitutionService::ensure_exists(&state.db, id).await?;
    filters.institution_id = Some(id);
    let students = StudentService::get_students(&state.db, &state.cipher, filters).await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/api/institutions/{id}/staff",
    params(("id" = Uuid, Path, description = "Institution ID"), StaffFilterParams),
    responses(
        (status = 200, description = "Staff members of the institution", body = PaginatedStaffResponse),
        (status = 404, description = "Institution not found")
    ),
    tag = "Institutions"
)]
pub async fn get_institution_staff(
    State(state): State<AppState>,
    Path(id): Path<InstitutionId>,
    filters: Result<Query<StaffFilterParams>, QueryRejection>,
) -> Result<Json<PaginatedStaffResponse>, AppError> {
    let Query(mut filters) = filters.map_err(query_rejection)?;
    InstitutionService::ensure_exists(&state.db, id).await?;
    filters.institution_id = Some(id);
    let staff = StaffService::get_staff(&state.db, &state.cipher, filters).await?;
    Ok(Json(staff))
}

#[utoipa::path(
    get,
    path = "/api/institutions/{id}/vacancies",
    params(("id" = Uuid, Path, description = "Institution ID"), VacancyFilterParams),
    responses(
        (status = 200, description = "Vacancies advertised by the institution", body = PaginatedVacanciesResponse),
        (status = 404, description = "Institution not found")
    ),
    tag = "Institutions"
)]
pub async fn get_institution_vacancies(
    State(state): State<AppState>,
    Path(id): Path<InstitutionId>,
    filters: Result<Query<VacancyFilterParams>, QueryRejection>,
) -> Result<Json<PaginatedVacanciesResponse>, AppError> {
    let Query(mut filters) = filters.map_err(query_rejection)?;
    InstitutionService::ensure_exists(&state.db, id).await?;
    filters.institution_id = Some(id);
    let vacancies = VacancyService::get_vacancies(&state.db, filters).await?;
    Ok(Json(vacancies))
}
