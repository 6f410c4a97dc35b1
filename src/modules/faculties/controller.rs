use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use campusdesk_core::AppError;
use campusdesk_models::{DepartmentId, FacultyId, ProgramId};
use uuid::Uuid;

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    CreateDepartmentDto, CreateFacultyDto, CreateProgramDto, Department, DepartmentFilterParams,
    Faculty, FacultyFilterParams, PaginatedDepartmentsResponse, PaginatedFacultiesResponse,
    PaginatedProgramsResponse, Program, ProgramFilterParams,
};
use super::service::{DepartmentService, FacultyService, ProgramService};

fn query_rejection(e: QueryRejection) -> AppError {
    AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e))
}

#[utoipa::path(
    post,
    path = "/api/faculties",
    request_body = CreateFacultyDto,
    responses(
        (status = 201, description = "Faculty created", body = Faculty),
        (status = 400, description = "Malformed body or unknown institution"),
        (status = 409, description = "The institution already has a faculty with this name"),
        (status = 422, description = "Validation error")
    ),
    tag = "Faculties"
)]
pub async fn create_faculty(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateFacultyDto>,
) -> Result<(StatusCode, Json<Faculty>), AppError> {
    let faculty = FacultyService::create_faculty(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(faculty)))
}

#[utoipa::path(
    get,
    path = "/api/faculties",
    params(FacultyFilterParams),
    responses(
        (status = 200, description = "Paginated list of faculties", body = PaginatedFacultiesResponse),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "Faculties"
)]
pub async fn get_faculties(
    State(state): State<AppState>,
    filters: Result<Query<FacultyFilterParams>, QueryRejection>,
) -> Result<Json<PaginatedFacultiesResponse>, AppError> {
    let Query(filters) = filters.map_err(query_rejection)?;
    Ok(Json(FacultyService::get_faculties(&state.db, filters).await?))
}

#[utoipa::path(
    get,
    path = "/api/faculties/{id}",
    params(("id" = Uuid, Path, description = "Faculty ID")),
    responses(
        (status = 200, description = "Faculty details", body = Faculty),
        (status = 404, description = "Faculty not found")
    ),
    tag = "Faculties"
)]
pub async fn get_faculty(
    State(state): State<AppState>,
    Path(id): Path<FacultyId>,
) -> Result<Json<Faculty>, AppError> {
    Ok(Json(FacultyService::get_faculty(&state.db, id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/faculties/{id}",
    params(("id" = Uuid, Path, description = "Faculty ID")),
    responses(
        (status = 204, description = "Faculty deleted"),
        (status = 404, description = "Faculty not found"),
        (status = 409, description = "Students are enrolled in one of its programs")
    ),
    tag = "Faculties"
)]
pub async fn delete_faculty(
    State(state): State<AppState>,
    Path(id): Path<FacultyId>,
) -> Result<StatusCode, AppError> {
    FacultyService::delete_faculty(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/departments",
    request_body = CreateDepartmentDto,
    responses(
        (status = 201, description = "Department created", body = Department),
        (status = 400, description = "Malformed body or unknown faculty"),
        (status = 409, description = "The faculty already has a department with this name"),
        (status = 422, description = "Validation error")
    ),
    tag = "Departments"
)]
pub async fn create_department(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateDepartmentDto>,
) -> Result<(StatusCode, Json<Department>), AppError> {
    let department = DepartmentService::create_department(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(department)))
}

#[utoipa::path(
    get,
    path = "/api/departments",
    params(DepartmentFilterParams),
    responses(
        (status = 200, description = "Paginated list of departments", body = PaginatedDepartmentsResponse),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "Departments"
)]
pub async fn get_departments(
    State(state): State<AppState>,
    filters: Result<Query<DepartmentFilterParams>, QueryRejection>,
) -> Result<Json<PaginatedDepartmentsResponse>, AppError> {
    let Query(filters) = filters.map_err(query_rejection)?;
    Ok(Json(
        DepartmentService::get_departments(&state.db, filters).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/departments/{id}",
    params(("id" = Uuid, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department details", body = Department),
        (status = 404, description = "Department not found")
    ),
    tag = "Departments"
)]
pub async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<DepartmentId>,
) -> Result<Json<Department>, AppError> {
    Ok(Json(DepartmentService::get_department(&state.db, id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/departments/{id}",
    params(("id" = Uuid, Path, description = "Department ID")),
    responses(
        (status = 204, description = "Department deleted"),
        (status = 404, description = "Department not found"),
        (status = 409, description = "Students are enrolled in one of its programs")
    ),
    tag = "Departments"
)]
pub async fn delete_department(
    State(state): State<AppState>,
    Path(id): Path<DepartmentId>,
) -> Result<StatusCode, AppError> {
    DepartmentService::delete_department(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/programs",
    request_body = CreateProgramDto,
    responses(
        (status = 201, description = "Program created", body = Program),
        (status = 400, description = "Malformed body or unknown department"),
        (status = 409, description = "A program with this code already exists"),
        (status = 422, description = "Validation error")
    ),
    tag = "Programs"
)]
pub async fn create_program(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateProgramDto>,
) -> Result<(StatusCode, Json<Program>), AppError> {
    let program = ProgramService::create_program(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(program)))
}

#[utoipa::path(
    get,
    path = "/api/programs",
    params(ProgramFilterParams),
    responses(
        (status = 200, description = "Paginated list of programs", body = PaginatedProgramsResponse),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "Programs"
)]
pub async fn get_programs(
    State(state): State<AppState>,
    filters: Result<Query<ProgramFilterParams>, QueryRejection>,
) -> Result<Json<PaginatedProgramsResponse>, AppError> {
    let Query(filters) = filters.map_err(query_rejection)?;
    Ok(Json(ProgramService::get_programs(&state.db, filters).await?))
}

#[utoipa::path(
    get,
    path = "/api/programs/{id}",
    params(("id" = Uuid, Path, description = "Program ID")),
    responses(
        (status = 200, description = "Program details", body = Program),
        (status = 404, description = "Program not found")
    ),
    tag = "Programs"
)]
pub async fn get_program(
    State(state): State<AppState>,
    Path(id): Path<ProgramId>,
) -> Result<Json<Program>, AppError> {
    Ok(Json(ProgramService::get_program(&state.db, id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/programs/{id}",
    params(("id" = Uuid, Path, description = "Program ID")),
    responses(
        (status = 204, description = "Program deleted"),
        (status = 404, description = "Program not found"),
        (status = 409, description = "Students are enrolled in the program")
    ),
    tag = "Programs"
)]
pub async fn delete_program(
    State(state): State<AppState>,
    Path(id): Path<ProgramId>,
) -> Result<StatusCode, AppError> {
    ProgramService::delete_program(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
