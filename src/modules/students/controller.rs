use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use campusdesk_core::AppError;
use campusdesk_models::StudentId;
use uuid::Uuid;

use crate::modules::payments::{
    PaginatedPaymentsResponse, PaymentFilterParams, service::PaymentService,
};
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    CreateStudentDto, PaginatedStudentsResponse, Student, StudentFilterParams, UpdateStudentDto,
};
use super::service::StudentService;

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 400, description = "Malformed body or unknown institution/program"),
        (status = 409, description = "Registration number or user already taken"),
        (status = 422, description = "Validation error")
    ),
    tag = "Students"
)]
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let student = StudentService::create_student(&state.db, &state.cipher, dto).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

#[utoipa::path(
    get,
    path = "/api/students",
    params(StudentFilterParams),
    responses(
        (status = 200, description = "Paginated list of students", body = PaginatedStudentsResponse),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "Students"
)]
pub async fn get_students(
    State(state): State<AppState>,
    filters: Result<Query<StudentFilterParams>, QueryRejection>,
) -> Result<Json<PaginatedStudentsResponse>, AppError> {
    let Query(filters) = filters
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e)))?;
    let students = StudentService::get_students(&state.db, &state.cipher, filters).await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 404, description = "Student not found")
    ),
    tag = "Students"
)]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::get_student(&state.db, &state.cipher, id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    patch,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 404, description = "Student not found"),
        (status = 409, description = "Registration number or user already taken"),
        (status = 422, description = "Validation error")
    ),
    tag = "Students"
)]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::update_student(&state.db, &state.cipher, id, dto).await?;
    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student and their payments deleted"),
        (status = 404, description = "Student not found")
    ),
    tag = "Students"
)]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
) -> Result<StatusCode, AppError> {
    StudentService::delete_student(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/students/{id}/payments",
    params(("id" = Uuid, Path, description = "Student ID"), PaymentFilterParams),
    responses(
        (status = 200, description = "Payments made by the student", body = PaginatedPaymentsResponse),
        (status = 404, description = "Student not found")
    ),
    tag = "Students"
)]
pub async fn get_student_payments(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
    filters: Result<Query<PaymentFilterParams>, QueryRejection>,
) -> Result<Json<PaginatedPaymentsResponse>, AppError> {
    let Query(mut filters) = filters
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e)))?;
    StudentService::ensure_exists(&state.db, id).await?;
    filters.student_id = Some(id);
    let payments = PaymentService::get_payments(&state.db, filters).await?;
    Ok(Json(payments))
}
