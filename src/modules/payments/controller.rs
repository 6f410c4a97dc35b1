use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use campusdesk_core::AppError;
use campusdesk_models::PaymentId;
use uuid::Uuid;

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{CreatePaymentDto, PaginatedPaymentsResponse, Payment, PaymentFilterParams};
use super::service::PaymentService;

#[utoipa::path(
    post,
    path = "/api/payments",
    request_body = CreatePaymentDto,
    responses(
        (status = 201, description = "Payment recorded", body = Payment),
        (status = 400, description = "Malformed body or unknown student"),
        (status = 422, description = "Amount not positive or out of range")
    ),
    tag = "Payments"
)]
pub async fn create_payment(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreatePaymentDto>,
) -> Result<(StatusCode, Json<Payment>), AppError> {
    let payment = PaymentService::create_payment(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

#[utoipa::path(
    get,
    path = "/api/payments",
    params(PaymentFilterParams),
    responses(
        (status = 200, description = "Paginated list of payments", body = PaginatedPaymentsResponse),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "Payments"
)]
pub async fn get_payments(
    State(state): State<AppState>,
    filters: Result<Query<PaymentFilterParams>, QueryRejection>,
) -> Result<Json<PaginatedPaymentsResponse>, AppError> {
    let Query(filters) = filters
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e)))?;
    let payments = PaymentService::get_payments(&state.db, filters).await?;
    Ok(Json(payments))
}

#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    params(("id" = Uuid, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment details", body = Payment),
        (status = 404, description = "Payment not found")
    ),
    tag = "Payments"
)]
pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<PaymentId>,
) -> Result<Json<Payment>, AppError> {
    let payment = PaymentService::get_payment(&state.db, id).await?;
    Ok(Json(payment))
}

#[utoipa::path(
    delete,
    path = "/api/payments/{id}",
    params(("id" = Uuid, Path, description = "Payment ID")),
    responses(
        (status = 204, description = "Payment deleted"),
        (status = 404, description = "Payment not found")
    ),
    tag = "Payments"
)]
pub async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<PaymentId>,
) -> Result<StatusCode, AppError> {
    PaymentService::delete_payment(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
