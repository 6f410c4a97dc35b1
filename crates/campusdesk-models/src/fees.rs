//! Fee structures and payments.
//!
//! Money is held as [`Decimal`] and travels as a JSON string (`"450.00"`) so
//! no precision is lost to floating point.

use campusdesk_core::serde::deserialize_optional_from_str;
use campusdesk_core::{PaginationMeta, PaginationParams};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::ids::{FeeStructureId, PaymentId, ProgramId, StudentId};

/// Largest value a `NUMERIC(precision, 2)` column can hold, exclusive.
fn numeric_limit(precision: u32) -> Decimal {
    Decimal::from_i128_with_scale(10i128.pow(precision), 2)
}

fn check_money(value: &Decimal, precision: u32) -> Result<(), ValidationError> {
    if value.normalize().scale() > 2 {
        return Err(ValidationError::new("money_scale")
            .with_message("must have at most two decimal places".into()));
    }
    if *value >= numeric_limit(precision) {
        return Err(ValidationError::new("money_precision")
            .with_message("exceeds the maximum amount".into()));
    }
    Ok(())
}

/// `NUMERIC(12,2)`, zero allowed.
pub fn validate_semester_fee(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(ValidationError::new("fee_negative").with_message("must not be negative".into()));
    }
    check_money(value, 12)
}

/// `NUMERIC(10,2)`, strictly positive.
pub fn validate_payment_amount(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(ValidationError::new("amount_not_positive")
            .with_message("must be greater than zero".into()));
    }
    check_money(value, 10)
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FeeStructure {
    pub id: FeeStructureId,
    pub program_id: ProgramId,
    pub program_name: String,
    #[schema(value_type = String, example = "450.00")]
    pub semester_fee: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for FeeStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.program_name, self.semester_fee)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFeeStructureDto {
    pub program_id: ProgramId,
    #[serde(default)]
    #[schema(value_type = String, example = "450.00")]
    #[validate(custom(function = "validate_semester_fee"))]
    pub semester_fee: Decimal,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateFeeStructureDto {
    #[schema(value_type = Option<String>, example = "475.00")]
    #[validate(custom(function = "validate_semester_fee"))]
    pub semester_fee: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeeStructureFilterParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedFeeStructuresResponse {
    pub data: Vec<FeeStructure>,
    pub meta: PaginationMeta,
}

/// A payment made by a student.
///
/// `student_number` is the student's registration number, joined in for
/// display.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Payment {
    pub id: PaymentId,
    pub student_id: StudentId,
    pub student_number: String,
    #[schema(value_type = String, example = "150.00")]
    pub amount: Decimal,
    pub date_paid: NaiveDate,
    pub reference: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.student_number, self.amount)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePaymentDto {
    pub student_id: StudentId,
    #[schema(value_type = String, example = "150.00")]
    #[validate(custom(function = "validate_payment_amount"))]
    pub amount: Decimal,
    pub date_paid: NaiveDate,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub reference: String,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaymentFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub student_id: Option<StudentId>,
    /// Earliest `date_paid`, inclusive
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub paid_from: Option<NaiveDate>,
    /// Latest `date_paid`, inclusive
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub paid_to: Option<NaiveDate>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedPaymentsResponse {
    pub data: Vec<Payment>,
    pub meta: PaginationMeta,
}
