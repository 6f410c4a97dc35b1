//! Faculty, department and program catalogue.
//!
//! Students enrol on a program, staff sit in a faculty or department, and
//! vacancies are advertised by a department.

use campusdesk_core::serde::deserialize_optional_from_str;
use campusdesk_core::{PaginationMeta, PaginationParams};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::ids::{DepartmentId, FacultyId, InstitutionId, ProgramId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Faculty {
    pub id: FacultyId,
    pub institution_id: InstitutionId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for Faculty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Department {
    pub id: DepartmentId,
    pub faculty_id: FacultyId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Program {
    pub id: ProgramId,
    pub department_id: DepartmentId,
    pub name: String,
    pub code: String,
    pub duration_years: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFacultyDto {
    pub institution_id: InstitutionId,
    #[validate(length(min = 1, max = 150))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDepartmentDto {
    pub faculty_id: FacultyId,
    #[validate(length(min = 1, max = 150))]
    pub name: String,
}

fn default_duration_years() -> i32 {
    3
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProgramDto {
    pub department_id: DepartmentId,
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    #[validate(length(min = 1, max = 20))]
    pub code: String,
    #[serde(default = "default_duration_years")]
    #[validate(range(min = 1))]
    pub duration_years: i32,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FacultyFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub institution_id: Option<InstitutionId>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DepartmentFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub faculty_id: Option<FacultyId>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProgramFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub department_id: Option<DepartmentId>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedFacultiesResponse {
    pub data: Vec<Faculty>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedDepartmentsResponse {
    pub data: Vec<Department>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedProgramsResponse {
    pub data: Vec<Program>,
    pub meta: PaginationMeta,
}
