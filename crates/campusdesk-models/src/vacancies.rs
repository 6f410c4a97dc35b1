//! Vacancy domain models and DTOs. Vacancies carry no personal data.

use campusdesk_core::serde::{deserialize_optional_from_str, deserialize_some};
use campusdesk_core::{PaginationMeta, PaginationParams};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::choices::VacancyStatus;
use crate::ids::{DepartmentId, FacultyId, InstitutionId, VacancyId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Vacancy {
    pub id: VacancyId,
    pub institution_id: InstitutionId,
    pub title: String,
    pub faculty_id: Option<FacultyId>,
    pub department_id: DepartmentId,
    pub quantity: i32,
    pub deadline: NaiveDate,
    pub description: String,
    pub status: VacancyStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for Vacancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.status)
    }
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVacancyDto {
    pub institution_id: InstitutionId,
    #[validate(length(min = 1, max = 150))]
    pub title: String,
    pub faculty_id: Option<FacultyId>,
    pub department_id: DepartmentId,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 0))]
    pub quantity: i32,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: VacancyStatus,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateVacancyDto {
    #[validate(length(min = 1, max = 150))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<FacultyId>)]
    pub faculty_id: Option<Option<FacultyId>>,
    pub department_id: Option<DepartmentId>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    pub deadline: Option<NaiveDate>,
    pub description: Option<String>,
    pub status: Option<VacancyStatus>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VacancyFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub institution_id: Option<InstitutionId>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub department_id: Option<DepartmentId>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub status: Option<VacancyStatus>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedVacanciesResponse {
    pub data: Vec<Vacancy>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_json() -> &'static str {
        r#"{
            "institution_id": "12345678-1234-1234-1234-123456789abc",
            "title": "Lecturer in Mechatronics",
            "department_id": "87654321-4321-4321-4321-cba987654321",
            "deadline": "2025-06-30"
        }"#
    }

    #[test]
    fn test_create_vacancy_dto_defaults() {
        let dto: CreateVacancyDto = serde_json::from_str(create_json()).unwrap();
        assert_eq!(dto.quantity, 1);
        assert_eq!(dto.status, VacancyStatus::Open);
        assert_eq!(dto.description, "");
        assert!(dto.faculty_id.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_vacancy_dto_validation() {
        let mut dto: CreateVacancyDto = serde_json::from_str(create_json()).unwrap();
        dto.title = "x".repeat(151);
        assert!(dto.validate().is_err());

        let mut dto: CreateVacancyDto = serde_json::from_str(create_json()).unwrap();
        dto.quantity = -1;
        assert!(dto.validate().is_err());

        let mut dto: CreateVacancyDto = serde_json::from_str(create_json()).unwrap();
        dto.quantity = 0;
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_vacancy_requires_department() {
        let result = serde_json::from_str::<CreateVacancyDto>(
            r#"{"institution_id":"12345678-1234-1234-1234-123456789abc","title":"Clerk","deadline":"2025-01-01"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        let now = Utc::now();
        let vacancy = Vacancy {
            id: VacancyId::new(),
            institution_id: InstitutionId::new(),
            title: "Librarian".to_string(),
            faculty_id: None,
            department_id: DepartmentId::new(),
            quantity: 2,
            deadline: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            description: String::new(),
            status: VacancyStatus::Closed,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(vacancy.to_string(), "Librarian (Closed)");
    }
}
