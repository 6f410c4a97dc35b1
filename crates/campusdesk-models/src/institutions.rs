//! Institution domain models and DTOs.
//!
//! An institution is the root of the schema: facilities, faculties, staff,
//! vacancies and students all hang off it.

use campusdesk_core::serde::deserialize_optional_from_str;
use campusdesk_core::{PaginationMeta, PaginationParams};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::choices::{InstitutionStatus, InstitutionType, Province};
use crate::ids::InstitutionId;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Institution {
    pub id: InstitutionId,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub institution_type: InstitutionType,
    pub province: Province,
    pub location: String,
    pub address: String,
    pub capacity: i32,
    /// Headcount figure reported by the institution. Not derived from the
    /// staff records.
    pub staff: i32,
    pub status: InstitutionStatus,
    /// Year the institution was established.
    pub established: i32,
    pub has_innovation_hub: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for Institution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateInstitutionDto {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(rename = "type")]
    pub institution_type: InstitutionType,
    #[serde(default)]
    pub province: Province,
    #[validate(length(min = 1, max = 100))]
    pub location: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub capacity: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub staff: i32,
    #[serde(default)]
    pub status: InstitutionStatus,
    #[validate(range(min = 0))]
    pub established: i32,
    #[serde(default)]
    pub has_innovation_hub: bool,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateInstitutionDto {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub institution_type: Option<InstitutionType>,
    pub province: Option<Province>,
    #[validate(length(min = 1, max = 100))]
    pub location: Option<String>,
    pub address: Option<String>,
    #[validate(range(min = 0))]
    pub capacity: Option<i32>,
    #[validate(range(min = 0))]
    pub staff: Option<i32>,
    pub status: Option<InstitutionStatus>,
    #[validate(range(min = 0))]
    pub established: Option<i32>,
    pub has_innovation_hub: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InstitutionFilterParams {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "deserialize_optional_from_str"
    )]
    pub institution_type: Option<InstitutionType>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub province: Option<Province>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub status: Option<InstitutionStatus>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedInstitutionsResponse {
    pub data: Vec<Institution>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_dto() -> CreateInstitutionDto {
        CreateInstitutionDto {
            name: "Harare Polytechnic".to_string(),
            institution_type: InstitutionType::Polytechnic,
            province: Province::Harare,
            location: "Harare".to_string(),
            address: String::new(),
            capacity: 5000,
            staff: 320,
            status: InstitutionStatus::Active,
            established: 1927,
            has_innovation_hub: true,
        }
    }

    #[test]
    fn test_create_institution_dto_validation() {
        assert!(valid_dto().validate().is_ok());

        let mut dto = valid_dto();
        dto.name = String::new();
        assert!(dto.validate().is_err());

        let mut dto = valid_dto();
        dto.name = "x".repeat(256);
        assert!(dto.validate().is_err());

        let mut dto = valid_dto();
        dto.location = "x".repeat(101);
        assert!(dto.validate().is_err());

        let mut dto = valid_dto();
        dto.capacity = -1;
        assert!(dto.validate().is_err());

        let mut dto = valid_dto();
        dto.established = -1;
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_institution_dto_defaults() {
        let dto: CreateInstitutionDto = serde_json::from_str(
            r#"{"name":"Mkoba Teachers College","type":"Teachers College","location":"Gweru","established":1976}"#,
        )
        .unwrap();
        assert_eq!(dto.institution_type, InstitutionType::TeachersCollege);
        assert_eq!(dto.province, Province::Harare);
        assert_eq!(dto.status, InstitutionStatus::Active);
        assert_eq!(dto.address, "");
        assert_eq!(dto.capacity, 0);
        assert_eq!(dto.staff, 0);
        assert!(!dto.has_innovation_hub);
    }

    #[test]
    fn test_create_institution_dto_rejects_unknown_choice() {
        let result = serde_json::from_str::<CreateInstitutionDto>(
            r#"{"name":"X","type":"University","location":"Y","established":2000}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_update_institution_dto_validation() {
        assert!(UpdateInstitutionDto::default().validate().is_ok());

        let dto = UpdateInstitutionDto {
            staff: Some(-5),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_filter_params_parse_query_strings() {
        let params: InstitutionFilterParams = serde_json::from_str(
            r#"{"type":"Polytechnic","province":"Mashonaland West","status":"","limit":"5"}"#,
        )
        .unwrap();
        assert_eq!(params.institution_type, Some(InstitutionType::Polytechnic));
        assert_eq!(params.province, Some(Province::MashonalandWest));
        assert!(params.status.is_none());
        assert_eq!(params.pagination.limit(), 5);
    }

    #[test]
    fn test_institution_serializes_type_key() {
        let now = Utc::now();
        let institution = Institution {
            id: InstitutionId::new(),
            name: "Kushinga Phikelela".to_string(),
            institution_type: InstitutionType::Polytechnic,
            province: Province::MashonalandEast,
            location: "Marondera".to_string(),
            address: String::new(),
            capacity: 0,
            staff: 0,
            status: InstitutionStatus::Renovation,
            established: 1984,
            has_innovation_hub: false,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&institution).unwrap();
        assert_eq!(json["type"], "Polytechnic");
        assert_eq!(json["status"], "Renovation");
        assert_eq!(institution.to_string(), "Kushinga Phikelela");
    }
}
