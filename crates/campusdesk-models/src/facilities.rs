//! Facility domain models and DTOs.

use campusdesk_core::serde::deserialize_optional_from_str;
use campusdesk_core::{PaginationMeta, PaginationParams};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::choices::{FacilityStatus, FacilityType};
use crate::ids::{FacilityId, InstitutionId};

/// A building or amenity belonging to an institution.
///
/// `institution_name` is joined in on every read so the entity can render
/// itself without a second lookup.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Facility {
    pub id: FacilityId,
    pub institution_id: InstitutionId,
    pub institution_name: String,
    pub name: String,
    pub facility_type: FacilityType,
    pub building: String,
    pub capacity: i32,
    /// May exceed `capacity` (overbooked halls are recorded as-is).
    pub current_usage: i32,
    pub status: FacilityStatus,
    pub description: String,
    pub equipment: String,
    pub manager: String,
    pub contact_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.institution_name)
    }
}

fn default_building() -> String {
    "Main Building".to_string()
}

fn default_manager() -> String {
    "Pending".to_string()
}

fn default_contact_number() -> String {
    "N/A".to_string()
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFacilityDto {
    pub institution_id: InstitutionId,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub facility_type: FacilityType,
    #[serde(default = "default_building")]
    #[validate(length(max = 100))]
    pub building: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub capacity: i32,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub current_usage: i32,
    #[serde(default)]
    pub status: FacilityStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub equipment: String,
    #[serde(default = "default_manager")]
    #[validate(length(max = 100))]
    pub manager: String,
    #[serde(default = "default_contact_number")]
    #[validate(length(max = 50))]
    pub contact_number: String,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateFacilityDto {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub facility_type: Option<FacilityType>,
    #[validate(length(max = 100))]
    pub building: Option<String>,
    #[validate(range(min = 0))]
    pub capacity: Option<i32>,
    #[validate(range(min = 0))]
    pub current_usage: Option<i32>,
    pub status: Option<FacilityStatus>,
    pub description: Option<String>,
    pub equipment: Option<String>,
    #[validate(length(max = 100))]
    pub manager: Option<String>,
    #[validate(length(max = 50))]
    pub contact_number: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FacilityFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub institution_id: Option<InstitutionId>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub facility_type: Option<FacilityType>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub status: Option<FacilityStatus>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedFacilitiesResponse {
    pub data: Vec<Facility>,
    pub meta: PaginationMeta,
}
