//! Staff domain models and DTOs.
//!
//! Names, contact details and specialization are sealed at rest, following
//! the same record/plaintext split as [`crate::students`].

use campusdesk_core::serde::{deserialize_optional_bool, deserialize_optional_from_str, deserialize_some};
use campusdesk_core::{PaginationMeta, PaginationParams};
use campusdesk_crypto::{CryptoError, FieldCipher};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::choices::{Qualification, StaffPosition};
use crate::ids::{DepartmentId, FacultyId, InstitutionId, StaffId, UserId};
use crate::value_types::Email;

#[derive(Debug, Clone, FromRow)]
pub struct StaffRecord {
    pub id: StaffId,
    pub user_id: Option<UserId>,
    pub institution_id: InstitutionId,
    pub faculty_id: Option<FacultyId>,
    pub department_id: Option<DepartmentId>,
    pub first_name: Vec<u8>,
    pub last_name: Vec<u8>,
    pub email: Vec<u8>,
    pub phone: Vec<u8>,
    pub employee_id: String,
    pub position: StaffPosition,
    pub qualification: Qualification,
    pub specialization: Vec<u8>,
    pub date_joined: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StaffRecord {
    pub fn open(self, cipher: &FieldCipher) -> Result<Staff, CryptoError> {
        Ok(Staff {
            first_name: cipher.open(&self.first_name)?,
            last_name: cipher.open(&self.last_name)?,
            email: Email::new_unchecked(cipher.open(&self.email)?),
            phone: cipher.open(&self.phone)?,
            specialization: cipher.open(&self.specialization)?,
            id: self.id,
            user_id: self.user_id,
            institution_id: self.institution_id,
            faculty_id: self.faculty_id,
            department_id: self.department_id,
            employee_id: self.employee_id,
            position: self.position,
            qualification: self.qualification,
            date_joined: self.date_joined,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// A staff member ("Staff Members" in listings).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Staff {
    pub id: StaffId,
    pub user_id: Option<UserId>,
    pub institution_id: InstitutionId,
    pub faculty_id: Option<FacultyId>,
    pub department_id: Option<DepartmentId>,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: String,
    pub employee_id: String,
    pub position: StaffPosition,
    pub qualification: Qualification,
    pub specialization: String,
    pub date_joined: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Staff {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn personal(&self) -> StaffPersonal {
        StaffPersonal {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            specialization: self.specialization.clone(),
        }
    }
}

impl fmt::Display for Staff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.employee_id, self.position)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffPersonal {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: String,
    pub specialization: String,
}

impl StaffPersonal {
    pub fn seal(&self, cipher: &FieldCipher) -> Result<SealedStaffPersonal, CryptoError> {
        Ok(SealedStaffPersonal {
            first_name: cipher.seal(&self.first_name)?,
            last_name: cipher.seal(&self.last_name)?,
            email: cipher.seal(self.email.as_str())?,
            phone: cipher.seal(&self.phone)?,
            specialization: cipher.seal(&self.specialization)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SealedStaffPersonal {
    pub first_name: Vec<u8>,
    pub last_name: Vec<u8>,
    pub email: Vec<u8>,
    pub phone: Vec<u8>,
    pub specialization: Vec<u8>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStaffDto {
    pub user_id: Option<UserId>,
    pub institution_id: InstitutionId,
    pub faculty_id: Option<FacultyId>,
    pub department_id: Option<DepartmentId>,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    pub email: Email,
    #[validate(length(min = 1, max = 50))]
    pub phone: String,
    #[validate(length(min = 1, max = 50))]
    pub employee_id: String,
    pub position: StaffPosition,
    pub qualification: Qualification,
    #[serde(default)]
    pub specialization: String,
    pub date_joined: NaiveDate,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl CreateStaffDto {
    pub fn personal(&self) -> StaffPersonal {
        StaffPersonal {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            specialization: self.specialization.clone(),
        }
    }
}

/// Partial update of a staff member. `null` clears `user_id`, `faculty_id`
/// and `department_id`.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStaffDto {
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<UserId>)]
    pub user_id: Option<Option<UserId>>,
    pub institution_id: Option<InstitutionId>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<FacultyId>)]
    pub faculty_id: Option<Option<FacultyId>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<DepartmentId>)]
    pub department_id: Option<Option<DepartmentId>>,
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    pub email: Option<Email>,
    #[validate(length(min = 1, max = 50))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub employee_id: Option<String>,
    pub position: Option<StaffPosition>,
    pub qualification: Option<Qualification>,
    pub specialization: Option<String>,
    pub date_joined: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

impl UpdateStaffDto {
    pub fn changes_personal(&self) -> bool {
        self.first_name.is_some()
            || self.last_name.is_some()
            || self.email.is_some()
            || self.phone.is_some()
            || self.specialization.is_some()
    }

    pub fn merge_personal(&self, current: StaffPersonal) -> StaffPersonal {
        StaffPersonal {
            first_name: self.first_name.clone().unwrap_or(current.first_name),
            last_name: self.last_name.clone().unwrap_or(current.last_name),
            email: self.email.clone().unwrap_or(current.email),
            phone: self.phone.clone().unwrap_or(current.phone),
            specialization: self
                .specialization
                .clone()
                .unwrap_or(current.specialization),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StaffFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub institution_id: Option<InstitutionId>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub faculty_id: Option<FacultyId>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub department_id: Option<DepartmentId>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub position: Option<StaffPosition>,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedStaffResponse {
    pub data: Vec<Staff>,
    pub meta: PaginationMeta,
}
