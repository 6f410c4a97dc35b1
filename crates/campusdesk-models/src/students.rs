//! Student domain models and DTOs.
//!
//! Personal details (names, national id, gender and disability type) are
//! sealed with [`FieldCipher`] before they are written. A student therefore
//! exists in two shapes:
//!
//! - [`StudentRecord`]: the row as stored, personal columns as raw bytes
//! - [`Student`]: the plaintext view returned by the API
//!
//! [`StudentRecord::open`] converts the first into the second and
//! [`StudentPersonal::seal`] produces the bytes for an INSERT or UPDATE.

use campusdesk_core::serde::{deserialize_optional_from_str, deserialize_some};
use campusdesk_core::{PaginationMeta, PaginationParams};
use campusdesk_crypto::{CryptoError, FieldCipher};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::choices::{DropoutReason, FinalGrade, StudentStatus};
use crate::ids::{InstitutionId, ProgramId, StudentId, UserId};

/// A student row exactly as stored.
#[derive(Debug, Clone, FromRow)]
pub struct StudentRecord {
    pub id: StudentId,
    pub user_id: Option<UserId>,
    pub student_id: String,
    pub first_name: Vec<u8>,
    pub last_name: Vec<u8>,
    pub national_id: Option<Vec<u8>>,
    pub gender: Vec<u8>,
    pub disability_type: Vec<u8>,
    pub date_of_birth: Option<NaiveDate>,
    pub enrollment_year: i32,
    pub status: StudentStatus,
    pub dropout_reason: Option<DropoutReason>,
    pub institution_id: InstitutionId,
    pub program_id: ProgramId,
    pub is_iseop: bool,
    pub is_work_for_fees: bool,
    pub work_area: Option<String>,
    pub hours_pledged: i32,
    pub graduation_year: Option<i32>,
    pub final_grade: Option<FinalGrade>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StudentRecord {
    /// Decrypts the personal columns.
    pub fn open(self, cipher: &FieldCipher) -> Result<Student, CryptoError> {
        Ok(Student {
            first_name: cipher.open(&self.first_name)?,
            last_name: cipher.open(&self.last_name)?,
            national_id: cipher.open_opt(self.national_id.as_deref())?,
            gender: cipher.open(&self.gender)?,
            disability_type: cipher.open(&self.disability_type)?,
            id: self.id,
            user_id: self.user_id,
            student_id: self.student_id,
            date_of_birth: self.date_of_birth,
            enrollment_year: self.enrollment_year,
            status: self.status,
            dropout_reason: self.dropout_reason,
            institution_id: self.institution_id,
            program_id: self.program_id,
            is_iseop: self.is_iseop,
            is_work_for_fees: self.is_work_for_fees,
            work_area: self.work_area,
            hours_pledged: self.hours_pledged,
            graduation_year: self.graduation_year,
            final_grade: self.final_grade,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Student {
    pub id: StudentId,
    pub user_id: Option<UserId>,
    /// Registration number issued by the institution.
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub national_id: Option<String>,
    pub gender: String,
    pub disability_type: String,
    pub date_of_birth: Option<NaiveDate>,
    pub enrollment_year: i32,
    pub status: StudentStatus,
    pub dropout_reason: Option<DropoutReason>,
    pub institution_id: InstitutionId,
    pub program_id: ProgramId,
    /// Sponsored under ISEOP.
    pub is_iseop: bool,
    pub is_work_for_fees: bool,
    pub work_area: Option<String>,
    pub hours_pledged: i32,
    pub graduation_year: Option<i32>,
    pub final_grade: Option<FinalGrade>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn personal(&self) -> StudentPersonal {
        StudentPersonal {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            national_id: self.national_id.clone(),
            gender: self.gender.clone(),
            disability_type: self.disability_type.clone(),
        }
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.student_id)
    }
}

/// Plaintext personal details of a student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentPersonal {
    pub first_name: String,
    pub last_name: String,
    pub national_id: Option<String>,
    pub gender: String,
    pub disability_type: String,
}

impl StudentPersonal {
    pub fn seal(&self, cipher: &FieldCipher) -> Result<SealedStudentPersonal, CryptoError> {
        Ok(SealedStudentPersonal {
            first_name: cipher.seal(&self.first_name)?,
            last_name: cipher.seal(&self.last_name)?,
            national_id: cipher.seal_opt(self.national_id.as_deref())?,
            gender: cipher.seal(&self.gender)?,
            disability_type: cipher.seal(&self.disability_type)?,
        })
    }
}

/// Personal details ready to bind to the `BYTEA` columns.
#[derive(Debug, Clone)]
pub struct SealedStudentPersonal {
    pub first_name: Vec<u8>,
    pub last_name: Vec<u8>,
    pub national_id: Option<Vec<u8>>,
    pub gender: Vec<u8>,
    pub disability_type: Vec<u8>,
}

fn default_disability_type() -> String {
    "None".to_string()
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    pub user_id: Option<UserId>,
    #[validate(length(min = 1, max = 50))]
    pub student_id: String,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(length(max = 50))]
    pub national_id: Option<String>,
    #[validate(length(min = 1, max = 10))]
    pub gender: String,
    #[serde(default = "default_disability_type")]
    #[validate(length(max = 50))]
    pub disability_type: String,
    pub date_of_birth: Option<NaiveDate>,
    #[validate(range(min = 0))]
    pub enrollment_year: i32,
    #[serde(default)]
    pub status: StudentStatus,
    pub dropout_reason: Option<DropoutReason>,
    pub institution_id: InstitutionId,
    pub program_id: ProgramId,
    #[serde(default)]
    pub is_iseop: bool,
    #[serde(default)]
    pub is_work_for_fees: bool,
    #[validate(length(max = 50))]
    pub work_area: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub hours_pledged: i32,
    #[validate(range(min = 0))]
    pub graduation_year: Option<i32>,
    pub final_grade: Option<FinalGrade>,
}

impl CreateStudentDto {
    pub fn personal(&self) -> StudentPersonal {
        StudentPersonal {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            national_id: self.national_id.clone().filter(|s| !s.is_empty()),
            gender: self.gender.clone(),
            disability_type: self.disability_type.clone(),
        }
    }
}

/// Partial update of a student.
///
/// Nullable columns take `null` to clear them. For `national_id` and
/// `work_area` an empty string clears the value as well.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<UserId>)]
    pub user_id: Option<Option<UserId>>,
    #[validate(length(min = 1, max = 50))]
    pub student_id: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(length(max = 50))]
    pub national_id: Option<String>,
    #[validate(length(min = 1, max = 10))]
    pub gender: Option<String>,
    #[validate(length(max = 50))]
    pub disability_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<NaiveDate>)]
    pub date_of_birth: Option<Option<NaiveDate>>,
    #[validate(range(min = 0))]
    pub enrollment_year: Option<i32>,
    pub status: Option<StudentStatus>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<DropoutReason>)]
    pub dropout_reason: Option<Option<DropoutReason>>,
    pub institution_id: Option<InstitutionId>,
    pub program_id: Option<ProgramId>,
    pub is_iseop: Option<bool>,
    pub is_work_for_fees: Option<bool>,
    #[validate(length(max = 50))]
    pub work_area: Option<String>,
    #[validate(range(min = 0))]
    pub hours_pledged: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<i32>)]
    pub graduation_year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<FinalGrade>)]
    pub final_grade: Option<Option<FinalGrade>>,
}

impl UpdateStudentDto {
    /// Whether any encrypted column is touched.
    pub fn changes_personal(&self) -> bool {
        self.first_name.is_some()
            || self.last_name.is_some()
            || self.national_id.is_some()
            || self.gender.is_some()
            || self.disability_type.is_some()
    }

    /// Applies the personal fields of this update on top of `current`.
    pub fn merge_personal(&self, current: StudentPersonal) -> StudentPersonal {
        StudentPersonal {
            first_name: self.first_name.clone().unwrap_or(current.first_name),
            last_name: self.last_name.clone().unwrap_or(current.last_name),
            national_id: match &self.national_id {
                Some(value) if value.is_empty() => None,
                Some(value) => Some(value.clone()),
                None => current.national_id,
            },
            gender: self.gender.clone().unwrap_or(current.gender),
            disability_type: self
                .disability_type
                .clone()
                .unwrap_or(current.disability_type),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub institution_id: Option<InstitutionId>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub program_id: Option<ProgramId>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub status: Option<StudentStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub enrollment_year: Option<i32>,
    /// Prefix of the registration number
    pub student_id: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedStudentsResponse {
    pub data: Vec<Student>,
    pub meta: PaginationMeta,
}
