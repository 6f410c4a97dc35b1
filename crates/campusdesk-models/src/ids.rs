//! Typed row keys.
//!
//! Every table is keyed by a UUID. Giving each table its own key type stops a
//! `ProgramId` from being bound where an `InstitutionId` belongs. On the wire
//! and in Postgres the keys are plain UUIDs.
//!
//! [`StudentId`] is the row key of a student. The registration number an
//! institution issues lives in the separate `student_id` text column.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;
use uuid::Uuid;

macro_rules! row_key {
    ($($(#[$doc:meta])* $name:ident),+ $(,)?) => {$(
        $(#[$doc])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
        #[serde(transparent)]
        #[sqlx(transparent)]
        #[schema(value_type = String, format = "uuid")]
        pub struct $name(pub Uuid);

        impl $name {
            /// A fresh random key, for rows whose id is chosen before insert.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&format_args!("{}", self.0)).finish()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    )+};
}

row_key!(
    /// Account in the external identity provider.
    UserId,
    InstitutionId,
    FacilityId,
    FacultyId,
    DepartmentId,
    ProgramId,
    /// Row key of a student, not the registration number.
    StudentId,
    FeeStructureId,
    PaymentId,
    StaffId,
    VacancyId,
);

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "12345678-1234-1234-1234-123456789abc";

    #[test]
    fn keys_convert_to_and_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = InstitutionId::from(uuid);
        assert_eq!(id.into_inner(), uuid);
        assert_eq!(Uuid::from(id), uuid);
        assert_ne!(InstitutionId::new(), InstitutionId::new());
    }

    #[test]
    fn debug_output_names_the_table_key() {
        let id: StudentId = RAW.parse().unwrap();
        assert_eq!(format!("{:?}", id), format!("StudentId({})", RAW));
        assert_eq!(id.to_string(), RAW);
    }

    #[test]
    fn parsing_rejects_garbage() {
        assert!("not-a-uuid".parse::<ProgramId>().is_err());
        assert!("".parse::<ProgramId>().is_err());
    }

    #[test]
    fn json_form_is_the_bare_uuid() {
        let id = StaffId::from(Uuid::from_u128(1));
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""00000000-0000-0000-0000-000000000001""#);
        assert_eq!(serde_json::from_str::<StaffId>(&json).unwrap(), id);
    }
}
