//! Choice enumerations.
//!
//! Each choice is stored as its value in a `VARCHAR` column guarded by a
//! `CHECK` constraint, serialized as that same value in JSON, and carries a
//! separate human-readable label (e.g. stored `"Renovation"`, label
//! `"Under Renovation"`).

use serde::{Deserialize, Serialize};
use sqlx::{Database, Decode, Encode, Type, postgres::PgTypeInfo};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Returned when a string is not one of a choice's stored values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidChoice {
    pub choice: &'static str,
    pub value: String,
}

impl fmt::Display for InvalidChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid {}", self.value, self.choice)
    }
}

impl std::error::Error for InvalidChoice {}

macro_rules! define_choice {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => ($value:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The value stored in the database and used on the wire.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            /// Human-readable label.
            pub const fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = InvalidChoice;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    other => Err(InvalidChoice {
                        choice: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl Type<sqlx::Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <String as Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <String as Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'q> Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <sqlx::Postgres as Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <&str as Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
            }
        }

        impl<'r> Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: <sqlx::Postgres as Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let s = <&str as Decode<'r, sqlx::Postgres>>::decode(value)?;
                Ok(s.parse::<$name>()?)
            }
        }
    };
}

define_choice!(
    InstitutionType {
        Polytechnic => ("Polytechnic", "Polytechnic"),
        TeachersCollege => ("Teachers College", "Teachers College"),
        IndustrialTraining => ("Industrial Training", "Industrial Training"),
        Other => ("Other", "Other"),
    }
);

define_choice!(
    InstitutionStatus {
        Active => ("Active", "Active"),
        Renovation => ("Renovation", "Under Renovation"),
        Closed => ("Closed", "Closed"),
    }
);

define_choice!(
    /// The ten provinces of Zimbabwe.
    Province {
        Harare => ("Harare", "Harare"),
        Bulawayo => ("Bulawayo", "Bulawayo"),
        Midlands => ("Midlands", "Midlands"),
        Manicaland => ("Manicaland", "Manicaland"),
        Masvingo => ("Masvingo", "Masvingo"),
        MashonalandEast => ("Mashonaland East", "Mashonaland East"),
        MashonalandWest => ("Mashonaland West", "Mashonaland West"),
        MashonalandCentral => ("Mashonaland Central", "Mashonaland Central"),
        MatabelelandNorth => ("Matabeleland North", "Matabeleland North"),
        MatabelelandSouth => ("Matabeleland South", "Matabeleland South"),
    }
);

define_choice!(
    StudentStatus {
        Active => ("Active", "Active"),
        Attachment => ("Attachment", "On Attachment"),
        Graduated => ("Graduated", "Graduated"),
        Suspended => ("Suspended", "Suspended"),
        Deferred => ("Deferred", "Deferred"),
        Dropout => ("Dropout", "Dropout"),
    }
);

define_choice!(
    DropoutReason {
        Financial => ("Financial", "Financial Hardship"),
        Academic => ("Academic", "Academic Failure"),
        Medical => ("Medical", "Health/Medical"),
        Personal => ("Personal", "Personal/Family Issues"),
        Transfer => ("Transfer", "Transfer"),
        Other => ("Other", "Other"),
    }
);

define_choice!(
    FinalGrade {
        Distinction => ("Distinction", "Distinction"),
        Credit => ("Credit", "Credit"),
        Pass => ("Pass", "Pass"),
        Fail => ("Fail", "Fail"),
    }
);

define_choice!(
    FacilityType {
        Accommodation => ("Accommodation", "Accommodation"),
        Laboratory => ("Laboratory", "Laboratory"),
        Library => ("Library", "Library"),
        Sports => ("Sports", "Sports Facility"),
        Innovation => ("Innovation", "Innovation Center"),
        Other => ("Other", "Other"),
    }
);

define_choice!(
    FacilityStatus {
        Active => ("Active", "Active"),
        Maintenance => ("Maintenance", "Under Maintenance"),
        Inactive => ("Inactive", "Inactive"),
    }
);

define_choice!(
    StaffPosition {
        Professor => ("Professor", "Professor"),
        Lecturer => ("Lecturer", "Lecturer"),
        Assistant => ("Assistant", "Assistant Lecturer"),
        Admin => ("Admin", "Administrative Staff"),
        Other => ("Other", "Other"),
    }
);

define_choice!(
    Qualification {
        PhD => ("PhD", "PhD"),
        Masters => ("Masters", "Masters"),
        Bachelors => ("Bachelors", "Bachelors"),
        Diploma => ("Diploma", "Diploma"),
        Certificate => ("Certificate", "Certificate"),
        Other => ("Other", "Other"),
    }
);

define_choice!(
    VacancyStatus {
        Open => ("Open", "Open"),
        Closed => ("Closed", "Closed"),
    }
);

impl Default for InstitutionStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl Default for Province {
    fn default() -> Self {
        Self::Harare
    }
}

impl Default for StudentStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl Default for FacilityType {
    fn default() -> Self {
        Self::Other
    }
}

impl Default for FacilityStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl Default for VacancyStatus {
    fn default() -> Self {
        Self::Open
    }
}
