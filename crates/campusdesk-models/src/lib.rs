//! # Campusdesk Models
//!
//! Domain models and DTOs for the Campusdesk API.
//!
//! This crate provides all data structures used throughout the Campusdesk application,
//! including database entities, request/response DTOs, and validation schemas.
//!
//! # Modules
//!
//! - [`choices`]: Enumerations stored as constrained text columns
//! - [`ids`]: Typed UUID keys
//! - [`value_types`]: Validated primitives such as [`value_types::Email`]
//! - [`institutions`], [`facilities`], [`faculties`]: Institutional catalogue
//! - [`students`], [`staff`]: People, with sealed personal columns
//! - [`fees`]: Fee structures and payments
//! - [`vacancies`]: Advertised posts
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_models::students::{StudentRecord, Student};
//!
//! let student: Student = record.open(&cipher)?;
//! println!("{} ({})", student.full_name(), student);
//! ```

pub mod choices;
pub mod facilities;
pub mod faculties;
pub mod fees;
pub mod ids;
pub mod institutions;
pub mod staff;
pub mod students;
pub mod vacancies;
pub mod value_types;

// Re-export commonly used types at crate root for convenience
pub use choices::{
    DropoutReason, FacilityStatus, FacilityType, FinalGrade, InstitutionStatus, InstitutionType,
    InvalidChoice, Province, Qualification, StaffPosition, StudentStatus, VacancyStatus,
};

pub use ids::{
    DepartmentId, FacilityId, FacultyId, FeeStructureId, InstitutionId, PaymentId, ProgramId,
    StaffId, StudentId, UserId, VacancyId,
};

pub use value_types::{Email, ValueTypeError};

pub use institutions::{
    CreateInstitutionDto, Institution, InstitutionFilterParams, PaginatedInstitutionsResponse,
    UpdateInstitutionDto,
};

pub use facilities::{
    CreateFacilityDto, Facility, FacilityFilterParams, PaginatedFacilitiesResponse,
    UpdateFacilityDto,
};

pub use faculties::{
    CreateDepartmentDto, CreateFacultyDto, CreateProgramDto, Department, DepartmentFilterParams,
    Faculty, FacultyFilterParams, PaginatedDepartmentsResponse, PaginatedFacultiesResponse,
    PaginatedProgramsResponse, Program, ProgramFilterParams,
};

pub use students::{
    CreateStudentDto, PaginatedStudentsResponse, SealedStudentPersonal, Student,
    StudentFilterParams, StudentPersonal, StudentRecord, UpdateStudentDto,
};

pub use staff::{
    CreateStaffDto, PaginatedStaffResponse, SealedStaffPersonal, Staff, StaffFilterParams,
    StaffPersonal, StaffRecord, UpdateStaffDto,
};

pub use fees::{
    CreateFeeStructureDto, CreatePaymentDto, FeeStructure, FeeStructureFilterParams,
    PaginatedFeeStructuresResponse, PaginatedPaymentsResponse, Payment, PaymentFilterParams,
    UpdateFeeStructureDto,
};

pub use vacancies::{
    CreateVacancyDto, PaginatedVacanciesResponse, UpdateVacancyDto, Vacancy, VacancyFilterParams,
};
