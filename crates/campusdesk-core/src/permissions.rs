//! Permission codenames for the Campusdesk API.
//!
//! Authentication and authorisation are handled by the gateway in front of
//! this service. The schema still declares which permissions exist so the
//! authoriser can load them from `GET /api/permissions`.
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_core::permissions;
//!
//! assert!(permissions::ALL.iter().any(|p| p.codename == permissions::STUDENTS_CREATE));
//! ```

use serde::Serialize;
use utoipa::ToSchema;

/// A declared permission with its human-readable description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PermissionDef {
    pub codename: &'static str,
    pub description: &'static str,
}

// =============================================================================
// Institutions permissions
// =============================================================================

pub const INSTITUTIONS_CREATE: &str = "institutions:create";
pub const INSTITUTIONS_READ: &str = "institutions:read";
pub const INSTITUTIONS_UPDATE: &str = "institutions:update";
pub const INSTITUTIONS_DELETE: &str = "institutions:delete";

// =============================================================================
// Facilities permissions
// =============================================================================

pub const FACILITIES_CREATE: &str = "facilities:create";
pub const FACILITIES_READ: &str = "facilities:read";
pub const FACILITIES_UPDATE: &str = "facilities:update";
pub const FACILITIES_DELETE: &str = "facilities:delete";

// =============================================================================
// Faculties, departments and programs
// =============================================================================

pub const FACULTIES_MANAGE: &str = "faculties:manage";
pub const FACULTIES_READ: &str = "faculties:read";

// =============================================================================
// Students permissions
// =============================================================================

pub const STUDENTS_CREATE: &str = "students:create";
pub const STUDENTS_READ: &str = "students:read";
pub const STUDENTS_UPDATE: &str = "students:update";
pub const STUDENTS_DELETE: &str = "students:delete";
/// Edit students that belong to the caller's own institution.
pub const EDIT_STUDENT_INSTITUTION: &str = "edit_student_institution";

// =============================================================================
// Fees and payments
// =============================================================================

pub const FEES_MANAGE: &str = "fees:manage";
pub const FEES_READ: &str = "fees:read";
pub const PAYMENTS_CREATE: &str = "payments:create";
pub const PAYMENTS_READ: &str = "payments:read";
pub const PAYMENTS_DELETE: &str = "payments:delete";

// =============================================================================
// Staff permissions
// =============================================================================

pub const STAFF_CREATE: &str = "staff:create";
pub const STAFF_READ: &str = "staff:read";
pub const STAFF_UPDATE: &str = "staff:update";
pub const STAFF_DELETE: &str = "staff:delete";
/// View staff of the caller's own institution.
pub const VIEW_STAFF_INSTITUTION: &str = "view_staff_institution";
/// Edit staff of the caller's own institution.
pub const EDIT_STAFF_INSTITUTION: &str = "edit_staff_institution";

// =============================================================================
// Vacancies permissions
// =============================================================================

pub const VACANCIES_CREATE: &str = "vacancies:create";
pub const VACANCIES_READ: &str = "vacancies:read";
pub const VACANCIES_UPDATE: &str = "vacancies:update";
pub const VACANCIES_DELETE: &str = "vacancies:delete";

const fn def(codename: &'static str, description: &'static str) -> PermissionDef {
    PermissionDef {
        codename,
        description,
    }
}

/// Every declared permission, in display order.
pub const ALL: &[PermissionDef] = &[
    def(INSTITUTIONS_CREATE, "Can create institutions"),
    def(INSTITUTIONS_READ, "Can view institutions"),
    def(INSTITUTIONS_UPDATE, "Can edit institutions"),
    def(INSTITUTIONS_DELETE, "Can delete institutions"),
    def(FACILITIES_CREATE, "Can create facilities"),
    def(FACILITIES_READ, "Can view facilities"),
    def(FACILITIES_UPDATE, "Can edit facilities"),
    def(FACILITIES_DELETE, "Can delete facilities"),
    def(FACULTIES_MANAGE, "Can manage faculties, departments and programs"),
    def(FACULTIES_READ, "Can view faculties, departments and programs"),
    def(STUDENTS_CREATE, "Can create students"),
    def(STUDENTS_READ, "Can view students"),
    def(STUDENTS_UPDATE, "Can edit students"),
    def(STUDENTS_DELETE, "Can delete students"),
    def(
        EDIT_STUDENT_INSTITUTION,
        "Can edit students belonging to own institution",
    ),
    def(FEES_MANAGE, "Can manage fee structures"),
    def(FEES_READ, "Can view fee structures"),
    def(PAYMENTS_CREATE, "Can record payments"),
    def(PAYMENTS_READ, "Can view payments"),
    def(PAYMENTS_DELETE, "Can delete payments"),
    def(STAFF_CREATE, "Can create staff members"),
    def(STAFF_READ, "Can view staff members"),
    def(STAFF_UPDATE, "Can edit staff members"),
    def(STAFF_DELETE, "Can delete staff members"),
    def(VIEW_STAFF_INSTITUTION, "Can view staff of own institution"),
    def(EDIT_STAFF_INSTITUTION, "Can edit staff of own institution"),
    def(VACANCIES_CREATE, "Can create vacancies"),
    def(VACANCIES_READ, "Can view vacancies"),
    def(VACANCIES_UPDATE, "Can edit vacancies"),
    def(VACANCIES_DELETE, "Can delete vacancies"),
];
