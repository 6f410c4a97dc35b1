//! Seed row types and the seeding configuration.

use campusdesk_models::{
    DepartmentId, DropoutReason, FacilityStatus, FacilityType, FacultyId, FinalGrade,
    InstitutionId, InstitutionStatus, InstitutionType, ProgramId, Province, Qualification,
    StaffPosition, StudentId, StudentStatus, UserId, VacancyStatus,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Rows per multi-value INSERT. The widest seed row has 20 columns, which
/// keeps every statement well under the Postgres bind parameter limit.
pub const BATCH_SIZE: usize = 500;

#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub institutions: usize,
    pub facilities_per_institution: usize,
    pub faculties_per_institution: usize,
    pub departments_per_faculty: usize,
    pub programs_per_department: usize,
    pub students_per_institution: usize,
    pub payments_per_student: usize,
    pub staff_per_institution: usize,
    pub vacancies_per_institution: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            institutions: 5,
            facilities_per_institution: 4,
            faculties_per_institution: 3,
            departments_per_faculty: 2,
            programs_per_department: 2,
            students_per_institution: 50,
            payments_per_student: 2,
            staff_per_institution: 10,
            vacancies_per_institution: 2,
        }
    }
}

impl SeedConfig {
    pub fn new(institutions: usize) -> Self {
        Self {
            institutions,
            ..Default::default()
        }
    }

    pub fn with_facilities(mut self, count: usize) -> Self {
        self.facilities_per_institution = count;
        self
    }

    pub fn with_faculties(mut self, count: usize) -> Self {
        self.faculties_per_institution = count;
        self
    }

    pub fn with_departments(mut self, count: usize) -> Self {
        self.departments_per_faculty = count;
        self
    }

    pub fn with_programs(mut self, count: usize) -> Self {
        self.programs_per_department = count;
        self
    }

    pub fn with_students(mut self, count: usize) -> Self {
        self.students_per_institution = count;
        self
    }

    pub fn with_payments(mut self, count: usize) -> Self {
        self.payments_per_student = count;
        self
    }

    pub fn with_staff(mut self, count: usize) -> Self {
        self.staff_per_institution = count;
        self
    }

    pub fn with_vacancies(mut self, count: usize) -> Self {
        self.vacancies_per_institution = count;
        self
    }
}

#[derive(Debug, Clone)]
pub struct InstitutionSeed {
    pub id: InstitutionId,
    pub name: String,
    pub kind: InstitutionType,
    pub province: Province,
    pub location: String,
    pub address: String,
    pub capacity: i32,
    pub staff: i32,
    pub status: InstitutionStatus,
    pub established: i32,
    pub has_innovation_hub: bool,
}

#[derive(Debug, Clone)]
pub struct FacilitySeed {
    pub institution_id: InstitutionId,
    pub name: String,
    pub facility_type: FacilityType,
    pub building: String,
    pub capacity: i32,
    pub current_usage: i32,
    pub status: FacilityStatus,
    pub manager: String,
}

#[derive(Debug, Clone)]
pub struct FacultySeed {
    pub id: FacultyId,
    pub institution_id: InstitutionId,
    pub name: String,
}

/// A department with the institution of its faculty, which is not a column
/// but is needed to place staff and vacancies.
#[derive(Debug, Clone)]
pub struct DepartmentSeed {
    pub id: DepartmentId,
    pub faculty_id: FacultyId,
    pub institution_id: InstitutionId,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct ProgramSeed {
    pub id: ProgramId,
    pub department_id: DepartmentId,
    pub institution_id: InstitutionId,
    pub name: String,
    pub code: String,
    pub duration_years: i32,
    pub semester_fee: Decimal,
}

/// A student row with its personal columns already sealed.
#[derive(Debug, Clone)]
pub struct StudentSeed {
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
}

#[derive(Debug, Clone)]
pub struct PaymentSeed {
    pub student_id: StudentId,
    pub amount: Decimal,
    pub date_paid: NaiveDate,
    pub reference: String,
}

/// A staff row with its personal columns already sealed.
#[derive(Debug, Clone)]
pub struct StaffSeed {
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
}

#[derive(Debug, Clone)]
pub struct VacancySeed {
    pub institution_id: InstitutionId,
    pub title: String,
    pub faculty_id: FacultyId,
    pub department_id: DepartmentId,
    pub quantity: i32,
    pub deadline: NaiveDate,
    pub description: String,
    pub status: VacancyStatus,
}

/// A mirrored identity-provider account.
#[derive(Debug, Clone)]
pub struct UserSeed {
    pub id: UserId,
    pub email: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: u64,
    pub institutions: u64,
    pub facilities: u64,
    pub faculties: u64,
    pub departments: u64,
    pub programs: u64,
    pub fee_structures: u64,
    pub students: u64,
    pub payments: u64,
    pub staff: u64,
    pub vacancies: u64,
}
