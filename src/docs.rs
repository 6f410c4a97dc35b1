use utoipa::OpenApi;

use campusdesk_core::permissions::PermissionDef;
use campusdesk_core::{PaginationMeta, PaginationParams};
use campusdesk_models::{
    CreateDepartmentDto, CreateFacilityDto, CreateFacultyDto, CreateFeeStructureDto,
    CreateInstitutionDto, CreatePaymentDto, CreateProgramDto, CreateStaffDto, CreateStudentDto,
    CreateVacancyDto, Department, DropoutReason, Email, Facility, FacilityStatus, FacilityType,
    Faculty, FeeStructure, FinalGrade, Institution, InstitutionStatus, InstitutionType,
    PaginatedDepartmentsResponse, PaginatedFacilitiesResponse, PaginatedFacultiesResponse,
    PaginatedFeeStructuresResponse, PaginatedInstitutionsResponse, PaginatedPaymentsResponse,
    PaginatedProgramsResponse, PaginatedStaffResponse, PaginatedStudentsResponse,
    PaginatedVacanciesResponse, Payment, Program, Province, Qualification, Staff, StaffPosition,
    Student, StudentStatus, UpdateFacilityDto, UpdateFeeStructureDto, UpdateInstitutionDto,
    UpdateStaffDto, UpdateStudentDto, UpdateVacancyDto, Vacancy, VacancyStatus,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::institutions::controller::create_institution,
        crate::modules::institutions::controller::get_institutions,
        crate::modules::institutions::controller::get_institution,
        crate::modules::institutions::controller::update_institution,
        crate::modules::institutions::controller::delete_institution,
        crate::modules::institutions::controller::get_institution_facilities,
        crate::modules::institutions::controller::get_institution_students,
        crate::modules::institutions::controller::get_institution_staff,
        crate::modules::institutions::controller::get_institution_vacancies,
        crate::modules::facilities::controller::create_facility,
        crate::modules::facilities::controller::get_facilities,
        crate::modules::facilities::controller::get_facility,
        crate::modules::facilities::controller::update_facility,
        crate::modules::facilities::controller::delete_facility,
        crate::modules::faculties::controller::create_faculty,
        crate::modules::faculties::controller::get_faculties,
        crate::modules::faculties::controller::get_faculty,
        crate::modules::faculties::controller::delete_faculty,
        crate::modules::faculties::controller::create_department,
        crate::modules::faculties::controller::get_departments,
        crate::modules::faculties::controller::get_department,
        crate::modules::faculties::controller::delete_department,
        crate::modules::faculties::controller::create_program,
        crate::modules::faculties::controller::get_programs,
        crate::modules::faculties::controller::get_program,
        crate::modules::faculties::controller::delete_program,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::students::controller::get_student_payments,
        crate::modules::fees::controller::create_fee_structure,
        crate::modules::fees::controller::get_fee_structures,
        crate::modules::fees::controller::get_fee_structure,
        crate::modules::fees::controller::get_program_fees,
        crate::modules::fees::controller::update_fee_structure,
        crate::modules::fees::controller::delete_fee_structure,
        crate::modules::payments::controller::create_payment,
        crate::modules::payments::controller::get_payments,
        crate::modules::payments::controller::get_payment,
        crate::modules::payments::controller::delete_payment,
        crate::modules::staff::controller::create_staff,
        crate::modules::staff::controller::get_staff,
        crate::modules::staff::controller::get_staff_member,
        crate::modules::staff::controller::update_staff,
        crate::modules::staff::controller::delete_staff,
        crate::modules::vacancies::controller::create_vacancy,
        crate::modules::vacancies::controller::get_vacancies,
        crate::modules::vacancies::controller::get_vacancy,
        crate::modules::vacancies::controller::update_vacancy,
        crate::modules::vacancies::controller::delete_vacancy,
        crate::modules::permissions::controller::get_permissions,
    ),
    components(
        schemas(
            InstitutionType,
            InstitutionStatus,
            Province,
            StudentStatus,
            DropoutReason,
            FinalGrade,
            FacilityType,
            FacilityStatus,
            StaffPosition,
            Qualification,
            VacancyStatus,
            Email,
            Institution,
            CreateInstitutionDto,
            UpdateInstitutionDto,
            PaginatedInstitutionsResponse,
            Facility,
            CreateFacilityDto,
            UpdateFacilityDto,
            PaginatedFacilitiesResponse,
            Faculty,
            CreateFacultyDto,
            PaginatedFacultiesResponse,
            Department,
            CreateDepartmentDto,
            PaginatedDepartmentsResponse,
            Program,
            CreateProgramDto,
            PaginatedProgramsResponse,
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            PaginatedStudentsResponse,
            FeeStructure,
            CreateFeeStructureDto,
            UpdateFeeStructureDto,
            PaginatedFeeStructuresResponse,
            Payment,
            CreatePaymentDto,
            PaginatedPaymentsResponse,
            Staff,
            CreateStaffDto,
            UpdateStaffDto,
            PaginatedStaffResponse,
            Vacancy,
            CreateVacancyDto,
            UpdateVacancyDto,
            PaginatedVacanciesResponse,
            PermissionDef,
            PaginationMeta,
            PaginationParams,
        )
    ),
    tags(
        (name = "Institutions", description = "Polytechnics, teachers colleges and training centres"),
        (name = "Facilities", description = "Buildings and amenities of an institution"),
        (name = "Faculties", description = "Faculties of an institution"),
        (name = "Departments", description = "Departments of a faculty"),
        (name = "Programs", description = "Programs offered by a department"),
        (name = "Students", description = "Student records with encrypted personal details"),
        (name = "Fees", description = "Semester fee per program"),
        (name = "Payments", description = "Fee payments made by students"),
        (name = "Staff", description = "Staff records with encrypted personal details"),
        (name = "Vacancies", description = "Advertised posts"),
        (name = "Permissions", description = "Permission codenames for the gateway authoriser")
    ),
    info(
        title = "Campusdesk API",
        version = "0.1.0",
        description = "Records API for tertiary institutions: institutions, students, fees, staff and vacancies. Authentication is handled by the gateway in front of this service.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
