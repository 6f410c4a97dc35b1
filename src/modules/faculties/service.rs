//! Faculties, departments and programs.
//!
//! This catalogue only carries what the rest of the schema points at, so it
//! has no update operations.

use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};

use campusdesk_core::{AppError, FilterClause};
use campusdesk_models::{DepartmentId, FacultyId, InstitutionId, ProgramId};
use campusdesk_observability::{track_record_created, track_record_deleted};

use super::model::{
    CreateDepartmentDto, CreateFacultyDto, CreateProgramDto, Department, DepartmentFilterParams,
    Faculty, FacultyFilterParams, PaginatedDepartmentsResponse, PaginatedFacultiesResponse,
    PaginatedProgramsResponse, Program, ProgramFilterParams,
};

pub struct FacultyService;

impl FacultyService {
    #[instrument(skip(db, dto), fields(faculty.name = %dto.name, db.operation = "INSERT", db.table = "faculties"))]
    pub async fn create_faculty(db: &PgPool, dto: CreateFacultyDto) -> Result<Faculty, AppError> {
        let faculty = sqlx::query_as::<_, Faculty>(
            "INSERT INTO faculties (institution_id, name)
             VALUES ($1, $2)
             RETURNING id, institution_id, name, created_at, updated_at",
        )
        .bind(dto.institution_id)
        .bind(&dto.name)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_db(e, "Faculty"))?;

        track_record_created("faculty");
        info!(faculty.id = %faculty.id, "Faculty created");

        Ok(faculty)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "faculties"))]
    pub async fn get_faculties(
        db: &PgPool,
        filters: FacultyFilterParams,
    ) -> Result<PaginatedFacultiesResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut filter = FilterClause::new();
        if let Some(institution_id) = filters.institution_id {
            filter.eq_cast("institution_id", institution_id, "uuid");
        }

        let count_query = format!("SELECT COUNT(*) FROM faculties WHERE 1=1{}", filter.sql());
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in filter.params() {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Database error counting faculties");
            AppError::database(e)
        })?;

        let data_query = format!(
            "SELECT id, institution_id, name, created_at, updated_at
             FROM faculties WHERE 1=1{} ORDER BY name LIMIT {} OFFSET {}",
            filter.sql(),
            limit,
            offset
        );
        let mut data_sql = sqlx::query_as::<_, Faculty>(&data_query);
        for param in filter.params() {
            data_sql = data_sql.bind(param);
        }
        let faculties = data_sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching faculties");
            AppError::database(e)
        })?;

        Ok(PaginatedFacultiesResponse {
            data: faculties,
            meta: filters.pagination.meta(total),
        })
    }

    #[instrument(skip(db), fields(faculty.id = %id, db.operation = "SELECT", db.table = "faculties"))]
    pub async fn get_faculty(db: &PgPool, id: FacultyId) -> Result<Faculty, AppError> {
        sqlx::query_as::<_, Faculty>(
            "SELECT id, institution_id, name, created_at, updated_at FROM faculties WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| AppError::from_db(e, "Faculty"))?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Faculty not found")))
    }

    #[instrument(skip(db), fields(faculty.id = %id, db.operation = "DELETE", db.table = "faculties"))]
    pub async fn delete_faculty(db: &PgPool, id: FacultyId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM faculties WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| AppError::from_db_delete(e, "Faculty"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Faculty not found")));
        }

        track_record_deleted("faculty");
        info!("Faculty deleted");

        Ok(())
    }

    /// Checks that an optional faculty and department sit inside
    /// `institution_id`, and that the department belongs to the faculty when
    /// both are given.
    ///
    /// A reference to a row that does not exist is a 400, matching what the
    /// foreign key would report. A row that exists elsewhere is a 422.
    #[instrument(skip(db), fields(institution.id = %institution_id))]
    pub async fn ensure_placement(
        db: &PgPool,
        institution_id: InstitutionId,
        faculty_id: Option<FacultyId>,
        department_id: Option<DepartmentId>,
    ) -> Result<(), AppError> {
        if let Some(faculty_id) = faculty_id {
            let owner = sqlx::query_scalar::<_, InstitutionId>(
                "SELECT institution_id FROM faculties WHERE id = $1",
            )
            .bind(faculty_id)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Faculty does not exist")))?;

            if owner != institution_id {
                warn!(faculty.id = %faculty_id, "Faculty belongs to another institution");
                return Err(AppError::unprocessable(anyhow::anyhow!(
                    "Faculty does not belong to the institution"
                )));
            }
        }

        if let Some(department_id) = department_id {
            let (owner, parent) = sqlx::query_as::<_, (InstitutionId, FacultyId)>(
                "SELECT f.institution_id, d.faculty_id
                 FROM departments d
                 JOIN faculties f ON f.id = d.faculty_id
                 WHERE d.id = $1",
            )
            .bind(department_id)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Department does not exist")))?;

            if owner != institution_id {
                warn!(department.id = %department_id, "Department belongs to another institution");
                return Err(AppError::unprocessable(anyhow::anyhow!(
                    "Department does not belong to the institution"
                )));
            }
            if let Some(faculty_id) = faculty_id
                && parent != faculty_id
            {
                warn!(department.id = %department_id, faculty.id = %faculty_id, "Department belongs to another faculty");
                return Err(AppError::unprocessable(anyhow::anyhow!(
                    "Department does not belong to the faculty"
                )));
            }
        }

        Ok(())
    }

    /// Checks that a program is offered by the institution, through its
    /// department and faculty. A missing program is a 400, a program of
    /// another institution a 422.
    pub async fn ensure_program_placement(
        db: &PgPool,
        institution_id: InstitutionId,
        program_id: ProgramId,
    ) -> Result<(), AppError> {
        let owner = sqlx::query_scalar::<_, InstitutionId>(
            "SELECT f.institution_id
             FROM programs p
             JOIN departments d ON d.id = p.department_id
             JOIN faculties f ON f.id = d.faculty_id
             WHERE p.id = $1",
        )
        .bind(program_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Program does not exist")))?;

        if owner != institution_id {
            warn!(program.id = %program_id, "Program belongs to another institution");
            return Err(AppError::unprocessable(anyhow::anyhow!(
                "Program is not offered by the institution"
            )));
        }
        Ok(())
    }
}

pub struct DepartmentService;

impl DepartmentService {
    #[instrument(skip(db, dto), fields(department.name = %dto.name, db.operation = "INSERT", db.table = "departments"))]
    pub async fn create_department(
        db: &PgPool,
        dto: CreateDepartmentDto,
    ) -> Result<Department, AppError> {
        let department = sqlx::query_as::<_, Department>(
            "INSERT INTO departments (faculty_id, name)
             VALUES ($1, $2)
             RETURNING id, faculty_id, name, created_at, updated_at",
        )
        .bind(dto.faculty_id)
        .bind(&dto.name)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_db(e, "Department"))?;

        track_record_created("department");
        info!(department.id = %department.id, "Department created");

        Ok(department)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "departments"))]
    pub async fn get_departments(
        db: &PgPool,
        filters: DepartmentFilterParams,
    ) -> Result<PaginatedDepartmentsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut filter = FilterClause::new();
        if let Some(faculty_id) = filters.faculty_id {
            filter.eq_cast("faculty_id", faculty_id, "uuid");
        }

        let count_query = format!("SELECT COUNT(*) FROM departments WHERE 1=1{}", filter.sql());
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in filter.params() {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Database error counting departments");
            AppError::database(e)
        })?;

        let data_query = format!(
            "SELECT id, faculty_id, name, created_at, updated_at
             FROM departments WHERE 1=1{} ORDER BY name LIMIT {} OFFSET {}",
            filter.sql(),
            limit,
            offset
        );
        let mut data_sql = sqlx::query_as::<_, Department>(&data_query);
        for param in filter.params() {
            data_sql = data_sql.bind(param);
        }
        let departments = data_sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching departments");
            AppError::database(e)
        })?;

        Ok(PaginatedDepartmentsResponse {
            data: departments,
            meta: filters.pagination.meta(total),
        })
    }

    #[instrument(skip(db), fields(department.id = %id, db.operation = "SELECT", db.table = "departments"))]
    pub async fn get_department(db: &PgPool, id: DepartmentId) -> Result<Department, AppError> {
        sqlx::query_as::<_, Department>(
            "SELECT id, faculty_id, name, created_at, updated_at FROM departments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| AppError::from_db(e, "Department"))?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Department not found")))
    }

    #[instrument(skip(db), fields(department.id = %id, db.operation = "DELETE", db.table = "departments"))]
    pub async fn delete_department(db: &PgPool, id: DepartmentId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| AppError::from_db_delete(e, "Department"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Department not found")));
        }

        track_record_deleted("department");
        info!("Department deleted");

        Ok(())
    }
}

pub struct ProgramService;

impl ProgramService {
    #[instrument(skip(db, dto), fields(program.code = %dto.code, db.operation = "INSERT", db.table = "programs"))]
    pub async fn create_program(db: &PgPool, dto: CreateProgramDto) -> Result<Program, AppError> {
        debug!(program.name = %dto.name, "Creating program");

        let program = sqlx::query_as::<_, Program>(
            "INSERT INTO programs (department_id, name, code, duration_years)
             VALUES ($1, $2, $3, $4)
             RETURNING id, department_id, name, code, duration_years, created_at, updated_at",
        )
        .bind(dto.department_id)
        .bind(&dto.name)
        .bind(&dto.code)
        .bind(dto.duration_years)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from_db(e, "Program"))?;

        track_record_created("program");
        info!(program.id = %program.id, "Program created");

        Ok(program)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "programs"))]
    pub async fn get_programs(
        db: &PgPool,
        filters: ProgramFilterParams,
    ) -> Result<PaginatedProgramsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut filter = FilterClause::new();
        if let Some(department_id) = filters.department_id {
            filter.eq_cast("department_id", department_id, "uuid");
        }

        let count_query = format!("SELECT COUNT(*) FROM programs WHERE 1=1{}", filter.sql());
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in filter.params() {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Database error counting programs");
            AppError::database(e)
        })?;

        let data_query = format!(
            "SELECT id, department_id, name, code, duration_years, created_at, updated_at
             FROM programs WHERE 1=1{} ORDER BY code LIMIT {} OFFSET {}",
            filter.sql(),
            limit,
            offset
        );
        let mut data_sql = sqlx::query_as::<_, Program>(&data_query);
        for param in filter.params() {
            data_sql = data_sql.bind(param);
        }
        let programs = data_sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching programs");
            AppError::database(e)
        })?;

        Ok(PaginatedProgramsResponse {
            data: programs,
            meta: filters.pagination.meta(total),
        })
    }

    #[instrument(skip(db), fields(program.id = %id, db.operation = "SELECT", db.table = "programs"))]
    pub async fn get_program(db: &PgPool, id: ProgramId) -> Result<Program, AppError> {
        sqlx::query_as::<_, Program>(
            "SELECT id, department_id, name, code, duration_years, created_at, updated_at
             FROM programs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| AppError::from_db(e, "Program"))?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Program not found")))
    }

    /// Refused with 409 while students are enrolled in the program.
    #[instrument(skip(db), fields(program.id = %id, db.operation = "DELETE", db.table = "programs"))]
    pub async fn delete_program(db: &PgPool, id: ProgramId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM programs WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| AppError::from_db_delete(e, "Program"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Program not found")));
        }

        track_record_deleted("program");
        info!("Program deleted");

        Ok(())
    }
}
