use campusdesk_crypto::FieldCipher;
use sqlx::PgPool;
use tracing::{debug, error, info, instrument};

use campusdesk_core::{AppError, FilterClause};
use campusdesk_models::StudentId;
use campusdesk_observability::{track_record_created, track_record_deleted};

use crate::modules::faculties::service::FacultyService;
use crate::sealing::{open_failed, seal_failed};

use super::model::{
    CreateStudentDto, PaginatedStudentsResponse, Student, StudentFilterParams, StudentRecord,
    UpdateStudentDto,
};

const STUDENT_COLUMNS: &str = "id, user_id, student_id, first_name, last_name, national_id, \
     gender, disability_type, date_of_birth, enrollment_year, status, dropout_reason, \
     institution_id, program_id, is_iseop, is_work_for_fees, work_area, hours_pledged, \
     graduation_year, final_grade, created_at, updated_at";

fn open_record(record: StudentRecord, cipher: &FieldCipher) -> Result<Student, AppError> {
    let id = record.id;
    record
        .open(cipher)
        .map_err(|e| open_failed("student", id, e))
}

/// An empty `work_area` is stored as NULL.
fn normalize_work_area(work_area: Option<String>) -> Option<String> {
    work_area.filter(|area| !area.is_empty())
}

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db, cipher, dto), fields(student.student_id = %dto.student_id, db.operation = "INSERT", db.table = "students"))]
    pub async fn create_student(
        db: &PgPool,
        cipher: &FieldCipher,
        dto: CreateStudentDto,
    ) -> Result<Student, AppError> {
        debug!(institution.id = %dto.institution_id, program.id = %dto.program_id, "Creating student");
        FacultyService::ensure_program_placement(db, dto.institution_id, dto.program_id).await?;

        let sealed = dto
            .personal()
            .seal(cipher)
            .map_err(|e| seal_failed("student", e))?;

        let query = format!(
            "INSERT INTO students
                (user_id, student_id, first_name, last_name, national_id, gender, disability_type,
                 date_of_birth, enrollment_year, status, dropout_reason, institution_id, program_id,
                 is_iseop, is_work_for_fees, work_area, hours_pledged, graduation_year, final_grade)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
             RETURNING {}",
            STUDENT_COLUMNS
        );

        let record = sqlx::query_as::<_, StudentRecord>(&query)
            .bind(dto.user_id)
            .bind(&dto.student_id)
            .bind(&sealed.first_name)
            .bind(&sealed.last_name)
            .bind(&sealed.national_id)
            .bind(&sealed.gender)
            .bind(&sealed.disability_type)
            .bind(dto.date_of_birth)
            .bind(dto.enrollment_year)
            .bind(dto.status)
            .bind(dto.dropout_reason)
            .bind(dto.institution_id)
            .bind(dto.program_id)
            .bind(dto.is_iseop)
            .bind(dto.is_work_for_fees)
            .bind(normalize_work_area(dto.work_area))
            .bind(dto.hours_pledged)
            .bind(dto.graduation_year)
            .bind(dto.final_grade)
            .fetch_one(db)
            .await
            .map_err(|e| AppError::from_db(e, "Student"))?;

        let student = open_record(record, cipher)?;

        track_record_created("student");
        info!(student.id = %student.id, student.student_id = %student.student_id, "Student created");

        Ok(student)
    }

    /// Lists students ordered by registration number.
    ///
    /// Only plaintext columns can be filtered on. Personal details are opened
    /// after the page is fetched.
    #[instrument(skip(db, cipher, filters), fields(db.operation = "SELECT", db.table = "students"))]
    pub async fn get_students(
        db: &PgPool,
        cipher: &FieldCipher,
        filters: StudentFilterParams,
    ) -> Result<PaginatedStudentsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        debug!(
            limit = %limit,
            offset = %offset,
            filter.institution_id = ?filters.institution_id,
            filter.program_id = ?filters.program_id,
            filter.status = ?filters.status,
            filter.enrollment_year = ?filters.enrollment_year,
            filter.student_id = ?filters.student_id,
            "Fetching students"
        );

        let mut filter = FilterClause::new();
        if let Some(institution_id) = filters.institution_id {
            filter.eq_cast("institution_id", institution_id, "uuid");
        }
        if let Some(program_id) = filters.program_id {
            filter.eq_cast("program_id", program_id, "uuid");
        }
        if let Some(status) = filters.status {
            filter.eq("status", status);
        }
        if let Some(year) = filters.enrollment_year {
            filter.eq_cast("enrollment_year", year, "int");
        }
        if let Some(prefix) = filters.student_id.as_deref().filter(|p| !p.is_empty()) {
            filter.starts_with("student_id", prefix);
        }

        let count_query = format!("SELECT COUNT(*) FROM students WHERE 1=1{}", filter.sql());
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in filter.params() {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Database error counting students");
            AppError::database(e)
        })?;

        let data_query = format!(
            "SELECT {} FROM students WHERE 1=1{} ORDER BY student_id LIMIT {} OFFSET {}",
            STUDENT_COLUMNS,
            filter.sql(),
            limit,
            offset
        );
        let mut data_sql = sqlx::query_as::<_, StudentRecord>(&data_query);
        for param in filter.params() {
            data_sql = data_sql.bind(param);
        }
        let records = data_sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching students");
            AppError::database(e)
        })?;

        let students = records
            .into_iter()
            .map(|record| open_record(record, cipher))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(total = %total, returned = students.len(), "Students fetched");

        Ok(PaginatedStudentsResponse {
            data: students,
            meta: filters.pagination.meta(total),
        })
    }

    async fn fetch_record(db: &PgPool, id: StudentId) -> Result<StudentRecord, AppError> {
        let query = format!("SELECT {} FROM students WHERE id = $1", STUDENT_COLUMNS);
        sqlx::query_as::<_, StudentRecord>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(|e| AppError::from_db(e, "Student"))?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }

    #[instrument(skip(db, cipher), fields(student.id = %id, db.operation = "SELECT", db.table = "students"))]
    pub async fn get_student(
        db: &PgPool,
        cipher: &FieldCipher,
        id: StudentId,
    ) -> Result<Student, AppError> {
        let record = Self::fetch_record(db, id).await?;
        open_record(record, cipher)
    }

    pub async fn ensure_exists(db: &PgPool, id: StudentId) -> Result<(), AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM students WHERE id = $1)")
                .bind(id)
                .fetch_one(db)
                .await
                .map_err(AppError::database)?;

        if exists {
            Ok(())
        } else {
            Err(AppError::not_found(anyhow::anyhow!("Student not found")))
        }
    }

    /// Partial update. Personal columns are re-sealed only when one of them
    /// changes; otherwise the stored bytes are written back untouched.
    #[instrument(skip(db, cipher, dto), fields(student.id = %id, db.operation = "UPDATE", db.table = "students"))]
    pub async fn update_student(
        db: &PgPool,
        cipher: &FieldCipher,
        id: StudentId,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let existing = Self::fetch_record(db, id).await?;

        let institution_id = dto.institution_id.unwrap_or(existing.institution_id);
        let program_id = dto.program_id.unwrap_or(existing.program_id);
        if dto.institution_id.is_some() || dto.program_id.is_some() {
            FacultyService::ensure_program_placement(db, institution_id, program_id).await?;
        }

        let (first_name, last_name, national_id, gender, disability_type) =
            if dto.changes_personal() {
                let current = open_record(existing.clone(), cipher)?.personal();
                let sealed = dto
                    .merge_personal(current)
                    .seal(cipher)
                    .map_err(|e| seal_failed("student", e))?;
                (
                    sealed.first_name,
                    sealed.last_name,
                    sealed.national_id,
                    sealed.gender,
                    sealed.disability_type,
                )
            } else {
                (
                    existing.first_name,
                    existing.last_name,
                    existing.national_id,
                    existing.gender,
                    existing.disability_type,
                )
            };

        let work_area = match dto.work_area {
            Some(area) => normalize_work_area(Some(area)),
            None => existing.work_area,
        };

        let query = format!(
            "UPDATE students
             SET user_id = $1, student_id = $2, first_name = $3, last_name = $4,
                 national_id = $5, gender = $6, disability_type = $7, date_of_birth = $8,
                 enrollment_year = $9, status = $10, dropout_reason = $11,
                 institution_id = $12, program_id = $13, is_iseop = $14,
                 is_work_for_fees = $15, work_area = $16, hours_pledged = $17,
                 graduation_year = $18, final_grade = $19, updated_at = NOW()
             WHERE id = $20
             RETURNING {}",
            STUDENT_COLUMNS
        );

        let record = sqlx::query_as::<_, StudentRecord>(&query)
            .bind(dto.user_id.unwrap_or(existing.user_id))
            .bind(dto.student_id.unwrap_or(existing.student_id))
            .bind(first_name)
            .bind(last_name)
            .bind(national_id)
            .bind(gender)
            .bind(disability_type)
            .bind(dto.date_of_birth.unwrap_or(existing.date_of_birth))
            .bind(dto.enrollment_year.unwrap_or(existing.enrollment_year))
            .bind(dto.status.unwrap_or(existing.status))
            .bind(dto.dropout_reason.unwrap_or(existing.dropout_reason))
            .bind(institution_id)
            .bind(program_id)
            .bind(dto.is_iseop.unwrap_or(existing.is_iseop))
            .bind(dto.is_work_for_fees.unwrap_or(existing.is_work_for_fees))
            .bind(work_area)
            .bind(dto.hours_pledged.unwrap_or(existing.hours_pledged))
            .bind(dto.graduation_year.unwrap_or(existing.graduation_year))
            .bind(dto.final_grade.unwrap_or(existing.final_grade))
            .bind(id)
            .fetch_one(db)
            .await
            .map_err(|e| AppError::from_db(e, "Student"))?;

        let student = open_record(record, cipher)?;
        info!(student.id = %student.id, "Student updated");

        Ok(student)
    }

    /// Deletes a student and their payments.
    #[instrument(skip(db), fields(student.id = %id, db.operation = "DELETE", db.table = "students"))]
    pub async fn delete_student(db: &PgPool, id: StudentId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| AppError::from_db_delete(e, "Student"))?;

        if result.rows_affected() == 0 {
            debug!("Student not found for deletion");
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        track_record_deleted("student");
        info!("Student deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_work_area() {
        assert_eq!(normalize_work_area(None), None);
        assert_eq!(normalize_work_area(Some(String::new())), None);
        assert_eq!(
            normalize_work_area(Some("Library".to_string())),
            Some("Library".to_string())
        );
    }
}
