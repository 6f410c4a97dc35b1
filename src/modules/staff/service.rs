use campusdesk_crypto::FieldCipher;
use sqlx::PgPool;
use tracing::{debug, error, info, instrument};

use campusdesk_core::{AppError, FilterClause};
use campusdesk_models::StaffId;
use campusdesk_observability::{track_record_created, track_record_deleted};

use crate::modules::faculties::service::FacultyService;
use crate::sealing::{open_failed, seal_failed};

use super::model::{
    CreateStaffDto, PaginatedStaffResponse, Staff, StaffFilterParams, StaffRecord,
    UpdateStaffDto,
};

const STAFF_COLUMNS: &str = "id, user_id, institution_id, faculty_id, department_id, \
     first_name, last_name, email, phone, employee_id, position, qualification, \
     specialization, date_joined, is_active, created_at, updated_at";

fn open_record(record: StaffRecord, cipher: &FieldCipher) -> Result<Staff, AppError> {
    let id = record.id;
    record.open(cipher).map_err(|e| open_failed("staff", id, e))
}

pub struct StaffService;

impl StaffService {
    #[instrument(skip(db, cipher, dto), fields(staff.employee_id = %dto.employee_id, db.operation = "INSERT", db.table = "staff"))]
    pub async fn create_staff(
        db: &PgPool,
        cipher: &FieldCipher,
        dto: CreateStaffDto,
    ) -> Result<Staff, AppError> {
        debug!(institution.id = %dto.institution_id, position = %dto.position, "Creating staff member");

        FacultyService::ensure_placement(db, dto.institution_id, dto.faculty_id, dto.department_id)
            .await?;

        let sealed = dto
            .personal()
            .seal(cipher)
            .map_err(|e| seal_failed("staff", e))?;

        let query = format!(
            "INSERT INTO staff
                (user_id, institution_id, faculty_id, department_id, first_name, last_name,
                 email, phone, employee_id, position, qualification, specialization,
                 date_joined, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {}",
            STAFF_COLUMNS
        );

        let record = sqlx::query_as::<_, StaffRecord>(&query)
            .bind(dto.user_id)
            .bind(dto.institution_id)
            .bind(dto.faculty_id)
            .bind(dto.department_id)
            .bind(&sealed.first_name)
            .bind(&sealed.last_name)
            .bind(&sealed.email)
            .bind(&sealed.phone)
            .bind(&dto.employee_id)
            .bind(dto.position)
            .bind(dto.qualification)
            .bind(&sealed.specialization)
            .bind(dto.date_joined)
            .bind(dto.is_active)
            .fetch_one(db)
            .await
            .map_err(|e| AppError::from_db(e, "Staff member"))?;

        let staff = open_record(record, cipher)?;

        track_record_created("staff");
        info!(staff.id = %staff.id, staff.employee_id = %staff.employee_id, "Staff member created");

        Ok(staff)
    }

    #[instrument(skip(db, cipher, filters), fields(db.operation = "SELECT", db.table = "staff"))]
    pub async fn get_staff(
        db: &PgPool,
        cipher: &FieldCipher,
        filters: StaffFilterParams,
    ) -> Result<PaginatedStaffResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        debug!(
            limit = %limit,
            offset = %offset,
            filter.institution_id = ?filters.institution_id,
            filter.faculty_id = ?filters.faculty_id,
            filter.department_id = ?filters.department_id,
            filter.position = ?filters.position,
            filter.is_active = ?filters.is_active,
            "Fetching staff"
        );

        let mut filter = FilterClause::new();
        if let Some(institution_id) = filters.institution_id {
            filter.eq_cast("institution_id", institution_id, "uuid");
        }
        if let Some(faculty_id) = filters.faculty_id {
            filter.eq_cast("faculty_id", faculty_id, "uuid");
        }
        if let Some(department_id) = filters.department_id {
            filter.eq_cast("department_id", department_id, "uuid");
        }
        if let Some(position) = filters.position {
            filter.eq("position", position);
        }
        if let Some(is_active) = filters.is_active {
            filter.eq_cast("is_active", is_active, "boolean");
        }

        let count_query = format!("SELECT COUNT(*) FROM staff WHERE 1=1{}", filter.sql());
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in filter.params() {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Database error counting staff");
            AppError::database(e)
        })?;

        let data_query = format!(
            "SELECT {} FROM staff WHERE 1=1{} ORDER BY employee_id LIMIT {} OFFSET {}",
            STAFF_COLUMNS,
            filter.sql(),
            limit,
            offset
        );
        let mut data_sql = sqlx::query_as::<_, StaffRecord>(&data_query);
        for param in filter.params() {
            data_sql = data_sql.bind(param);
        }
        let records = data_sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching staff");
            AppError::database(e)
        })?;

        let staff = records
            .into_iter()
            .map(|record| open_record(record, cipher))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedStaffResponse {
            data: staff,
            meta: filters.pagination.meta(total),
        })
    }

    async fn fetch_record(db: &PgPool, id: StaffId) -> Result<StaffRecord, AppError> {
        let query = format!("SELECT {} FROM staff WHERE id = $1", STAFF_COLUMNS);
        sqlx::query_as::<_, StaffRecord>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(|e| AppError::from_db(e, "Staff member"))?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Staff member not found")))
    }

    #[instrument(skip(db, cipher), fields(staff.id = %id, db.operation = "SELECT", db.table = "staff"))]
    pub async fn get_staff_member(
        db: &PgPool,
        cipher: &FieldCipher,
        id: StaffId,
    ) -> Result<Staff, AppError> {
        let record = Self::fetch_record(db, id).await?;
        open_record(record, cipher)
    }

    #[instrument(skip(db, cipher, dto), fields(staff.id = %id, db.operation = "UPDATE", db.table = "staff"))]
    pub async fn update_staff(
        db: &PgPool,
        cipher: &FieldCipher,
        id: StaffId,
        dto: UpdateStaffDto,
    ) -> Result<Staff, AppError> {
        let existing = Self::fetch_record(db, id).await?;

        let institution_id = dto.institution_id.unwrap_or(existing.institution_id);
        let faculty_id = dto.faculty_id.unwrap_or(existing.faculty_id);
        let department_id = dto.department_id.unwrap_or(existing.department_id);

        let placement_changed = dto.institution_id.is_some()
            || dto.faculty_id.is_some()
            || dto.department_id.is_some();
        if placement_changed {
            FacultyService::ensure_placement(db, institution_id, faculty_id, department_id)
                .await?;
        }

        let (first_name, last_name, email, phone, specialization) = if dto.changes_personal() {
            let current = open_record(existing.clone(), cipher)?.personal();
            let sealed = dto
                .merge_personal(current)
                .seal(cipher)
                .map_err(|e| seal_failed("staff", e))?;
            (
                sealed.first_name,
                sealed.last_name,
                sealed.email,
                sealed.phone,
                sealed.specialization,
            )
        } else {
            (
                existing.first_name,
                existing.last_name,
                existing.email,
                existing.phone,
                existing.specialization,
            )
        };

        let query = format!(
            "UPDATE staff
             SET user_id = $1, institution_id = $2, faculty_id = $3, department_id = $4,
                 first_name = $5, last_name = $6, email = $7, phone = $8, employee_id = $9,
                 position = $10, qualification = $11, specialization = $12,
                 date_joined = $13, is_active = $14, updated_at = NOW()
             WHERE id = $15
             RETURNING {}",
            STAFF_COLUMNS
        );

        let record = sqlx::query_as::<_, StaffRecord>(&query)
            .bind(dto.user_id.unwrap_or(existing.user_id))
            .bind(institution_id)
            .bind(faculty_id)
            .bind(department_id)
            .bind(first_name)
            .bind(last_name)
            .bind(email)
            .bind(phone)
            .bind(dto.employee_id.unwrap_or(existing.employee_id))
            .bind(dto.position.unwrap_or(existing.position))
            .bind(dto.qualification.unwrap_or(existing.qualification))
            .bind(specialization)
            .bind(dto.date_joined.unwrap_or(existing.date_joined))
            .bind(dto.is_active.unwrap_or(existing.is_active))
            .bind(id)
            .fetch_one(db)
            .await
            .map_err(|e| AppError::from_db(e, "Staff member"))?;

        let staff = open_record(record, cipher)?;
        info!(staff.id = %staff.id, "Staff member updated");

        Ok(staff)
    }

    #[instrument(skip(db), fields(staff.id = %id, db.operation = "DELETE", db.table = "staff"))]
    pub async fn delete_staff(db: &PgPool, id: StaffId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM staff WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| AppError::from_db_delete(e, "Staff member"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Staff member not found"
            )));
        }

        track_record_deleted("staff");
        info!("Staff member deleted");

        Ok(())
    }
}
