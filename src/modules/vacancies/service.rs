use sqlx::PgPool;
use tracing::{debug, error, info, instrument};

use campusdesk_core::{AppError, FilterClause};
use campusdesk_models::VacancyId;
use campusdesk_observability::{track_record_created, track_record_deleted};

use crate::modules::faculties::service::FacultyService;

use super::model::{
    CreateVacancyDto, PaginatedVacanciesResponse, UpdateVacancyDto, Vacancy, VacancyFilterParams,
};

const VACANCY_COLUMNS: &str = "id, institution_id, title, faculty_id, department_id, quantity, \
     deadline, description, status, created_at, updated_at";

pub struct VacancyService;

impl VacancyService {
    #[instrument(skip(db, dto), fields(vacancy.title = %dto.title, db.operation = "INSERT", db.table = "vacancies"))]
    pub async fn create_vacancy(db: &PgPool, dto: CreateVacancyDto) -> Result<Vacancy, AppError> {
        debug!(institution.id = %dto.institution_id, department.id = %dto.department_id, "Creating vacancy");

        FacultyService::ensure_placement(
            db,
            dto.institution_id,
            dto.faculty_id,
            Some(dto.department_id),
        )
        .await?;

        let query = format!(
            "INSERT INTO vacancies
                (institution_id, title, faculty_id, department_id, quantity, deadline,
                 description, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {}",
            VACANCY_COLUMNS
        );

        let vacancy = sqlx::query_as::<_, Vacancy>(&query)
            .bind(dto.institution_id)
            .bind(&dto.title)
            .bind(dto.faculty_id)
            .bind(dto.department_id)
            .bind(dto.quantity)
            .bind(dto.deadline)
            .bind(&dto.description)
            .bind(dto.status)
            .fetch_one(db)
            .await
            .map_err(|e| AppError::from_db(e, "Vacancy"))?;

        track_record_created("vacancy");
        info!(vacancy.id = %vacancy.id, "Vacancy created");

        Ok(vacancy)
    }

    /// Lists vacancies, nearest deadline first.
    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "vacancies"))]
    pub async fn get_vacancies(
        db: &PgPool,
        filters: VacancyFilterParams,
    ) -> Result<PaginatedVacanciesResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let mut filter = FilterClause::new();
        if let Some(institution_id) = filters.institution_id {
            filter.eq_cast("institution_id", institution_id, "uuid");
        }
        if let Some(department_id) = filters.department_id {
            filter.eq_cast("department_id", department_id, "uuid");
        }
        if let Some(status) = filters.status {
            filter.eq("status", status);
        }

        let count_query = format!("SELECT COUNT(*) FROM vacancies WHERE 1=1{}", filter.sql());
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in filter.params() {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Database error counting vacancies");
            AppError::database(e)
        })?;

        let data_query = format!(
            "SELECT {} FROM vacancies WHERE 1=1{} ORDER BY deadline, title LIMIT {} OFFSET {}",
            VACANCY_COLUMNS,
            filter.sql(),
            limit,
            offset
        );
        let mut data_sql = sqlx::query_as::<_, Vacancy>(&data_query);
        for param in filter.params() {
            data_sql = data_sql.bind(param);
        }
        let vacancies = data_sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching vacancies");
            AppError::database(e)
        })?;

        Ok(PaginatedVacanciesResponse {
            data: vacancies,
            meta: filters.pagination.meta(total),
        })
    }

    #[instrument(skip(db), fields(vacancy.id = %id, db.operation = "SELECT", db.table = "vacancies"))]
    pub async fn get_vacancy(db: &PgPool, id: VacancyId) -> Result<Vacancy, AppError> {
        let query = format!("SELECT {} FROM vacancies WHERE id = $1", VACANCY_COLUMNS);
        sqlx::query_as::<_, Vacancy>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(|e| AppError::from_db(e, "Vacancy"))?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Vacancy not found")))
    }

    #[instrument(skip(db, dto), fields(vacancy.id = %id, db.operation = "UPDATE", db.table = "vacancies"))]
    pub async fn update_vacancy(
        db: &PgPool,
        id: VacancyId,
        dto: UpdateVacancyDto,
    ) -> Result<Vacancy, AppError> {
        let existing = Self::get_vacancy(db, id).await?;

        let faculty_id = dto.faculty_id.unwrap_or(existing.faculty_id);
        let department_id = dto.department_id.unwrap_or(existing.department_id);

        if dto.faculty_id.is_some() || dto.department_id.is_some() {
            FacultyService::ensure_placement(
                db,
                existing.institution_id,
                faculty_id,
                Some(department_id),
            )
            .await?;
        }

        let query = format!(
            "UPDATE vacancies
             SET title = $1, faculty_id = $2, department_id = $3, quantity = $4,
                 deadline = $5, description = $6, status = $7, updated_at = NOW()
             WHERE id = $8
             RETURNING {}",
            VACANCY_COLUMNS
        );

        let vacancy = sqlx::query_as::<_, Vacancy>(&query)
            .bind(dto.title.unwrap_or(existing.title))
            .bind(faculty_id)
            .bind(department_id)
            .bind(dto.quantity.unwrap_or(existing.quantity))
            .bind(dto.deadline.unwrap_or(existing.deadline))
            .bind(dto.description.unwrap_or(existing.description))
            .bind(dto.status.unwrap_or(existing.status))
            .bind(id)
            .fetch_one(db)
            .await
            .map_err(|e| AppError::from_db(e, "Vacancy"))?;

        info!(vacancy.id = %vacancy.id, vacancy.status = %vacancy.status, "Vacancy updated");

        Ok(vacancy)
    }

    #[instrument(skip(db), fields(vacancy.id = %id, db.operation = "DELETE", db.table = "vacancies"))]
    pub async fn delete_vacancy(db: &PgPool, id: VacancyId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vacancies WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| AppError::from_db_delete(e, "Vacancy"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Vacancy not found")));
        }

        track_record_deleted("vacancy");
        info!("Vacancy deleted");

        Ok(())
    }
}
