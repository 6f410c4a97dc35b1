use sqlx::PgPool;
use tracing::{debug, error, info, instrument};

use campusdesk_core::{AppError, FilterClause};
use campusdesk_models::InstitutionId;
use campusdesk_observability::{track_record_created, track_record_deleted};

use super::model::{
    CreateInstitutionDto, Institution, InstitutionFilterParams, PaginatedInstitutionsResponse,
    UpdateInstitutionDto,
};

const INSTITUTION_COLUMNS: &str = "id, name, type, province, location, address, capacity, staff, \
     status, established, has_innovation_hub, created_at, updated_at";

pub struct InstitutionService;

impl InstitutionService {
    #[instrument(skip(db, dto), fields(institution.name = %dto.name, db.operation = "INSERT", db.table = "institutions"))]
    pub async fn create_institution(
        db: &PgPool,
        dto: CreateInstitutionDto,
    ) -> Result<Institution, AppError> {
        debug!(institution.type = %dto.institution_type, "Creating institution");

        let query = format!(
            "INSERT INTO institutions
                (name, type, province, location, address, capacity, staff, status, established, has_innovation_hub)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {}",
            INSTITUTION_COLUMNS
        );

        let institution = sqlx::query_as::<_, Institution>(&query)
            .bind(&dto.name)
            .bind(dto.institution_type)
            .bind(dto.province)
            .bind(&dto.location)
            .bind(&dto.address)
            .bind(dto.capacity)
            .bind(dto.staff)
            .bind(dto.status)
            .bind(dto.established)
            .bind(dto.has_innovation_hub)
            .fetch_one(db)
            .await
            .map_err(|e| AppError::from_db(e, "Institution"))?;

        track_record_created("institution");
        info!(institution.id = %institution.id, institution.name = %institution.name, "Institution created");

        Ok(institution)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "institutions"))]
    pub async fn get_institutions(
        db: &PgPool,
        filters: InstitutionFilterParams,
    ) -> Result<PaginatedInstitutionsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        debug!(
            limit = %limit,
            offset = %offset,
            filter.name = ?filters.name,
            filter.type = ?filters.institution_type,
            filter.province = ?filters.province,
            filter.status = ?filters.status,
            "Fetching institutions"
        );

        let mut filter = FilterClause::new();
        if let Some(name) = filters.name.as_deref().filter(|n| !n.trim().is_empty()) {
            filter.contains("name", name.trim());
        }
        if let Some(institution_type) = filters.institution_type {
            filter.eq("type", institution_type);
        }
        if let Some(province) = filters.province {
            filter.eq("province", province);
        }
        if let Some(status) = filters.status {
            filter.eq("status", status);
        }

        let count_query = format!("SELECT COUNT(*) FROM institutions WHERE 1=1{}", filter.sql());
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in filter.params() {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Database error counting institutions");
            AppError::database(e)
        })?;

        let data_query = format!(
            "SELECT {} FROM institutions WHERE 1=1{} ORDER BY name LIMIT {} OFFSET {}",
            INSTITUTION_COLUMNS,
            filter.sql(),
            limit,
            offset
        );
        let mut data_sql = sqlx::query_as::<_, Institution>(&data_query);
        for param in filter.params() {
            data_sql = data_sql.bind(param);
        }
        let institutions = data_sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching institutions");
            AppError::database(e)
        })?;

        debug!(total = %total, returned = institutions.len(), "Institutions fetched");

        Ok(PaginatedInstitutionsResponse {
            data: institutions,
            meta: filters.pagination.meta(total),
        })
    }

    #[instrument(skip(db), fields(institution.id = %id, db.operation = "SELECT", db.table = "institutions"))]
    pub async fn get_institution(db: &PgPool, id: InstitutionId) -> Result<Institution, AppError> {
        let query = format!("SELECT {} FROM institutions WHERE id = $1", INSTITUTION_COLUMNS);
        sqlx::query_as::<_, Institution>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(|e| AppError::from_db(e, "Institution"))?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Institution not found")))
    }

    /// 404 unless the institution exists. Used by the reverse-relation
    /// listings so an unknown id is not reported as an empty page.
    pub async fn ensure_exists(db: &PgPool, id: InstitutionId) -> Result<(), AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM institutions WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        if exists {
            Ok(())
        } else {
            Err(AppError::not_found(anyhow::anyhow!("Institution not found")))
        }
    }

    #[instrument(skip(db, dto), fields(institution.id = %id, db.operation = "UPDATE", db.table = "institutions"))]
    pub async fn update_institution(
        db: &PgPool,
        id: InstitutionId,
        dto: UpdateInstitutionDto,
    ) -> Result<Institution, AppError> {
        let existing = Self::get_institution(db, id).await?;

        let query = format!(
            "UPDATE institutions
             SET name = $1, type = $2, province = $3, location = $4, address = $5,
                 capacity = $6, staff = $7, status = $8, established = $9,
                 has_innovation_hub = $10, updated_at = NOW()
             WHERE id = $11
             RETURNING {}",
            INSTITUTION_COLUMNS
        );

        let institution = sqlx::query_as::<_, Institution>(&query)
            .bind(dto.name.unwrap_or(existing.name))
            .bind(dto.institution_type.unwrap_or(existing.institution_type))
            .bind(dto.province.unwrap_or(existing.province))
            .bind(dto.location.unwrap_or(existing.location))
            .bind(dto.address.unwrap_or(existing.address))
            .bind(dto.capacity.unwrap_or(existing.capacity))
            .bind(dto.staff.unwrap_or(existing.staff))
            .bind(dto.status.unwrap_or(existing.status))
            .bind(dto.established.unwrap_or(existing.established))
            .bind(dto.has_innovation_hub.unwrap_or(existing.has_innovation_hub))
            .bind(id)
            .fetch_one(db)
            .await
            .map_err(|e| AppError::from_db(e, "Institution"))?;

        info!(institution.id = %institution.id, "Institution updated");

        Ok(institution)
    }

    /// Deletes an institution together with its facilities, faculties, staff
    /// and vacancies. Refused with 409 while students are enrolled.
    #[instrument(skip(db), fields(institution.id = %id, db.operation = "DELETE", db.table = "institutions"))]
    pub async fn delete_institution(db: &PgPool, id: InstitutionId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM institutions WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| AppError::from_db_delete(e, "Institution"))?;

        if result.rows_affected() == 0 {
            debug!("Institution not found for deletion");
            return Err(AppError::not_found(anyhow::anyhow!("Institution not found")));
        }

        track_record_deleted("institution");
        info!("Institution deleted");

        Ok(())
    }
}
