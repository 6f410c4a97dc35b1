use sqlx::PgPool;
use tracing::{debug, error, info, instrument};

use campusdesk_core::{AppError, FilterClause};
use campusdesk_models::FacilityId;
use campusdesk_observability::{track_record_created, track_record_deleted};

use super::model::{
    CreateFacilityDto, Facility, FacilityFilterParams, PaginatedFacilitiesResponse,
    UpdateFacilityDto,
};

const FACILITY_COLUMNS: &str = "f.id, f.institution_id, i.name AS institution_name, f.name, \
     f.facility_type, f.building, f.capacity, f.current_usage, f.status, f.description, \
     f.equipment, f.manager, f.contact_number, f.created_at, f.updated_at";

pub struct FacilityService;

impl FacilityService {
    #[instrument(skip(db, dto), fields(facility.name = %dto.name, institution.id = %dto.institution_id, db.operation = "INSERT", db.table = "facilities"))]
    pub async fn create_facility(
        db: &PgPool,
        dto: CreateFacilityDto,
    ) -> Result<Facility, AppError> {
        debug!(facility.type = %dto.facility_type, "Creating facility");

        let query = format!(
            "WITH f AS (
                INSERT INTO facilities
                    (institution_id, name, facility_type, building, capacity, current_usage,
                     status, description, equipment, manager, contact_number)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                RETURNING *
             )
             SELECT {} FROM f JOIN institutions i ON i.id = f.institution_id",
            FACILITY_COLUMNS
        );

        let facility = sqlx::query_as::<_, Facility>(&query)
            .bind(dto.institution_id)
            .bind(&dto.name)
            .bind(dto.facility_type)
            .bind(&dto.building)
            .bind(dto.capacity)
            .bind(dto.current_usage)
            .bind(dto.status)
            .bind(&dto.description)
            .bind(&dto.equipment)
            .bind(&dto.manager)
            .bind(&dto.contact_number)
            .fetch_one(db)
            .await
            .map_err(|e| AppError::from_db(e, "Facility"))?;

        track_record_created("facility");
        info!(facility.id = %facility.id, "Facility created");

        Ok(facility)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "facilities"))]
    pub async fn get_facilities(
        db: &PgPool,
        filters: FacilityFilterParams,
    ) -> Result<PaginatedFacilitiesResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        debug!(
            limit = %limit,
            offset = %offset,
            filter.institution_id = ?filters.institution_id,
            filter.facility_type = ?filters.facility_type,
            filter.status = ?filters.status,
            "Fetching facilities"
        );

        let mut filter = FilterClause::new();
        if let Some(institution_id) = filters.institution_id {
            filter.eq_cast("f.institution_id", institution_id, "uuid");
        }
        if let Some(facility_type) = filters.facility_type {
            filter.eq("f.facility_type", facility_type);
        }
        if let Some(status) = filters.status {
            filter.eq("f.status", status);
        }

        let count_query = format!(
            "SELECT COUNT(*) FROM facilities f WHERE 1=1{}",
            filter.sql()
        );
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in filter.params() {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Database error counting facilities");
            AppError::database(e)
        })?;

        let data_query = format!(
            "SELECT {} FROM facilities f
             JOIN institutions i ON i.id = f.institution_id
             WHERE 1=1{}
             ORDER BY i.name, f.name
             LIMIT {} OFFSET {}",
            FACILITY_COLUMNS,
            filter.sql(),
            limit,
            offset
        );
        let mut data_sql = sqlx::query_as::<_, Facility>(&data_query);
        for param in filter.params() {
            data_sql = data_sql.bind(param);
        }
        let facilities = data_sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching facilities");
            AppError::database(e)
        })?;

        Ok(PaginatedFacilitiesResponse {
            data: facilities,
            meta: filters.pagination.meta(total),
        })
    }

    #[instrument(skip(db), fields(facility.id = %id, db.operation = "SELECT", db.table = "facilities"))]
    pub async fn get_facility(db: &PgPool, id: FacilityId) -> Result<Facility, AppError> {
        let query = format!(
            "SELECT {} FROM facilities f
             JOIN institutions i ON i.id = f.institution_id
             WHERE f.id = $1",
            FACILITY_COLUMNS
        );
        sqlx::query_as::<_, Facility>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(|e| AppError::from_db(e, "Facility"))?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Facility not found")))
    }

    #[instrument(skip(db, dto), fields(facility.id = %id, db.operation = "UPDATE", db.table = "facilities"))]
    pub async fn update_facility(
        db: &PgPool,
        id: FacilityId,
        dto: UpdateFacilityDto,
    ) -> Result<Facility, AppError> {
        let existing = Self::get_facility(db, id).await?;

        let query = format!(
            "WITH f AS (
                UPDATE facilities
                SET name = $1, facility_type = $2, building = $3, capacity = $4,
                    current_usage = $5, status = $6, description = $7, equipment = $8,
                    manager = $9, contact_number = $10, updated_at = NOW()
                WHERE id = $11
                RETURNING *
             )
             SELECT {} FROM f JOIN institutions i ON i.id = f.institution_id",
            FACILITY_COLUMNS
        );

        let facility = sqlx::query_as::<_, Facility>(&query)
            .bind(dto.name.unwrap_or(existing.name))
            .bind(dto.facility_type.unwrap_or(existing.facility_type))
            .bind(dto.building.unwrap_or(existing.building))
            .bind(dto.capacity.unwrap_or(existing.capacity))
            .bind(dto.current_usage.unwrap_or(existing.current_usage))
            .bind(dto.status.unwrap_or(existing.status))
            .bind(dto.description.unwrap_or(existing.description))
            .bind(dto.equipment.unwrap_or(existing.equipment))
            .bind(dto.manager.unwrap_or(existing.manager))
            .bind(dto.contact_number.unwrap_or(existing.contact_number))
            .bind(id)
            .fetch_one(db)
            .await
            .map_err(|e| AppError::from_db(e, "Facility"))?;

        info!(facility.id = %facility.id, "Facility updated");

        Ok(facility)
    }

    #[instrument(skip(db), fields(facility.id = %id, db.operation = "DELETE", db.table = "facilities"))]
    pub async fn delete_facility(db: &PgPool, id: FacilityId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM facilities WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| AppError::from_db_delete(e, "Facility"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Facility not found")));
        }

        track_record_deleted("facility");
        info!("Facility deleted");

        Ok(())
    }
}
