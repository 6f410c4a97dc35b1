use sqlx::PgPool;
use tracing::{debug, error, info, instrument};

use campusdesk_core::AppError;
use campusdesk_models::{FeeStructureId, ProgramId};
use campusdesk_observability::{track_record_created, track_record_deleted};

use super::model::{
    CreateFeeStructureDto, FeeStructure, FeeStructureFilterParams,
    PaginatedFeeStructuresResponse, UpdateFeeStructureDto,
};

const FEE_COLUMNS: &str = "fs.id, fs.program_id, p.name AS program_name, fs.semester_fee, \
     fs.created_at, fs.updated_at";

pub struct FeeStructureService;

impl FeeStructureService {
    /// A program has at most one fee structure; a second one is a 409.
    #[instrument(skip(db, dto), fields(program.id = %dto.program_id, db.operation = "INSERT", db.table = "fee_structures"))]
    pub async fn create_fee_structure(
        db: &PgPool,
        dto: CreateFeeStructureDto,
    ) -> Result<FeeStructure, AppError> {
        debug!(semester_fee = %dto.semester_fee, "Creating fee structure");

        let query = format!(
            "WITH fs AS (
                INSERT INTO fee_structures (program_id, semester_fee)
                VALUES ($1, $2)
                RETURNING *
             )
             SELECT {} FROM fs JOIN programs p ON p.id = fs.program_id",
            FEE_COLUMNS
        );

        let fee_structure = sqlx::query_as::<_, FeeStructure>(&query)
            .bind(dto.program_id)
            .bind(dto.semester_fee)
            .fetch_one(db)
            .await
            .map_err(|e| AppError::from_db(e, "Fee structure"))?;

        track_record_created("fee_structure");
        info!(fee_structure.id = %fee_structure.id, "Fee structure created");

        Ok(fee_structure)
    }

    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "fee_structures"))]
    pub async fn get_fee_structures(
        db: &PgPool,
        filters: FeeStructureFilterParams,
    ) -> Result<PaginatedFeeStructuresResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM fee_structures")
            .fetch_one(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error counting fee structures");
                AppError::database(e)
            })?;

        let query = format!(
            "SELECT {} FROM fee_structures fs
             JOIN programs p ON p.id = fs.program_id
             ORDER BY p.name
             LIMIT {} OFFSET {}",
            FEE_COLUMNS, limit, offset
        );
        let fee_structures = sqlx::query_as::<_, FeeStructure>(&query)
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "Database error fetching fee structures");
                AppError::database(e)
            })?;

        Ok(PaginatedFeeStructuresResponse {
            data: fee_structures,
            meta: filters.pagination.meta(total),
        })
    }

    #[instrument(skip(db), fields(fee_structure.id = %id, db.operation = "SELECT", db.table = "fee_structures"))]
    pub async fn get_fee_structure(
        db: &PgPool,
        id: FeeStructureId,
    ) -> Result<FeeStructure, AppError> {
        let query = format!(
            "SELECT {} FROM fee_structures fs
             JOIN programs p ON p.id = fs.program_id
             WHERE fs.id = $1",
            FEE_COLUMNS
        );
        sqlx::query_as::<_, FeeStructure>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(|e| AppError::from_db(e, "Fee structure"))?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Fee structure not found")))
    }

    #[instrument(skip(db), fields(program.id = %program_id, db.operation = "SELECT", db.table = "fee_structures"))]
    pub async fn get_by_program(
        db: &PgPool,
        program_id: ProgramId,
    ) -> Result<FeeStructure, AppError> {
        let query = format!(
            "SELECT {} FROM fee_structures fs
             JOIN programs p ON p.id = fs.program_id
             WHERE fs.program_id = $1",
            FEE_COLUMNS
        );
        sqlx::query_as::<_, FeeStructure>(&query)
            .bind(program_id)
            .fetch_optional(db)
            .await
            .map_err(|e| AppError::from_db(e, "Fee structure"))?
            .ok_or_else(|| {
                AppError::not_found(anyhow::anyhow!("No fee structure for this program"))
            })
    }

    #[instrument(skip(db, dto), fields(fee_structure.id = %id, db.operation = "UPDATE", db.table = "fee_structures"))]
    pub async fn update_fee_structure(
        db: &PgPool,
        id: FeeStructureId,
        dto: UpdateFeeStructureDto,
    ) -> Result<FeeStructure, AppError> {
        let existing = Self::get_fee_structure(db, id).await?;

        let query = format!(
            "WITH fs AS (
                UPDATE fee_structures
                SET semester_fee = $1, updated_at = NOW()
                WHERE id = $2
                RETURNING *
             )
             SELECT {} FROM fs JOIN programs p ON p.id = fs.program_id",
            FEE_COLUMNS
        );

        let fee_structure = sqlx::query_as::<_, FeeStructure>(&query)
            .bind(dto.semester_fee.unwrap_or(existing.semester_fee))
            .bind(id)
            .fetch_one(db)
            .await
            .map_err(|e| AppError::from_db(e, "Fee structure"))?;

        info!(fee_structure.id = %fee_structure.id, semester_fee = %fee_structure.semester_fee, "Fee structure updated");

        Ok(fee_structure)
    }

    #[instrument(skip(db), fields(fee_structure.id = %id, db.operation = "DELETE", db.table = "fee_structures"))]
    pub async fn delete_fee_structure(db: &PgPool, id: FeeStructureId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM fee_structures WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| AppError::from_db_delete(e, "Fee structure"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Fee structure not found"
            )));
        }

        track_record_deleted("fee_structure");
        info!("Fee structure deleted");

        Ok(())
    }
}
