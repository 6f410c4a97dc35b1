use rust_decimal::prelude::ToPrimitive;
use sqlx::PgPool;
use tracing::{debug, error, info, instrument, warn};

use campusdesk_core::{AppError, FilterClause};
use campusdesk_models::PaymentId;
use campusdesk_observability::{track_payment_recorded, track_record_deleted};

use super::model::{CreatePaymentDto, PaginatedPaymentsResponse, Payment, PaymentFilterParams};

const PAYMENT_COLUMNS: &str = "pm.id, pm.student_id, s.student_id AS student_number, pm.amount, \
     pm.date_paid, pm.reference, pm.created_at";

pub struct PaymentService;

impl PaymentService {
    #[instrument(skip(db, dto), fields(student.id = %dto.student_id, db.operation = "INSERT", db.table = "payments"))]
    pub async fn create_payment(db: &PgPool, dto: CreatePaymentDto) -> Result<Payment, AppError> {
        debug!(amount = %dto.amount, date_paid = %dto.date_paid, "Recording payment");

        let query = format!(
            "WITH pm AS (
                INSERT INTO payments (student_id, amount, date_paid, reference)
                VALUES ($1, $2, $3, $4)
                RETURNING *
             )
             SELECT {} FROM pm JOIN students s ON s.id = pm.student_id",
            PAYMENT_COLUMNS
        );

        let payment = sqlx::query_as::<_, Payment>(&query)
            .bind(dto.student_id)
            .bind(dto.amount)
            .bind(dto.date_paid)
            .bind(&dto.reference)
            .fetch_one(db)
            .await
            .map_err(|e| AppError::from_db(e, "Payment"))?;

        match payment.amount.to_f64() {
            Some(amount) => track_payment_recorded(amount),
            None => warn!(amount = %payment.amount, "Payment amount not representable as f64"),
        }
        info!(payment.id = %payment.id, amount = %payment.amount, "Payment recorded");

        Ok(payment)
    }

    /// Lists payments, most recent first.
    #[instrument(skip(db, filters), fields(db.operation = "SELECT", db.table = "payments"))]
    pub async fn get_payments(
        db: &PgPool,
        filters: PaymentFilterParams,
    ) -> Result<PaginatedPaymentsResponse, AppError> {
        let limit = filters.pagination.limit();
        let offset = filters.pagination.offset();

        debug!(
            limit = %limit,
            offset = %offset,
            filter.student_id = ?filters.student_id,
            filter.paid_from = ?filters.paid_from,
            filter.paid_to = ?filters.paid_to,
            "Fetching payments"
        );

        let mut filter = FilterClause::new();
        if let Some(student_id) = filters.student_id {
            filter.eq_cast("pm.student_id", student_id, "uuid");
        }
        if let Some(from) = filters.paid_from {
            filter.gte_cast("pm.date_paid", from, "date");
        }
        if let Some(to) = filters.paid_to {
            filter.lte_cast("pm.date_paid", to, "date");
        }

        let count_query = format!(
            "SELECT COUNT(*) FROM payments pm WHERE 1=1{}",
            filter.sql()
        );
        let mut count_sql = sqlx::query_scalar::<_, i64>(&count_query);
        for param in filter.params() {
            count_sql = count_sql.bind(param);
        }
        let total = count_sql.fetch_one(db).await.map_err(|e| {
            error!(error = %e, "Database error counting payments");
            AppError::database(e)
        })?;

        let data_query = format!(
            "SELECT {} FROM payments pm
             JOIN students s ON s.id = pm.student_id
             WHERE 1=1{}
             ORDER BY pm.date_paid DESC, pm.created_at DESC
             LIMIT {} OFFSET {}",
            PAYMENT_COLUMNS,
            filter.sql(),
            limit,
            offset
        );
        let mut data_sql = sqlx::query_as::<_, Payment>(&data_query);
        for param in filter.params() {
            data_sql = data_sql.bind(param);
        }
        let payments = data_sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Database error fetching payments");
            AppError::database(e)
        })?;

        Ok(PaginatedPaymentsResponse {
            data: payments,
            meta: filters.pagination.meta(total),
        })
    }

    #[instrument(skip(db), fields(payment.id = %id, db.operation = "SELECT", db.table = "payments"))]
    pub async fn get_payment(db: &PgPool, id: PaymentId) -> Result<Payment, AppError> {
        let query = format!(
            "SELECT {} FROM payments pm
             JOIN students s ON s.id = pm.student_id
             WHERE pm.id = $1",
            PAYMENT_COLUMNS
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(|e| AppError::from_db(e, "Payment"))?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Payment not found")))
    }

    #[instrument(skip(db), fields(payment.id = %id, db.operation = "DELETE", db.table = "payments"))]
    pub async fn delete_payment(db: &PgPool, id: PaymentId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| AppError::from_db_delete(e, "Payment"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Payment not found")));
        }

        track_record_deleted("payment");
        info!("Payment deleted");

        Ok(())
    }
}
