use crate::domain::models::utility::UtilityBill;
use crate::domain::ports::UtilityRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresUtilityRepo {
    pool: PgPool,
}

impl PostgresUtilityRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UtilityRepository for PostgresUtilityRepo {
    async fn create(&self, bill: &UtilityBill) -> Result<UtilityBill, AppError> {
        sqlx::query_as::<_, UtilityBill>(
            "INSERT INTO utilities (id, unit_id, tenant_id, utility_type, billing_month, previous_reading, current_reading, units_consumed, rate_per_unit_cents, amount_due_cents, amount_paid_cents, payment_status, due_date, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING *"
        )
            .bind(&bill.id)
            .bind(&bill.unit_id)
            .bind(&bill.tenant_id)
            .bind(&bill.utility_type)
            .bind(&bill.billing_month)
            .bind(bill.previous_reading)
            .bind(bill.current_reading)
            .bind(bill.units_consumed)
            .bind(bill.rate_per_unit_cents)
            .bind(bill.amount_due_cents)
            .bind(bill.amount_paid_cents)
            .bind(bill.payment_status)
            .bind(bill.due_date)
            .bind(bill.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UtilityBill>, AppError> {
        sqlx::query_as::<_, UtilityBill>("SELECT * FROM utilities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_unit(&self, unit_id: &str) -> Result<Vec<UtilityBill>, AppError> {
        sqlx::query_as::<_, UtilityBill>(
            "SELECT * FROM utilities WHERE unit_id = $1 ORDER BY billing_month DESC"
        )
            .bind(unit_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<UtilityBill>, AppError> {
        sqlx::query_as::<_, UtilityBill>("SELECT * FROM utilities ORDER BY billing_month DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn record_payment(&self, id: &str, amount_cents: i64) -> Result<UtilityBill, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let current = sqlx::query_as::<_, UtilityBill>(
            "SELECT * FROM utilities WHERE id = $1 FOR UPDATE"
        )
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Utility bill not found".into()))?;

        let new_amount_paid = current.amount_paid_cents + amount_cents;
        let status = UtilityBill::derive_status(new_amount_paid, current.amount_due_cents);

        let bill = sqlx::query_as::<_, UtilityBill>(
            "UPDATE utilities SET amount_paid_cents = $1, payment_status = $2 WHERE id = $3 RETURNING *"
        )
            .bind(new_amount_paid)
            .bind(status)
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(bill)
    }
}
