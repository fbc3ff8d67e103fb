use crate::domain::{models::payment::Payment, ports::PaymentRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresPaymentRepo {
    pool: PgPool,
}

impl PostgresPaymentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepo {
    async fn create(&self, payment: &Payment) -> Result<Payment, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let created = sqlx::query_as::<_, Payment>(
            "INSERT INTO payments (id, tenant_id, property_id, unit_id, plan_id, amount_cents, payment_date, payment_month, payment_method, reference_number, receipt_number, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING *"
        )
            .bind(&payment.id)
            .bind(&payment.tenant_id)
            .bind(&payment.property_id)
            .bind(&payment.unit_id)
            .bind(&payment.plan_id)
            .bind(payment.amount_cents)
            .bind(payment.payment_date)
            .bind(&payment.payment_month)
            .bind(&payment.payment_method)
            .bind(&payment.reference_number)
            .bind(&payment.receipt_number)
            .bind(payment.status)
            .bind(payment.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Payment>, AppError> {
        sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Payment>, AppError> {
        sqlx::query_as::<_, Payment>("SELECT * FROM payments ORDER BY payment_date DESC, created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<Payment>, AppError> {
        sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE tenant_id = $1 ORDER BY payment_date DESC, created_at DESC"
        )
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn cancel(&self, id: &str) -> Result<Payment, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let cancelled = sqlx::query_as::<_, Payment>(
            "UPDATE payments SET status = 'cancelled' WHERE id = $1 AND status = 'completed' RETURNING *"
        )
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let cancelled = match cancelled {
            Some(payment) => payment,
            None => {
                let existing = sqlx::query("SELECT id FROM payments WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(AppError::Database)?;
                return match existing {
                    None => Err(AppError::NotFound("Payment not found".into())),
                    Some(_) => Err(AppError::StateTransition("Payment is already cancelled".into())),
                };
            }
        };

        tx.commit().await.map_err(AppError::Database)?;
        Ok(cancelled)
    }
}
