use crate::domain::models::payment::{NewPaymentParams, Payment};
use crate::domain::models::payment_plan::{InstallmentReceipt, NewInstallment, PaymentPlan};
use crate::domain::ports::PaymentPlanRepository;
use crate::domain::services::schedule;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqlitePaymentPlanRepo {
    pool: SqlitePool,
}

impl SqlitePaymentPlanRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentPlanRepository for SqlitePaymentPlanRepo {
    async fn create(&self, plan: &PaymentPlan) -> Result<PaymentPlan, AppError> {
        sqlx::query_as::<_, PaymentPlan>(
            "INSERT INTO payment_plans (id, tenant_id, total_amount_cents, amount_paid_cents, balance_cents, installment_amount_cents, installment_frequency, start_date, end_date, next_due_date, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&plan.id)
            .bind(&plan.tenant_id)
            .bind(plan.total_amount_cents)
            .bind(plan.amount_paid_cents)
            .bind(plan.balance_cents)
            .bind(plan.installment_amount_cents)
            .bind(plan.installment_frequency)
            .bind(plan.start_date)
            .bind(plan.end_date)
            .bind(plan.next_due_date)
            .bind(plan.status)
            .bind(plan.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<PaymentPlan>, AppError> {
        sqlx::query_as::<_, PaymentPlan>("SELECT * FROM payment_plans WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<PaymentPlan>, AppError> {
        sqlx::query_as::<_, PaymentPlan>(
            "SELECT * FROM payment_plans WHERE tenant_id = ? ORDER BY created_at ASC"
        )
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn record_installment(&self, plan_id: &str, installment: &NewInstallment) -> Result<InstallmentReceipt, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // The guarded in-place UPDATE is the first statement of the
        // transaction: it takes SQLite's write lock, so concurrent
        // installments against the same plan queue up behind the busy
        // timeout instead of losing the read-modify-write.
        let updated = sqlx::query_as::<_, PaymentPlan>(
            "UPDATE payment_plans
             SET amount_paid_cents = amount_paid_cents + ?,
                 balance_cents = total_amount_cents - amount_paid_cents - ?
             WHERE id = ? AND status = 'active'
             RETURNING *"
        )
            .bind(installment.amount_cents)
            .bind(installment.amount_cents)
            .bind(plan_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let updated = match updated {
            Some(plan) => plan,
            None => {
                let existing = sqlx::query("SELECT id FROM payment_plans WHERE id = ?")
                    .bind(plan_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(AppError::Database)?;
                return match existing {
                    None => Err(AppError::NotFound("Payment plan not found".into())),
                    Some(_) => Err(AppError::StateTransition("Payment plan is already completed".into())),
                };
            }
        };

        let (status, next_due_date) = schedule::settle(
            updated.total_amount_cents,
            updated.amount_paid_cents,
            updated.installment_frequency,
            installment.payment_date,
        );

        let plan = sqlx::query_as::<_, PaymentPlan>(
            "UPDATE payment_plans SET status = ?, next_due_date = ? WHERE id = ? RETURNING *"
        )
            .bind(status)
            .bind(next_due_date)
            .bind(plan_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let payment = Payment::new(NewPaymentParams {
            tenant_id: plan.tenant_id.clone(),
            property_id: None,
            unit_id: None,
            plan_id: Some(plan.id.clone()),
            amount_cents: installment.amount_cents,
            payment_date: installment.payment_date,
            payment_month: None,
            payment_method: installment.payment_method.clone(),
            reference_number: installment.reference_number.clone(),
        });

        let payment = sqlx::query_as::<_, Payment>(
            "INSERT INTO payments (id, tenant_id, property_id, unit_id, plan_id, amount_cents, payment_date, payment_month, payment_method, reference_number, receipt_number, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
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
        Ok(InstallmentReceipt { plan, payment })
    }
}
