use crate::domain::models::commission::{Commission, CommissionChanges, CommissionStatus};
use crate::domain::ports::CommissionRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

pub struct PostgresCommissionRepo {
    pool: PgPool,
}

impl PostgresCommissionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommissionRepository for PostgresCommissionRepo {
    async fn create(&self, commission: &Commission) -> Result<Commission, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let property = sqlx::query("SELECT id FROM properties WHERE id = $1")
            .bind(&commission.property_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        if property.is_none() {
            return Err(AppError::NotFound("Property not found".into()));
        }

        // Cross-entity invariant: an attached tenant must occupy a unit of
        // the commission's property.
        if let Some(tenant_id) = &commission.tenant_id {
            let matched = sqlx::query(
                "SELECT t.id FROM tenants t
                 JOIN units u ON t.unit_id = u.id
                 WHERE t.id = $1 AND u.property_id = $2 AND t.status = 'active'"
            )
                .bind(tenant_id)
                .bind(&commission.property_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::Database)?;

            if matched.is_none() {
                let tenant = sqlx::query("SELECT id FROM tenants WHERE id = $1")
                    .bind(tenant_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(AppError::Database)?;
                return match tenant {
                    None => Err(AppError::NotFound("Tenant not found".into())),
                    Some(_) => Err(AppError::Validation("Tenant does not belong to the commission property".into())),
                };
            }
        }

        let created = sqlx::query_as::<_, Commission>(
            "INSERT INTO agent_commissions (id, agent_name, agent_phone, property_id, tenant_id, commission_amount_cents, status, paid_date, payment_reference, notes, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING *"
        )
            .bind(&commission.id)
            .bind(&commission.agent_name)
            .bind(&commission.agent_phone)
            .bind(&commission.property_id)
            .bind(&commission.tenant_id)
            .bind(commission.commission_amount_cents)
            .bind(commission.status)
            .bind(commission.paid_date)
            .bind(&commission.payment_reference)
            .bind(&commission.notes)
            .bind(commission.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Commission>, AppError> {
        sqlx::query_as::<_, Commission>("SELECT * FROM agent_commissions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Commission>, AppError> {
        sqlx::query_as::<_, Commission>("SELECT * FROM agent_commissions ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, id: &str, changes: &CommissionChanges) -> Result<Commission, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let existing = sqlx::query_as::<_, Commission>(
            "SELECT * FROM agent_commissions WHERE id = $1 FOR UPDATE"
        )
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Commission not found".into()))?;

        if existing.status == CommissionStatus::Paid && changes.touches_locked_fields() {
            return Err(AppError::StateTransition("Only notes can be changed on a paid commission".into()));
        }

        let updated = sqlx::query_as::<_, Commission>(
            "UPDATE agent_commissions
             SET agent_name = COALESCE($1, agent_name),
                 agent_phone = COALESCE($2, agent_phone),
                 commission_amount_cents = COALESCE($3, commission_amount_cents),
                 notes = COALESCE($4, notes)
             WHERE id = $5
             RETURNING *"
        )
            .bind(&changes.agent_name)
            .bind(&changes.agent_phone)
            .bind(changes.commission_amount_cents)
            .bind(&changes.notes)
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }

    async fn mark_paid(&self, id: &str, paid_date: NaiveDate, payment_reference: Option<String>) -> Result<Commission, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let existing = sqlx::query_as::<_, Commission>(
            "SELECT * FROM agent_commissions WHERE id = $1 FOR UPDATE"
        )
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Commission not found".into()))?;

        match existing.status {
            CommissionStatus::Paid => {
                return Err(AppError::Conflict("Commission is already paid".into()));
            }
            CommissionStatus::Cancelled => {
                return Err(AppError::StateTransition("Cannot pay a cancelled commission".into()));
            }
            CommissionStatus::Pending => {}
        }

        let paid = sqlx::query_as::<_, Commission>(
            "UPDATE agent_commissions SET status = 'paid', paid_date = $1, payment_reference = $2 WHERE id = $3 RETURNING *"
        )
            .bind(paid_date)
            .bind(&payment_reference)
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(paid)
    }

    async fn cancel(&self, id: &str, reason: Option<String>) -> Result<Commission, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let existing = sqlx::query_as::<_, Commission>(
            "SELECT * FROM agent_commissions WHERE id = $1 FOR UPDATE"
        )
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Commission not found".into()))?;

        match existing.status {
            CommissionStatus::Paid => {
                return Err(AppError::StateTransition("Cannot cancel a paid commission".into()));
            }
            CommissionStatus::Cancelled => {
                return Err(AppError::StateTransition("Commission is already cancelled".into()));
            }
            CommissionStatus::Pending => {}
        }

        let notes = match (existing.notes, reason) {
            (Some(notes), Some(reason)) => Some(format!("{}\nCancelled: {}", notes, reason)),
            (None, Some(reason)) => Some(format!("Cancelled: {}", reason)),
            (notes, None) => notes,
        };

        let cancelled = sqlx::query_as::<_, Commission>(
            "UPDATE agent_commissions SET status = 'cancelled', notes = $1 WHERE id = $2 RETURNING *"
        )
            .bind(&notes)
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(cancelled)
    }
}
