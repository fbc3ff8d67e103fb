use crate::domain::{models::tenant::Tenant, ports::TenantRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

pub struct PostgresTenantRepo {
    pool: PgPool,
}

impl PostgresTenantRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantRepository for PostgresTenantRepo {
    async fn create_in_unit(&self, tenant: &Tenant) -> Result<Tenant, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Occupancy flip and tenant insert commit together or not at all.
        let flipped = sqlx::query("UPDATE units SET is_occupied = TRUE WHERE id = $1 AND is_occupied = FALSE")
            .bind(&tenant.unit_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if flipped.rows_affected() == 0 {
            let exists = sqlx::query("SELECT id FROM units WHERE id = $1")
                .bind(&tenant.unit_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::Database)?;
            return match exists {
                None => Err(AppError::NotFound("Unit not found".into())),
                Some(_) => Err(AppError::Conflict("Unit is already occupied".into())),
            };
        }

        let created = sqlx::query_as::<_, Tenant>(
            "INSERT INTO tenants (id, unit_id, full_name, phone, email, id_number, deposit_cents, status, move_in_date, move_out_date, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING *"
        )
            .bind(&tenant.id)
            .bind(&tenant.unit_id)
            .bind(&tenant.full_name)
            .bind(&tenant.phone)
            .bind(&tenant.email)
            .bind(&tenant.id_number)
            .bind(tenant.deposit_cents)
            .bind(tenant.status)
            .bind(tenant.move_in_date)
            .bind(tenant.move_out_date)
            .bind(tenant.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Tenant>, AppError> {
        sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_active_by_contact(&self, phone: &str, email: &str) -> Result<Option<Tenant>, AppError> {
        sqlx::query_as::<_, Tenant>(
            "SELECT * FROM tenants WHERE status = 'active' AND (phone = $1 OR email = $2)"
        )
            .bind(phone)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Tenant>, AppError> {
        sqlx::query_as::<_, Tenant>("SELECT * FROM tenants ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn deactivate(&self, id: &str, move_out_date: NaiveDate) -> Result<Tenant, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let updated = sqlx::query_as::<_, Tenant>(
            "UPDATE tenants SET status = 'former', move_out_date = $1 WHERE id = $2 AND status = 'active' RETURNING *"
        )
            .bind(move_out_date)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let tenant = match updated {
            Some(tenant) => tenant,
            None => {
                let exists = sqlx::query("SELECT id FROM tenants WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(AppError::Database)?;
                return match exists {
                    None => Err(AppError::NotFound("Tenant not found".into())),
                    Some(_) => Err(AppError::StateTransition("Tenant has already moved out".into())),
                };
            }
        };

        sqlx::query("UPDATE units SET is_occupied = FALSE WHERE id = $1")
            .bind(&tenant.unit_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(tenant)
    }
}
