use crate::domain::{models::property::{Property, Unit}, ports::PropertyRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresPropertyRepo {
    pool: PgPool,
}

impl PostgresPropertyRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PropertyRepository for PostgresPropertyRepo {
    async fn create(&self, property: &Property) -> Result<Property, AppError> {
        sqlx::query_as::<_, Property>(
            "INSERT INTO properties (id, name, address, created_at) VALUES ($1, $2, $3, $4) RETURNING *"
        )
            .bind(&property.id)
            .bind(&property.name)
            .bind(&property.address)
            .bind(property.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Property>, AppError> {
        sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Property>, AppError> {
        sqlx::query_as::<_, Property>("SELECT * FROM properties ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn create_unit(&self, unit: &Unit) -> Result<Unit, AppError> {
        sqlx::query_as::<_, Unit>(
            "INSERT INTO units (id, property_id, unit_number, monthly_rent_cents, is_occupied, created_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *"
        )
            .bind(&unit.id)
            .bind(&unit.property_id)
            .bind(&unit.unit_number)
            .bind(unit.monthly_rent_cents)
            .bind(unit.is_occupied)
            .bind(unit.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_unit(&self, id: &str) -> Result<Option<Unit>, AppError> {
        sqlx::query_as::<_, Unit>("SELECT * FROM units WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_units(&self, property_id: &str) -> Result<Vec<Unit>, AppError> {
        sqlx::query_as::<_, Unit>("SELECT * FROM units WHERE property_id = $1 ORDER BY unit_number ASC")
            .bind(property_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
