use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Property {
    pub id: String,
    pub name: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl Property {
    pub fn new(name: String, address: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            address,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Unit {
    pub id: String,
    pub property_id: String,
    pub unit_number: String,
    pub monthly_rent_cents: i64,
    pub is_occupied: bool,
    pub created_at: DateTime<Utc>,
}

impl Unit {
    pub fn new(property_id: String, unit_number: String, monthly_rent_cents: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            property_id,
            unit_number,
            monthly_rent_cents,
            is_occupied: false,
            created_at: Utc::now(),
        }
    }
}
