//! Modelo de MaintenanceType
//!
//! Datos de referencia: jenis perawatan con costo estimado opcional.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaintenanceType {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub estimated_cost: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMaintenanceType {
    pub name: String,
    pub description: Option<String>,
    pub estimated_cost: Option<Decimal>,
}

#[derive(Debug, Clone, Default)]
pub struct MaintenanceTypeChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub estimated_cost: Option<Option<Decimal>>,
}
