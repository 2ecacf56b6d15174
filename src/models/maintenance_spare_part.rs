//! Modelo de MaintenanceSparePart
//!
//! Tabla de unión perawatan ↔ suku cadang. El precio es un snapshot al
//! momento del uso: si el precio del suku cadang cambia después, el costo
//! histórico de la perawatan no se mueve.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaintenanceSparePart {
    pub id: Uuid,
    pub maintenance_id: Uuid,
    pub spare_part_id: Uuid,
    pub quantity: i32,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Fila de uso de suku cadang con los campos de display del part unidos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaintenanceSparePartWithPart {
    pub id: Uuid,
    pub maintenance_id: Uuid,
    pub spare_part_id: Uuid,
    pub quantity: i32,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub spare_part_code: String,
    pub spare_part_name: String,
}
