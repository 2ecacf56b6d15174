//! Modelo de Maintenance
//!
//! Registro de perawatan: referencia exactamente un vehículo y un jenis
//! perawatan. El status se guarda como texto (ver `status.rs` para el
//! fallback de valores desconocidos).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::{MaintenanceStatus, StatusBadge};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Maintenance {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub maintenance_type_id: Uuid,
    pub date: NaiveDate,
    pub mileage: i32,
    pub cost: Decimal,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Maintenance {
    pub fn status_badge(&self) -> StatusBadge {
        MaintenanceStatus::badge_for(&self.status)
    }
}

/// Fila de perawatan con los campos de display del vehículo y del jenis
/// perawatan ya unidos en la consulta (sin merge a nivel de aplicación)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaintenanceWithRelations {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub maintenance_type_id: Uuid,
    pub date: NaiveDate,
    pub mileage: i32,
    pub cost: Decimal,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    // Campos del vehículo
    pub vehicle_license_plate: String,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub vehicle_year: i32,
    pub vehicle_color: Option<String>,
    pub vehicle_mileage: i32,
    // Campos del jenis perawatan
    pub maintenance_type_name: String,
    pub maintenance_type_description: Option<String>,
    pub maintenance_type_estimated_cost: Option<Decimal>,
}

impl MaintenanceWithRelations {
    pub fn status_badge(&self) -> StatusBadge {
        MaintenanceStatus::badge_for(&self.status)
    }
}

#[derive(Debug, Clone)]
pub struct NewMaintenance {
    pub vehicle_id: Uuid,
    pub maintenance_type_id: Uuid,
    pub date: NaiveDate,
    pub mileage: i32,
    pub cost: Decimal,
    pub notes: Option<String>,
    pub status: MaintenanceStatus,
}

#[derive(Debug, Clone, Default)]
pub struct MaintenanceChanges {
    pub vehicle_id: Option<Uuid>,
    pub maintenance_type_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub mileage: Option<i32>,
    pub cost: Option<Decimal>,
    pub notes: Option<Option<String>>,
    pub status: Option<MaintenanceStatus>,
}
