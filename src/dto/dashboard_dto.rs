//! DTOs del dashboard

use serde::Serialize;

use crate::dto::maintenance_dto::MaintenanceListItem;

/// Agregado del dashboard: totales por entidad + perawatan recientes
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total_vehicles: i64,
    pub total_maintenances: i64,
    pub total_spare_parts: i64,
    pub total_maintenance_types: i64,
    pub recent_maintenances: Vec<MaintenanceListItem>,
}
