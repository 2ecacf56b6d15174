//! Controller del dashboard
//!
//! Agregado de solo lectura: totales por entidad y las cinco perawatan más
//! recientes con sus campos de display unidos.

use serde_json::Value;
use sqlx::PgPool;

use crate::cache::{keys, ViewCache};
use crate::dto::dashboard_dto::DashboardResponse;
use crate::middleware::auth::AuthContext;
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::maintenance_type_repository::MaintenanceTypeRepository;
use crate::repositories::spare_part_repository::SparePartRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{AppError, AppResult};

const RECENT_LIMIT: i64 = 5;

pub struct DashboardController {
    vehicle_repository: VehicleRepository,
    maintenance_repository: MaintenanceRepository,
    spare_part_repository: SparePartRepository,
    maintenance_type_repository: MaintenanceTypeRepository,
    cache: ViewCache,
}

impl DashboardController {
    pub fn new(pool: PgPool, cache: ViewCache) -> Self {
        Self {
            vehicle_repository: VehicleRepository::new(pool.clone()),
            maintenance_repository: MaintenanceRepository::new(pool.clone()),
            spare_part_repository: SparePartRepository::new(pool.clone()),
            maintenance_type_repository: MaintenanceTypeRepository::new(pool),
            cache,
        }
    }

    pub async fn get(&self, context: &AuthContext) -> AppResult<Value> {
        context.authorize_admin()?;

        if let Some(cached) = self.cache.get(keys::DASHBOARD).await {
            return Ok(cached);
        }

        let (total_vehicles, total_maintenances, total_spare_parts, total_maintenance_types) =
            tokio::try_join!(
                self.vehicle_repository.count(),
                self.maintenance_repository.count(),
                self.spare_part_repository.count(),
                self.maintenance_type_repository.count(),
            )?;

        let recent_maintenances = self
            .maintenance_repository
            .recent_with_relations(RECENT_LIMIT)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        let response = DashboardResponse {
            total_vehicles,
            total_maintenances,
            total_spare_parts,
            total_maintenance_types,
            recent_maintenances,
        };

        let value =
            serde_json::to_value(&response).map_err(|e| AppError::Internal(e.to_string()))?;
        self.cache.put(keys::DASHBOARD, value.clone()).await;

        Ok(value)
    }
}
