//! Controller de jenis perawatan
//!
//! El borrado de un jenis referenciado por alguna perawatan se rechaza con
//! Conflict (respaldado por ON DELETE RESTRICT en el schema): el listado de
//! perawatan siempre une el nombre del jenis y no tolera referencias
//! colgantes.

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::{keys, ViewCache};
use crate::dto::common::ApiResponse;
use crate::dto::maintenance_type_dto::{
    CreateMaintenanceTypeRequest, MaintenanceTypeResponse, UpdateMaintenanceTypeRequest,
};
use crate::middleware::auth::AuthContext;
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::maintenance_type_repository::MaintenanceTypeRepository;
use crate::utils::errors::{not_found_error, AppError, AppResult};

const COLLECTION_PATH: &str = "/maintenance-types";

pub struct MaintenanceTypeController {
    repository: MaintenanceTypeRepository,
    maintenance_repository: MaintenanceRepository,
    cache: ViewCache,
}

impl MaintenanceTypeController {
    pub fn new(pool: PgPool, cache: ViewCache) -> Self {
        Self {
            repository: MaintenanceTypeRepository::new(pool.clone()),
            maintenance_repository: MaintenanceRepository::new(pool),
            cache,
        }
    }

    /// Listado por nombre ascendente, cacheado
    pub async fn list(&self, context: &AuthContext) -> AppResult<Value> {
        context.authorize_admin()?;

        if let Some(cached) = self.cache.get(keys::MAINTENANCE_TYPES).await {
            return Ok(cached);
        }

        let types: Vec<MaintenanceTypeResponse> = self
            .repository
            .list()
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        let value =
            serde_json::to_value(&types).map_err(|e| AppError::Internal(e.to_string()))?;
        self.cache.put(keys::MAINTENANCE_TYPES, value.clone()).await;

        Ok(value)
    }

    pub async fn get_by_id(
        &self,
        context: &AuthContext,
        id: Uuid,
    ) -> AppResult<MaintenanceTypeResponse> {
        context.authorize_admin()?;

        let maintenance_type = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("MaintenanceType", &id.to_string()))?;

        Ok(maintenance_type.into())
    }

    pub async fn create(
        &self,
        context: &AuthContext,
        request: CreateMaintenanceTypeRequest,
    ) -> AppResult<ApiResponse<MaintenanceTypeResponse>> {
        context.authorize_admin()?;

        let new = request.parse()?;
        let maintenance_type = self.repository.create(new).await?;
        self.cache
            .invalidate(&[keys::MAINTENANCE_TYPES, keys::DASHBOARD])
            .await;

        Ok(ApiResponse::success_with_redirect(
            maintenance_type.into(),
            "Jenis perawatan berhasil ditambahkan",
            COLLECTION_PATH,
        ))
    }

    /// El nombre y el estimado aparecen unidos en el listado de perawatan,
    /// por eso también se invalida esa vista.
    pub async fn update(
        &self,
        context: &AuthContext,
        id: Uuid,
        request: UpdateMaintenanceTypeRequest,
    ) -> AppResult<ApiResponse<MaintenanceTypeResponse>> {
        context.authorize_admin()?;

        let changes = request.parse()?;
        let maintenance_type = self.repository.update(id, changes).await?;
        self.cache
            .invalidate(&[keys::MAINTENANCE_TYPES, keys::MAINTENANCES, keys::DASHBOARD])
            .await;

        Ok(ApiResponse::success_with_redirect(
            maintenance_type.into(),
            "Jenis perawatan berhasil diperbarui",
            COLLECTION_PATH,
        ))
    }

    pub async fn delete(&self, context: &AuthContext, id: Uuid) -> AppResult<ApiResponse<()>> {
        context.authorize_admin()?;

        if self.maintenance_repository.references_type(id).await? {
            return Err(AppError::Conflict(
                "Jenis perawatan masih digunakan oleh data perawatan".to_string(),
            ));
        }

        self.repository.delete(id).await?;
        self.cache
            .invalidate(&[keys::MAINTENANCE_TYPES, keys::DASHBOARD])
            .await;

        Ok(ApiResponse::success_with_redirect(
            (),
            "Jenis perawatan berhasil dihapus",
            COLLECTION_PATH,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::models::maintenance::NewMaintenance;
    use crate::models::maintenance_type::NewMaintenanceType;
    use crate::models::status::MaintenanceStatus;
    use crate::models::vehicle::NewVehicle;
    use crate::repositories::vehicle_repository::VehicleRepository;

    async fn seed_type(pool: &PgPool, name: &str) -> Uuid {
        MaintenanceTypeRepository::new(pool.clone())
            .create(NewMaintenanceType {
                name: name.to_string(),
                description: None,
                estimated_cost: Some(Decimal::from(150_000)),
            })
            .await
            .unwrap()
            .id
    }

    #[sqlx::test]
    async fn test_delete_referenced_type_is_rejected(pool: PgPool) {
        let type_id = seed_type(&pool, "Oil Change").await;
        let vehicle = VehicleRepository::new(pool.clone())
            .create(NewVehicle {
                license_plate: "B 3333 CC".to_string(),
                brand: "Honda".to_string(),
                model: "Brio".to_string(),
                year: 2021,
                color: None,
                mileage: 30000,
                user_id: None,
            })
            .await
            .unwrap();
        MaintenanceRepository::new(pool.clone())
            .create(NewMaintenance {
                vehicle_id: vehicle.id,
                maintenance_type_id: type_id,
                date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
                mileage: 31000,
                cost: Decimal::from(175_000),
                notes: None,
                status: MaintenanceStatus::Pending,
            })
            .await
            .unwrap();

        let controller = MaintenanceTypeController::new(pool.clone(), ViewCache::new());
        let err = controller
            .delete(&AuthContext::Disabled, type_id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // El jenis sigue existiendo
        assert!(MaintenanceTypeRepository::new(pool.clone())
            .find_by_id(type_id)
            .await
            .unwrap()
            .is_some());
    }

    #[sqlx::test]
    async fn test_delete_unreferenced_type_succeeds(pool: PgPool) {
        let type_id = seed_type(&pool, "Tune Up").await;

        let controller = MaintenanceTypeController::new(pool.clone(), ViewCache::new());
        controller
            .delete(&AuthContext::Disabled, type_id)
            .await
            .unwrap();

        assert!(MaintenanceTypeRepository::new(pool.clone())
            .find_by_id(type_id)
            .await
            .unwrap()
            .is_none());
    }
}
