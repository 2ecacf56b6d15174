//! Controller de vehículos
//!
//! Valida el formulario parseado, invoca el repositorio, invalida las vistas
//! cacheadas afectadas y arma la navegación de éxito. Las mutaciones de
//! vehículo también invalidan el listado de perawatan porque ese listado
//! lleva los campos del vehículo unidos.

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::{keys, ViewCache};
use crate::dto::common::ApiResponse;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateMileageRequest, UpdateVehicleRequest, VehicleDetailResponse,
    VehicleResponse,
};
use crate::middleware::auth::AuthContext;
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppError, AppResult};

const COLLECTION_PATH: &str = "/vehicles";

pub struct VehicleController {
    repository: VehicleRepository,
    maintenance_repository: MaintenanceRepository,
    cache: ViewCache,
}

impl VehicleController {
    pub fn new(pool: PgPool, cache: ViewCache) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            maintenance_repository: MaintenanceRepository::new(pool),
            cache,
        }
    }

    /// Listado ordenado por fecha de creación descendente, cacheado
    pub async fn list(&self, context: &AuthContext) -> AppResult<Value> {
        context.authorize_admin()?;

        if let Some(cached) = self.cache.get(keys::VEHICLES).await {
            return Ok(cached);
        }

        let vehicles: Vec<VehicleResponse> = self
            .repository
            .list()
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        let value = serde_json::to_value(&vehicles)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        self.cache.put(keys::VEHICLES, value.clone()).await;

        Ok(value)
    }

    /// Detalle con el historial de perawatan del vehículo (fecha descendente)
    pub async fn get_by_id(
        &self,
        context: &AuthContext,
        id: Uuid,
    ) -> AppResult<VehicleDetailResponse> {
        context.authorize_admin()?;

        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        let maintenances = self
            .maintenance_repository
            .list_with_relations(Some(id))
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(VehicleDetailResponse {
            vehicle: vehicle.into(),
            maintenances,
        })
    }

    pub async fn create(
        &self,
        context: &AuthContext,
        request: CreateVehicleRequest,
    ) -> AppResult<ApiResponse<VehicleResponse>> {
        context.authorize_admin()?;

        let mut new = request.parse()?;
        new.user_id = context.user_id();

        if self
            .repository
            .license_plate_exists(&new.license_plate, None)
            .await?
        {
            return Err(conflict_error("Vehicle", "license_plate", &new.license_plate));
        }

        let vehicle = self.repository.create(new).await?;
        self.cache
            .invalidate(&[keys::VEHICLES, keys::DASHBOARD])
            .await;

        Ok(ApiResponse::success_with_redirect(
            vehicle.into(),
            "Kendaraan berhasil ditambahkan",
            COLLECTION_PATH,
        ))
    }

    pub async fn update(
        &self,
        context: &AuthContext,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> AppResult<ApiResponse<VehicleResponse>> {
        context.authorize_admin()?;

        let changes = request.parse()?;

        if let Some(plate) = &changes.license_plate {
            if self.repository.license_plate_exists(plate, Some(id)).await? {
                return Err(conflict_error("Vehicle", "license_plate", plate));
            }
        }

        let vehicle = self.repository.update(id, changes).await?;
        self.cache
            .invalidate(&[keys::VEHICLES, keys::MAINTENANCES, keys::DASHBOARD])
            .await;

        Ok(ApiResponse::success_with_redirect(
            vehicle.into(),
            "Kendaraan berhasil diperbarui",
            &format!("{}/{}", COLLECTION_PATH, id),
        ))
    }

    /// Actualización rápida de kilometraje desde el listado
    pub async fn update_mileage(
        &self,
        context: &AuthContext,
        id: Uuid,
        request: UpdateMileageRequest,
    ) -> AppResult<ApiResponse<VehicleResponse>> {
        context.authorize_admin()?;

        let mileage = request.parse()?;
        let vehicle = self.repository.update_mileage(id, mileage).await?;
        self.cache
            .invalidate(&[keys::VEHICLES, keys::MAINTENANCES, keys::DASHBOARD])
            .await;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Kilometer berhasil diperbarui".to_string(),
        ))
    }

    /// El borrado cascadea a las perawatan del vehículo (lo aplica la base),
    /// así que el listado de perawatan también se invalida.
    pub async fn delete(&self, context: &AuthContext, id: Uuid) -> AppResult<ApiResponse<()>> {
        context.authorize_admin()?;

        self.repository.delete(id).await?;
        self.cache
            .invalidate(&[keys::VEHICLES, keys::MAINTENANCES, keys::DASHBOARD])
            .await;

        Ok(ApiResponse::success_with_redirect(
            (),
            "Kendaraan berhasil dihapus",
            COLLECTION_PATH,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use serde_json::json;

    use crate::models::maintenance::NewMaintenance;
    use crate::models::maintenance_type::NewMaintenanceType;
    use crate::models::status::MaintenanceStatus;
    use crate::models::vehicle::NewVehicle;
    use crate::repositories::maintenance_type_repository::MaintenanceTypeRepository;

    fn new_vehicle(plate: &str) -> NewVehicle {
        NewVehicle {
            license_plate: plate.to_string(),
            brand: "Toyota".to_string(),
            model: "Avanza".to_string(),
            year: 2020,
            color: None,
            mileage: 40000,
            user_id: None,
        }
    }

    async fn seed_maintenance(pool: &PgPool, vehicle_id: Uuid) {
        let type_id = MaintenanceTypeRepository::new(pool.clone())
            .create(NewMaintenanceType {
                name: "Oil Change".to_string(),
                description: None,
                estimated_cost: None,
            })
            .await
            .unwrap()
            .id;
        MaintenanceRepository::new(pool.clone())
            .create(NewMaintenance {
                vehicle_id,
                maintenance_type_id: type_id,
                date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                mileage: 41000,
                cost: Decimal::from(150_000),
                notes: None,
                status: MaintenanceStatus::Completed,
            })
            .await
            .unwrap();
    }

    #[sqlx::test]
    async fn test_delete_vehicle_leaves_no_maintenances(pool: PgPool) {
        let vehicle_repository = VehicleRepository::new(pool.clone());
        let maintenance_repository = MaintenanceRepository::new(pool.clone());

        let vehicle = vehicle_repository
            .create(new_vehicle("B 1111 AA"))
            .await
            .unwrap();
        seed_maintenance(&pool, vehicle.id).await;
        seed_maintenance(&pool, vehicle.id).await;
        assert_eq!(
            maintenance_repository
                .list_with_relations(Some(vehicle.id))
                .await
                .unwrap()
                .len(),
            2
        );

        let controller = VehicleController::new(pool.clone(), ViewCache::new());
        controller
            .delete(&AuthContext::Disabled, vehicle.id)
            .await
            .unwrap();

        assert!(vehicle_repository
            .find_by_id(vehicle.id)
            .await
            .unwrap()
            .is_none());
        assert!(maintenance_repository
            .list_with_relations(Some(vehicle.id))
            .await
            .unwrap()
            .is_empty());
        assert_eq!(maintenance_repository.count().await.unwrap(), 0);
    }

    #[sqlx::test]
    async fn test_update_mileage_invalidates_joined_views(pool: PgPool) {
        let cache = ViewCache::new();
        cache.put(keys::VEHICLES, json!([])).await;
        cache.put(keys::MAINTENANCES, json!([])).await;
        cache.put(keys::DASHBOARD, json!({})).await;

        let vehicle = VehicleRepository::new(pool.clone())
            .create(new_vehicle("B 2222 BB"))
            .await
            .unwrap();

        let controller = VehicleController::new(pool.clone(), cache.clone());
        let response = controller
            .update_mileage(
                &AuthContext::Disabled,
                vehicle.id,
                UpdateMileageRequest {
                    mileage: "60000".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(response.data.unwrap().mileage, 60000);

        assert!(cache.get(keys::VEHICLES).await.is_none());
        assert!(cache.get(keys::MAINTENANCES).await.is_none());
        assert!(cache.get(keys::DASHBOARD).await.is_none());
    }
}
