//! Controller de perawatan
//!
//! Las referencias a vehículo y jenis perawatan se verifican contra filas
//! existentes antes de escribir (además del FK en la base). El listado
//! global lleva el resumen por status; el filtrado por vehículo no se
//! cachea, solo la vista global.

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::{keys, ViewCache};
use crate::dto::common::ApiResponse;
use crate::dto::maintenance_dto::{
    AddSparePartUsageRequest, CreateMaintenanceRequest, MaintenanceDetailResponse,
    MaintenanceListResponse, MaintenanceStats, SparePartUsageResponse, UpdateMaintenanceRequest,
};
use crate::middleware::auth::AuthContext;
use crate::models::maintenance::Maintenance;
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::maintenance_spare_part_repository::MaintenanceSparePartRepository;
use crate::repositories::maintenance_type_repository::MaintenanceTypeRepository;
use crate::repositories::spare_part_repository::SparePartRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, AppError, AppResult};

const COLLECTION_PATH: &str = "/maintenances";

pub struct MaintenanceController {
    repository: MaintenanceRepository,
    vehicle_repository: VehicleRepository,
    maintenance_type_repository: MaintenanceTypeRepository,
    spare_part_repository: SparePartRepository,
    usage_repository: MaintenanceSparePartRepository,
    cache: ViewCache,
}

impl MaintenanceController {
    pub fn new(pool: PgPool, cache: ViewCache) -> Self {
        Self {
            repository: MaintenanceRepository::new(pool.clone()),
            vehicle_repository: VehicleRepository::new(pool.clone()),
            maintenance_type_repository: MaintenanceTypeRepository::new(pool.clone()),
            spare_part_repository: SparePartRepository::new(pool.clone()),
            usage_repository: MaintenanceSparePartRepository::new(pool),
            cache,
        }
    }

    /// Listado global (cacheado) o historial por vehículo (sin cache)
    pub async fn list(
        &self,
        context: &AuthContext,
        vehicle_id: Option<Uuid>,
    ) -> AppResult<Value> {
        context.authorize_admin()?;

        if vehicle_id.is_none() {
            if let Some(cached) = self.cache.get(keys::MAINTENANCES).await {
                return Ok(cached);
            }
        }

        let rows = self.repository.list_with_relations(vehicle_id).await?;
        let stats = MaintenanceStats::from_rows(&rows);
        let response = MaintenanceListResponse {
            stats,
            maintenances: rows.into_iter().map(Into::into).collect(),
        };

        let value =
            serde_json::to_value(&response).map_err(|e| AppError::Internal(e.to_string()))?;
        if vehicle_id.is_none() {
            self.cache.put(keys::MAINTENANCES, value.clone()).await;
        }

        Ok(value)
    }

    pub async fn get_by_id(
        &self,
        context: &AuthContext,
        id: Uuid,
    ) -> AppResult<MaintenanceDetailResponse> {
        context.authorize_admin()?;

        let row = self
            .repository
            .find_by_id_with_relations(id)
            .await?
            .ok_or_else(|| not_found_error("Maintenance", &id.to_string()))?;

        let spare_parts = self.usage_repository.list_by_maintenance(id).await?;

        Ok(MaintenanceDetailResponse::from_row(row, spare_parts))
    }

    pub async fn create(
        &self,
        context: &AuthContext,
        request: CreateMaintenanceRequest,
    ) -> AppResult<ApiResponse<Maintenance>> {
        context.authorize_admin()?;

        let new = request.parse()?;
        self.ensure_references_exist(new.vehicle_id, new.maintenance_type_id)
            .await?;

        let maintenance = self.repository.create(new).await?;
        self.cache
            .invalidate(&[keys::MAINTENANCES, keys::DASHBOARD])
            .await;

        Ok(ApiResponse::success_with_redirect(
            maintenance,
            "Perawatan berhasil ditambahkan",
            COLLECTION_PATH,
        ))
    }

    pub async fn update(
        &self,
        context: &AuthContext,
        id: Uuid,
        request: UpdateMaintenanceRequest,
    ) -> AppResult<ApiResponse<Maintenance>> {
        context.authorize_admin()?;

        let changes = request.parse()?;
        if let Some(vehicle_id) = changes.vehicle_id {
            if !self.vehicle_repository.exists(vehicle_id).await? {
                return Err(AppError::BadRequest(format!(
                    "Vehicle '{}' does not exist",
                    vehicle_id
                )));
            }
        }
        if let Some(type_id) = changes.maintenance_type_id {
            if !self.maintenance_type_repository.exists(type_id).await? {
                return Err(AppError::BadRequest(format!(
                    "MaintenanceType '{}' does not exist",
                    type_id
                )));
            }
        }

        let maintenance = self.repository.update(id, changes).await?;
        self.cache
            .invalidate(&[keys::MAINTENANCES, keys::DASHBOARD])
            .await;

        Ok(ApiResponse::success_with_redirect(
            maintenance,
            "Perawatan berhasil diperbarui",
            &format!("{}/{}", COLLECTION_PATH, id),
        ))
    }

    pub async fn delete(&self, context: &AuthContext, id: Uuid) -> AppResult<ApiResponse<()>> {
        context.authorize_admin()?;

        self.repository.delete(id).await?;
        self.cache
            .invalidate(&[keys::MAINTENANCES, keys::DASHBOARD])
            .await;

        Ok(ApiResponse::success_with_redirect(
            (),
            "Perawatan berhasil dihapus",
            COLLECTION_PATH,
        ))
    }

    /// Registrar uso de un suku cadang con snapshot del precio actual.
    /// Ninguna vista cacheada muestra los usos, así que no hay invalidación.
    pub async fn add_spare_part(
        &self,
        context: &AuthContext,
        maintenance_id: Uuid,
        request: AddSparePartUsageRequest,
    ) -> AppResult<ApiResponse<SparePartUsageResponse>> {
        context.authorize_admin()?;

        let (spare_part_id, quantity) = request.parse()?;

        if self.repository.find_by_id(maintenance_id).await?.is_none() {
            return Err(not_found_error("Maintenance", &maintenance_id.to_string()));
        }
        let part = self
            .spare_part_repository
            .find_by_id(spare_part_id)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!("SparePart '{}' does not exist", spare_part_id))
            })?;

        let usage = self
            .usage_repository
            .add(maintenance_id, spare_part_id, quantity, part.price)
            .await?;

        let response = SparePartUsageResponse {
            id: usage.id,
            spare_part_id: usage.spare_part_id,
            spare_part_code: part.code,
            spare_part_name: part.name,
            quantity: usage.quantity,
            price: usage.price,
            subtotal: usage.price * rust_decimal::Decimal::from(usage.quantity),
        };

        Ok(ApiResponse::success_with_message(
            response,
            "Suku cadang berhasil ditambahkan ke perawatan".to_string(),
        ))
    }

    pub async fn remove_spare_part(
        &self,
        context: &AuthContext,
        maintenance_id: Uuid,
        usage_id: Uuid,
    ) -> AppResult<ApiResponse<()>> {
        context.authorize_admin()?;

        self.usage_repository.delete(maintenance_id, usage_id).await?;

        Ok(ApiResponse::success_with_message(
            (),
            "Suku cadang berhasil dihapus dari perawatan".to_string(),
        ))
    }

    async fn ensure_references_exist(
        &self,
        vehicle_id: Uuid,
        maintenance_type_id: Uuid,
    ) -> AppResult<()> {
        if !self.vehicle_repository.exists(vehicle_id).await? {
            return Err(AppError::BadRequest(format!(
                "Vehicle '{}' does not exist",
                vehicle_id
            )));
        }
        if !self
            .maintenance_type_repository
            .exists(maintenance_type_id)
            .await?
        {
            return Err(AppError::BadRequest(format!(
                "MaintenanceType '{}' does not exist",
                maintenance_type_id
            )));
        }
        Ok(())
    }
}
