//! Controller de suku cadang

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::{keys, ViewCache};
use crate::dto::common::ApiResponse;
use crate::dto::spare_part_dto::{
    CreateSparePartRequest, SparePartListResponse, SparePartResponse, UpdateSparePartRequest,
};
use crate::middleware::auth::AuthContext;
use crate::repositories::spare_part_repository::SparePartRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppError, AppResult};

const COLLECTION_PATH: &str = "/spare-parts";

pub struct SparePartController {
    repository: SparePartRepository,
    cache: ViewCache,
}

impl SparePartController {
    pub fn new(pool: PgPool, cache: ViewCache) -> Self {
        Self {
            repository: SparePartRepository::new(pool),
            cache,
        }
    }

    /// Listado por nombre ascendente con resumen de inventario, cacheado
    pub async fn list(&self, context: &AuthContext) -> AppResult<Value> {
        context.authorize_admin()?;

        if let Some(cached) = self.cache.get(keys::SPARE_PARTS).await {
            return Ok(cached);
        }

        let parts = self.repository.list().await?;
        let response = SparePartListResponse::from_parts(parts);

        let value =
            serde_json::to_value(&response).map_err(|e| AppError::Internal(e.to_string()))?;
        self.cache.put(keys::SPARE_PARTS, value.clone()).await;

        Ok(value)
    }

    pub async fn get_by_id(
        &self,
        context: &AuthContext,
        id: Uuid,
    ) -> AppResult<SparePartResponse> {
        context.authorize_admin()?;

        let part = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("SparePart", &id.to_string()))?;

        Ok(part.into())
    }

    pub async fn create(
        &self,
        context: &AuthContext,
        request: CreateSparePartRequest,
    ) -> AppResult<ApiResponse<SparePartResponse>> {
        context.authorize_admin()?;

        let new = request.parse()?;

        if self.repository.code_exists(&new.code, None).await? {
            return Err(conflict_error("SparePart", "code", &new.code));
        }

        let part = self.repository.create(new).await?;
        self.cache
            .invalidate(&[keys::SPARE_PARTS, keys::DASHBOARD])
            .await;

        Ok(ApiResponse::success_with_redirect(
            part.into(),
            "Suku cadang berhasil ditambahkan",
            COLLECTION_PATH,
        ))
    }

    pub async fn update(
        &self,
        context: &AuthContext,
        id: Uuid,
        request: UpdateSparePartRequest,
    ) -> AppResult<ApiResponse<SparePartResponse>> {
        context.authorize_admin()?;

        let changes = request.parse()?;

        if let Some(code) = &changes.code {
            if self.repository.code_exists(code, Some(id)).await? {
                return Err(conflict_error("SparePart", "code", code));
            }
        }

        let part = self.repository.update(id, changes).await?;
        self.cache
            .invalidate(&[keys::SPARE_PARTS, keys::DASHBOARD])
            .await;

        Ok(ApiResponse::success_with_redirect(
            part.into(),
            "Suku cadang berhasil diperbarui",
            COLLECTION_PATH,
        ))
    }

    pub async fn delete(&self, context: &AuthContext, id: Uuid) -> AppResult<ApiResponse<()>> {
        context.authorize_admin()?;

        self.repository.delete(id).await?;
        self.cache
            .invalidate(&[keys::SPARE_PARTS, keys::DASHBOARD])
            .await;

        Ok(ApiResponse::success_with_redirect(
            (),
            "Suku cadang berhasil dihapus",
            COLLECTION_PATH,
        ))
    }
}
