//! Repositorio de jenis perawatan
//!
//! Datos de referencia, listados por nombre ascendente.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::maintenance_type::{
    MaintenanceType, MaintenanceTypeChanges, NewMaintenanceType,
};
use crate::utils::errors::{not_found_error, AppResult};

pub struct MaintenanceTypeRepository {
    pool: PgPool,
}

impl MaintenanceTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewMaintenanceType) -> AppResult<MaintenanceType> {
        let maintenance_type = sqlx::query_as::<_, MaintenanceType>(
            r#"
            INSERT INTO maintenance_types (id, name, description, estimated_cost)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.name)
        .bind(new.description)
        .bind(new.estimated_cost)
        .fetch_one(&self.pool)
        .await?;

        Ok(maintenance_type)
    }

    pub async fn list(&self) -> AppResult<Vec<MaintenanceType>> {
        let types = sqlx::query_as::<_, MaintenanceType>(
            "SELECT * FROM maintenance_types ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(types)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MaintenanceType>> {
        let maintenance_type =
            sqlx::query_as::<_, MaintenanceType>("SELECT * FROM maintenance_types WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(maintenance_type)
    }

    pub async fn exists(&self, id: Uuid) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM maintenance_types WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: MaintenanceTypeChanges,
    ) -> AppResult<MaintenanceType> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("MaintenanceType", &id.to_string()))?;

        let maintenance_type = sqlx::query_as::<_, MaintenanceType>(
            r#"
            UPDATE maintenance_types
            SET name = $2, description = $3, estimated_cost = $4, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.name.unwrap_or(current.name))
        .bind(changes.description.unwrap_or(current.description))
        .bind(changes.estimated_cost.unwrap_or(current.estimated_cost))
        .fetch_one(&self.pool)
        .await?;

        Ok(maintenance_type)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM maintenance_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM maintenance_types")
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }
}
