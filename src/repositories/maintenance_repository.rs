//! Repositorio de perawatan
//!
//! Los listados siempre incluyen los campos de display del vehículo y del
//! jenis perawatan (join en la consulta, no merge en la aplicación). El
//! orden es por fecha descendente, tanto global como filtrado por vehículo.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::maintenance::{
    Maintenance, MaintenanceChanges, MaintenanceWithRelations, NewMaintenance,
};
use crate::utils::errors::{not_found_error, AppResult};

const SELECT_WITH_RELATIONS: &str = r#"
    SELECT m.id, m.vehicle_id, m.maintenance_type_id, m.date, m.mileage,
           m.cost, m.notes, m.status, m.created_at, m.updated_at,
           v.license_plate AS vehicle_license_plate,
           v.brand AS vehicle_brand,
           v.model AS vehicle_model,
           v.year AS vehicle_year,
           v.color AS vehicle_color,
           v.mileage AS vehicle_mileage,
           mt.name AS maintenance_type_name,
           mt.description AS maintenance_type_description,
           mt.estimated_cost AS maintenance_type_estimated_cost
    FROM maintenances m
    JOIN vehicles v ON v.id = m.vehicle_id
    JOIN maintenance_types mt ON mt.id = m.maintenance_type_id
"#;

pub struct MaintenanceRepository {
    pool: PgPool,
}

impl MaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewMaintenance) -> AppResult<Maintenance> {
        let maintenance = sqlx::query_as::<_, Maintenance>(
            r#"
            INSERT INTO maintenances (id, vehicle_id, maintenance_type_id, date, mileage, cost, notes, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.vehicle_id)
        .bind(new.maintenance_type_id)
        .bind(new.date)
        .bind(new.mileage)
        .bind(new.cost)
        .bind(new.notes)
        .bind(new.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(maintenance)
    }

    /// Listado con joins; `vehicle_id` arma el historial por vehículo
    pub async fn list_with_relations(
        &self,
        vehicle_id: Option<Uuid>,
    ) -> AppResult<Vec<MaintenanceWithRelations>> {
        let query = format!(
            "{} WHERE ($1::uuid IS NULL OR m.vehicle_id = $1) ORDER BY m.date DESC",
            SELECT_WITH_RELATIONS
        );
        let rows = sqlx::query_as::<_, MaintenanceWithRelations>(&query)
            .bind(vehicle_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Las N perawatan más recientes, para el dashboard
    pub async fn recent_with_relations(
        &self,
        limit: i64,
    ) -> AppResult<Vec<MaintenanceWithRelations>> {
        let query = format!("{} ORDER BY m.date DESC LIMIT $1", SELECT_WITH_RELATIONS);
        let rows = sqlx::query_as::<_, MaintenanceWithRelations>(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Maintenance>> {
        let maintenance =
            sqlx::query_as::<_, Maintenance>("SELECT * FROM maintenances WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(maintenance)
    }

    pub async fn find_by_id_with_relations(
        &self,
        id: Uuid,
    ) -> AppResult<Option<MaintenanceWithRelations>> {
        let query = format!("{} WHERE m.id = $1", SELECT_WITH_RELATIONS);
        let row = sqlx::query_as::<_, MaintenanceWithRelations>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    pub async fn update(&self, id: Uuid, changes: MaintenanceChanges) -> AppResult<Maintenance> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Maintenance", &id.to_string()))?;

        let status = changes
            .status
            .map(|s| s.as_str().to_string())
            .unwrap_or(current.status);

        let maintenance = sqlx::query_as::<_, Maintenance>(
            r#"
            UPDATE maintenances
            SET vehicle_id = $2, maintenance_type_id = $3, date = $4, mileage = $5,
                cost = $6, notes = $7, status = $8, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.vehicle_id.unwrap_or(current.vehicle_id))
        .bind(changes.maintenance_type_id.unwrap_or(current.maintenance_type_id))
        .bind(changes.date.unwrap_or(current.date))
        .bind(changes.mileage.unwrap_or(current.mileage))
        .bind(changes.cost.unwrap_or(current.cost))
        .bind(changes.notes.unwrap_or(current.notes))
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(maintenance)
    }

    /// Idempotente; el cascade a maintenance_spare_parts es de la base
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM maintenances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM maintenances")
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    /// ¿Hay perawatan que referencien este jenis perawatan?
    pub async fn references_type(&self, maintenance_type_id: Uuid) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM maintenances WHERE maintenance_type_id = $1)",
        )
        .bind(maintenance_type_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }
}
