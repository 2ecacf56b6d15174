//! Repositorio de la tabla de unión perawatan ↔ suku cadang
//!
//! El precio se copia del suku cadang al momento del alta (snapshot), así
//! los costos históricos no se mueven si el precio cambia después.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::maintenance_spare_part::{
    MaintenanceSparePart, MaintenanceSparePartWithPart,
};
use crate::utils::errors::AppResult;

pub struct MaintenanceSparePartRepository {
    pool: PgPool,
}

impl MaintenanceSparePartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn add(
        &self,
        maintenance_id: Uuid,
        spare_part_id: Uuid,
        quantity: i32,
        price_snapshot: Decimal,
    ) -> AppResult<MaintenanceSparePart> {
        let usage = sqlx::query_as::<_, MaintenanceSparePart>(
            r#"
            INSERT INTO maintenance_spare_parts (id, maintenance_id, spare_part_id, quantity, price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(maintenance_id)
        .bind(spare_part_id)
        .bind(quantity)
        .bind(price_snapshot)
        .fetch_one(&self.pool)
        .await?;

        Ok(usage)
    }

    pub async fn list_by_maintenance(
        &self,
        maintenance_id: Uuid,
    ) -> AppResult<Vec<MaintenanceSparePartWithPart>> {
        let rows = sqlx::query_as::<_, MaintenanceSparePartWithPart>(
            r#"
            SELECT msp.id, msp.maintenance_id, msp.spare_part_id, msp.quantity,
                   msp.price, msp.created_at,
                   sp.code AS spare_part_code,
                   sp.name AS spare_part_name
            FROM maintenance_spare_parts msp
            JOIN spare_parts sp ON sp.id = msp.spare_part_id
            WHERE msp.maintenance_id = $1
            ORDER BY msp.created_at ASC
            "#,
        )
        .bind(maintenance_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Idempotente; el scoping por maintenance_id evita borrar usos ajenos
    pub async fn delete(&self, maintenance_id: Uuid, usage_id: Uuid) -> AppResult<()> {
        sqlx::query(
            "DELETE FROM maintenance_spare_parts WHERE id = $1 AND maintenance_id = $2",
        )
        .bind(usage_id)
        .bind(maintenance_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
