//! Repositorio de suku cadang
//!
//! Listado por nombre ascendente; el código es único.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::spare_part::{NewSparePart, SparePart, SparePartChanges};
use crate::utils::errors::{not_found_error, AppResult};

pub struct SparePartRepository {
    pool: PgPool,
}

impl SparePartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewSparePart) -> AppResult<SparePart> {
        let part = sqlx::query_as::<_, SparePart>(
            r#"
            INSERT INTO spare_parts (id, code, name, price, stock, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.code)
        .bind(new.name)
        .bind(new.price)
        .bind(new.stock)
        .bind(new.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(part)
    }

    pub async fn list(&self) -> AppResult<Vec<SparePart>> {
        let parts =
            sqlx::query_as::<_, SparePart>("SELECT * FROM spare_parts ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(parts)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SparePart>> {
        let part = sqlx::query_as::<_, SparePart>("SELECT * FROM spare_parts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(part)
    }

    pub async fn code_exists(&self, code: &str, exclude_id: Option<Uuid>) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM spare_parts
                WHERE code = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(code)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn update(&self, id: Uuid, changes: SparePartChanges) -> AppResult<SparePart> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("SparePart", &id.to_string()))?;

        let part = sqlx::query_as::<_, SparePart>(
            r#"
            UPDATE spare_parts
            SET code = $2, name = $3, price = $4, stock = $5,
                description = $6, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.code.unwrap_or(current.code))
        .bind(changes.name.unwrap_or(current.name))
        .bind(changes.price.unwrap_or(current.price))
        .bind(changes.stock.unwrap_or(current.stock))
        .bind(changes.description.unwrap_or(current.description))
        .fetch_one(&self.pool)
        .await?;

        Ok(part)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM spare_parts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn count(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM spare_parts")
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }
}
