//! Modelo de SparePart
//!
//! Suku cadang con código único, precio y stock. El "stock bajo" es un
//! umbral de display (stock < 10), nunca un flag almacenado.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::validation::LOW_STOCK_THRESHOLD;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SparePart {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SparePart {
    pub fn is_low_stock(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }
}

#[derive(Debug, Clone)]
pub struct NewSparePart {
    pub code: String,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SparePartChanges {
    pub code: Option<String>,
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub description: Option<Option<String>>,
}
