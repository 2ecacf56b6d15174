//! DTOs de SparePart
//!
//! El listado lleva el resumen de inventario: total de items, stock total y
//! cuántos entran en el umbral de stock bajo.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::ValidationErrors;

use crate::models::spare_part::{NewSparePart, SparePart, SparePartChanges};
use crate::utils::validation::{
    blank_to_none, parse_decimal, parse_int, validate_non_negative, validate_not_empty, FormErrors,
};

#[derive(Debug, Deserialize)]
pub struct CreateSparePartRequest {
    pub code: String,
    pub name: String,
    pub price: String,
    pub stock: String,
    pub description: Option<String>,
}

impl CreateSparePartRequest {
    pub fn parse(self) -> Result<NewSparePart, ValidationErrors> {
        let mut form = FormErrors::new();

        form.ensure("code", validate_not_empty(&self.code));
        form.ensure("name", validate_not_empty(&self.name));

        let price = form.check("price", parse_decimal(&self.price).and_then(|p| {
            validate_non_negative(p)?;
            Ok(p)
        }));
        let stock = form.check("stock", parse_int(&self.stock).and_then(|s| {
            validate_non_negative(s)?;
            Ok(s)
        }));

        form.finish()?;

        Ok(NewSparePart {
            code: self.code.trim().to_string(),
            name: self.name.trim().to_string(),
            price: price.unwrap(),
            stock: stock.unwrap(),
            description: blank_to_none(self.description),
        })
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateSparePartRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub price: Option<String>,
    pub stock: Option<String>,
    pub description: Option<String>,
}

impl UpdateSparePartRequest {
    pub fn parse(self) -> Result<SparePartChanges, ValidationErrors> {
        let mut form = FormErrors::new();
        let mut changes = SparePartChanges::default();

        if let Some(code) = blank_to_none(self.code) {
            changes.code = Some(code);
        }
        if let Some(name) = blank_to_none(self.name) {
            changes.name = Some(name);
        }
        if let Some(price) = self.price {
            changes.price = form.check("price", parse_decimal(&price).and_then(|p| {
                validate_non_negative(p)?;
                Ok(p)
            }));
        }
        if let Some(stock) = self.stock {
            changes.stock = form.check("stock", parse_int(&stock).and_then(|s| {
                validate_non_negative(s)?;
                Ok(s)
            }));
        }
        if let Some(description) = self.description {
            changes.description = Some(blank_to_none(Some(description)));
        }

        form.finish()?;
        Ok(changes)
    }
}

#[derive(Debug, Serialize)]
pub struct SparePartResponse {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub low_stock: bool,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SparePart> for SparePartResponse {
    fn from(part: SparePart) -> Self {
        let low_stock = part.is_low_stock();
        Self {
            id: part.id,
            code: part.code,
            name: part.name,
            price: part.price,
            stock: part.stock,
            low_stock,
            description: part.description,
            created_at: part.created_at,
            updated_at: part.updated_at,
        }
    }
}

/// Listado de suku cadang con resumen de inventario
#[derive(Debug, Serialize)]
pub struct SparePartListResponse {
    pub total_parts: usize,
    pub total_stock: i64,
    pub low_stock_count: usize,
    pub spare_parts: Vec<SparePartResponse>,
}

impl SparePartListResponse {
    pub fn from_parts(parts: Vec<SparePart>) -> Self {
        let total_parts = parts.len();
        let total_stock = parts.iter().map(|p| i64::from(p.stock)).sum();
        let low_stock_count = parts.iter().filter(|p| p.is_low_stock()).count();
        Self {
            total_parts,
            total_stock,
            low_stock_count,
            spare_parts: parts.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part_with_stock(stock: i32) -> SparePart {
        SparePart {
            id: Uuid::new_v4(),
            code: format!("SP-{:03}", stock),
            name: "Filter Udara".to_string(),
            price: Decimal::from(85_000),
            stock,
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_list_summary_counts() {
        let parts = vec![
            part_with_stock(5),
            part_with_stock(15),
            part_with_stock(3),
            part_with_stock(50),
        ];
        let response = SparePartListResponse::from_parts(parts);
        assert_eq!(response.total_parts, 4);
        assert_eq!(response.total_stock, 73);
        assert_eq!(response.low_stock_count, 2);
    }

    #[test]
    fn test_low_stock_threshold_is_exclusive() {
        // Exactamente 10 no es stock bajo
        let response = SparePartListResponse::from_parts(vec![part_with_stock(10)]);
        assert_eq!(response.low_stock_count, 0);
        assert!(!response.spare_parts[0].low_stock);

        let response = SparePartListResponse::from_parts(vec![part_with_stock(9)]);
        assert_eq!(response.low_stock_count, 1);
        assert!(response.spare_parts[0].low_stock);
    }

    #[test]
    fn test_create_parse_ok() {
        let parsed = CreateSparePartRequest {
            code: "SP-001".to_string(),
            name: "Oli Mesin".to_string(),
            price: "95000".to_string(),
            stock: "24".to_string(),
            description: None,
        }
        .parse()
        .unwrap();
        assert_eq!(parsed.code, "SP-001");
        assert_eq!(parsed.price, Decimal::from(95_000));
        assert_eq!(parsed.stock, 24);
    }

    #[test]
    fn test_create_rejects_negative_values() {
        let result = CreateSparePartRequest {
            code: "SP-002".to_string(),
            name: "Busi".to_string(),
            price: "-100".to_string(),
            stock: "-1".to_string(),
            description: None,
        }
        .parse();
        let errors = result.unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
        assert!(errors.field_errors().contains_key("stock"));
    }

    #[test]
    fn test_update_partial() {
        let changes = UpdateSparePartRequest {
            stock: Some("7".to_string()),
            ..Default::default()
        }
        .parse()
        .unwrap();
        assert_eq!(changes.stock, Some(7));
        assert!(changes.price.is_none());
    }
}
