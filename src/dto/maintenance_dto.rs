//! DTOs de Maintenance
//!
//! Incluye la composición de vistas: items de listado con los campos del
//! vehículo y del jenis perawatan unidos, resumen por status y el delta de
//! costo contra el estimado.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::ValidationErrors;

use crate::models::maintenance::{MaintenanceChanges, MaintenanceWithRelations, NewMaintenance};
use crate::models::maintenance_spare_part::MaintenanceSparePartWithPart;
use crate::models::status::MaintenanceStatus;
use crate::utils::validation::{
    blank_to_none, parse_date, parse_decimal, parse_int, parse_uuid, validate_enum,
    validate_non_negative, validate_positive, FormErrors,
};

/// Request para registrar una perawatan
#[derive(Debug, Deserialize)]
pub struct CreateMaintenanceRequest {
    pub vehicle_id: String,
    pub maintenance_type_id: String,
    pub date: String,
    pub mileage: String,
    pub cost: String,
    pub status: String,
    pub notes: Option<String>,
}

impl CreateMaintenanceRequest {
    pub fn parse(self) -> Result<NewMaintenance, ValidationErrors> {
        let mut form = FormErrors::new();

        let vehicle_id = form.check("vehicle_id", parse_uuid(&self.vehicle_id));
        let maintenance_type_id =
            form.check("maintenance_type_id", parse_uuid(&self.maintenance_type_id));
        let date = form.check("date", parse_date(&self.date));
        let mileage = form.check("mileage", parse_int(&self.mileage).and_then(|m| {
            validate_non_negative(m)?;
            Ok(m)
        }));
        let cost = form.check("cost", parse_decimal(&self.cost).and_then(|c| {
            validate_non_negative(c)?;
            Ok(c)
        }));
        form.ensure(
            "status",
            validate_enum(&self.status, &MaintenanceStatus::ALLOWED_VALUES),
        );

        form.finish()?;

        Ok(NewMaintenance {
            vehicle_id: vehicle_id.unwrap(),
            maintenance_type_id: maintenance_type_id.unwrap(),
            date: date.unwrap(),
            mileage: mileage.unwrap(),
            cost: cost.unwrap(),
            notes: blank_to_none(self.notes),
            // validate_enum ya garantizó que el parse no falla
            status: MaintenanceStatus::parse(&self.status).unwrap_or(MaintenanceStatus::Pending),
        })
    }
}

/// Request para editar una perawatan (reemplazo parcial)
#[derive(Debug, Deserialize, Default)]
pub struct UpdateMaintenanceRequest {
    pub vehicle_id: Option<String>,
    pub maintenance_type_id: Option<String>,
    pub date: Option<String>,
    pub mileage: Option<String>,
    pub cost: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl UpdateMaintenanceRequest {
    pub fn parse(self) -> Result<MaintenanceChanges, ValidationErrors> {
        let mut form = FormErrors::new();
        let mut changes = MaintenanceChanges::default();

        if let Some(vehicle_id) = self.vehicle_id {
            changes.vehicle_id = form.check("vehicle_id", parse_uuid(&vehicle_id));
        }
        if let Some(type_id) = self.maintenance_type_id {
            changes.maintenance_type_id = form.check("maintenance_type_id", parse_uuid(&type_id));
        }
        if let Some(date) = self.date {
            changes.date = form.check("date", parse_date(&date));
        }
        if let Some(mileage) = self.mileage {
            changes.mileage = form.check("mileage", parse_int(&mileage).and_then(|m| {
                validate_non_negative(m)?;
                Ok(m)
            }));
        }
        if let Some(cost) = self.cost {
            changes.cost = form.check("cost", parse_decimal(&cost).and_then(|c| {
                validate_non_negative(c)?;
                Ok(c)
            }));
        }
        if let Some(status) = self.status {
            form.ensure(
                "status",
                validate_enum(&status, &MaintenanceStatus::ALLOWED_VALUES),
            );
            changes.status = MaintenanceStatus::parse(&status);
        }
        if let Some(notes) = self.notes {
            changes.notes = Some(blank_to_none(Some(notes)));
        }

        form.finish()?;
        Ok(changes)
    }
}

/// Filtro de listado (historial por vehículo)
#[derive(Debug, Deserialize, Default)]
pub struct MaintenanceListQuery {
    pub vehicle_id: Option<Uuid>,
}

/// Request para registrar uso de un suku cadang en una perawatan
#[derive(Debug, Deserialize)]
pub struct AddSparePartUsageRequest {
    pub spare_part_id: String,
    pub quantity: String,
}

impl AddSparePartUsageRequest {
    pub fn parse(self) -> Result<(Uuid, i32), ValidationErrors> {
        let mut form = FormErrors::new();
        let spare_part_id = form.check("spare_part_id", parse_uuid(&self.spare_part_id));
        let quantity = form.check("quantity", parse_int(&self.quantity).and_then(|q| {
            validate_positive(q)?;
            Ok(q)
        }));
        form.finish()?;
        Ok((spare_part_id.unwrap(), quantity.unwrap()))
    }
}

/// Delta entre costo real y estimado, solo magnitud más polaridad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostDelta {
    pub amount: Decimal,
    pub over_estimate: bool,
}

impl CostDelta {
    /// Solo se calcula cuando hay costo estimado
    pub fn between(cost: Decimal, estimated_cost: Option<Decimal>) -> Option<Self> {
        estimated_cost.map(|estimated| Self {
            amount: (cost - estimated).abs(),
            over_estimate: cost > estimated,
        })
    }
}

/// Item de listado con los campos de display unidos
#[derive(Debug, Serialize)]
pub struct MaintenanceListItem {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub vehicle_license_plate: String,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub maintenance_type_id: Uuid,
    pub maintenance_type_name: String,
    pub date: NaiveDate,
    pub mileage: i32,
    pub cost: Decimal,
    pub status: String,
    pub status_label: &'static str,
    pub status_style: &'static str,
    pub cost_delta: Option<CostDelta>,
}

impl From<MaintenanceWithRelations> for MaintenanceListItem {
    fn from(row: MaintenanceWithRelations) -> Self {
        let badge = row.status_badge();
        let cost_delta = CostDelta::between(row.cost, row.maintenance_type_estimated_cost);
        Self {
            id: row.id,
            vehicle_id: row.vehicle_id,
            vehicle_license_plate: row.vehicle_license_plate,
            vehicle_brand: row.vehicle_brand,
            vehicle_model: row.vehicle_model,
            maintenance_type_id: row.maintenance_type_id,
            maintenance_type_name: row.maintenance_type_name,
            date: row.date,
            mileage: row.mileage,
            cost: row.cost,
            status: row.status,
            status_label: badge.label,
            status_style: badge.style,
            cost_delta,
        }
    }
}

/// Resumen por status del listado. Cancelled se cuenta en el total pero no
/// tiene columna propia, igual que en el panel original.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MaintenanceStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl MaintenanceStats {
    pub fn from_rows(rows: &[MaintenanceWithRelations]) -> Self {
        Self {
            total: rows.len(),
            pending: rows.iter().filter(|r| r.status == "pending").count(),
            in_progress: rows.iter().filter(|r| r.status == "in_progress").count(),
            completed: rows.iter().filter(|r| r.status == "completed").count(),
        }
    }
}

/// Listado completo de perawatan con su resumen
#[derive(Debug, Serialize)]
pub struct MaintenanceListResponse {
    pub stats: MaintenanceStats,
    pub maintenances: Vec<MaintenanceListItem>,
}

/// Uso de suku cadang dentro del detalle de una perawatan
#[derive(Debug, Serialize)]
pub struct SparePartUsageResponse {
    pub id: Uuid,
    pub spare_part_id: Uuid,
    pub spare_part_code: String,
    pub spare_part_name: String,
    pub quantity: i32,
    /// Precio snapshot al momento del uso
    pub price: Decimal,
    pub subtotal: Decimal,
}

impl From<MaintenanceSparePartWithPart> for SparePartUsageResponse {
    fn from(row: MaintenanceSparePartWithPart) -> Self {
        let subtotal = row.price * Decimal::from(row.quantity);
        Self {
            id: row.id,
            spare_part_id: row.spare_part_id,
            spare_part_code: row.spare_part_code,
            spare_part_name: row.spare_part_name,
            quantity: row.quantity,
            price: row.price,
            subtotal,
        }
    }
}

/// Detalle completo de una perawatan
#[derive(Debug, Serialize)]
pub struct MaintenanceDetailResponse {
    pub id: Uuid,
    pub date: NaiveDate,
    pub mileage: i32,
    pub cost: Decimal,
    pub notes: Option<String>,
    pub status: String,
    pub status_label: &'static str,
    pub status_style: &'static str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub vehicle_id: Uuid,
    pub vehicle_license_plate: String,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub vehicle_year: i32,
    pub vehicle_color: Option<String>,
    pub vehicle_mileage: i32,
    pub maintenance_type_id: Uuid,
    pub maintenance_type_name: String,
    pub maintenance_type_description: Option<String>,
    pub maintenance_type_estimated_cost: Option<Decimal>,
    pub cost_delta: Option<CostDelta>,
    pub spare_parts: Vec<SparePartUsageResponse>,
}

impl MaintenanceDetailResponse {
    pub fn from_row(
        row: MaintenanceWithRelations,
        spare_parts: Vec<MaintenanceSparePartWithPart>,
    ) -> Self {
        let badge = row.status_badge();
        let cost_delta = CostDelta::between(row.cost, row.maintenance_type_estimated_cost);
        Self {
            id: row.id,
            date: row.date,
            mileage: row.mileage,
            cost: row.cost,
            notes: row.notes,
            status: row.status,
            status_label: badge.label,
            status_style: badge.style,
            created_at: row.created_at,
            updated_at: row.updated_at,
            vehicle_id: row.vehicle_id,
            vehicle_license_plate: row.vehicle_license_plate,
            vehicle_brand: row.vehicle_brand,
            vehicle_model: row.vehicle_model,
            vehicle_year: row.vehicle_year,
            vehicle_color: row.vehicle_color,
            vehicle_mileage: row.vehicle_mileage,
            maintenance_type_id: row.maintenance_type_id,
            maintenance_type_name: row.maintenance_type_name,
            maintenance_type_description: row.maintenance_type_description,
            maintenance_type_estimated_cost: row.maintenance_type_estimated_cost,
            cost_delta,
            spare_parts: spare_parts.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn row_with_status(status: &str) -> MaintenanceWithRelations {
        MaintenanceWithRelations {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            maintenance_type_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            mileage: 50000,
            cost: dec(200_000),
            notes: None,
            status: status.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            vehicle_license_plate: "B 1234 XYZ".to_string(),
            vehicle_brand: "Toyota".to_string(),
            vehicle_model: "Avanza".to_string(),
            vehicle_year: 2020,
            vehicle_color: None,
            vehicle_mileage: 52000,
            maintenance_type_name: "Oil Change".to_string(),
            maintenance_type_description: None,
            maintenance_type_estimated_cost: Some(dec(150_000)),
        }
    }

    #[test]
    fn test_cost_delta_commutative_magnitude() {
        let a = CostDelta::between(dec(450_000), Some(dec(500_000))).unwrap();
        let b = CostDelta::between(dec(500_000), Some(dec(450_000))).unwrap();
        assert_eq!(a.amount, dec(50_000));
        assert_eq!(b.amount, dec(50_000));
        assert!(!a.over_estimate);
        assert!(b.over_estimate);
    }

    #[test]
    fn test_cost_delta_requires_estimate() {
        assert_eq!(CostDelta::between(dec(200_000), None), None);
    }

    #[test]
    fn test_cost_delta_exact_estimate_is_not_over() {
        let delta = CostDelta::between(dec(150_000), Some(dec(150_000))).unwrap();
        assert_eq!(delta.amount, dec(0));
        assert!(!delta.over_estimate);
    }

    #[test]
    fn test_list_item_computes_badge_and_delta() {
        let item = MaintenanceListItem::from(row_with_status("completed"));
        assert_eq!(item.status_label, "Selesai");
        assert_eq!(item.status_style, "green");
        let delta = item.cost_delta.unwrap();
        assert_eq!(delta.amount, dec(50_000));
        assert!(delta.over_estimate);
    }

    #[test]
    fn test_list_item_unknown_status_renders_pending() {
        let item = MaintenanceListItem::from(row_with_status("archived"));
        assert_eq!(item.status, "archived");
        assert_eq!(item.status_label, "Menunggu");
        assert_eq!(item.status_style, "yellow");
    }

    #[test]
    fn test_stats_exclude_cancelled_from_breakdown() {
        let rows = vec![
            row_with_status("pending"),
            row_with_status("pending"),
            row_with_status("in_progress"),
            row_with_status("completed"),
            row_with_status("cancelled"),
        ];
        let stats = MaintenanceStats::from_rows(&rows);
        assert_eq!(
            stats,
            MaintenanceStats {
                total: 5,
                pending: 2,
                in_progress: 1,
                completed: 1,
            }
        );
        // cancelled solo aparece en el total
        assert_eq!(stats.total - stats.pending - stats.in_progress - stats.completed, 1);
    }

    #[test]
    fn test_create_parse_validates_references_and_numbers() {
        let request = CreateMaintenanceRequest {
            vehicle_id: "not-a-uuid".to_string(),
            maintenance_type_id: Uuid::new_v4().to_string(),
            date: "2024-13-40".to_string(),
            mileage: "-5".to_string(),
            cost: "gratis".to_string(),
            status: "done".to_string(),
            notes: None,
        };
        let errors = request.parse().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("vehicle_id"));
        assert!(fields.contains_key("date"));
        assert!(fields.contains_key("mileage"));
        assert!(fields.contains_key("cost"));
        assert!(fields.contains_key("status"));
    }

    #[test]
    fn test_create_parse_ok() {
        let vehicle_id = Uuid::new_v4();
        let type_id = Uuid::new_v4();
        let request = CreateMaintenanceRequest {
            vehicle_id: vehicle_id.to_string(),
            maintenance_type_id: type_id.to_string(),
            date: "2024-01-10".to_string(),
            mileage: "50000".to_string(),
            cost: "200000".to_string(),
            status: "completed".to_string(),
            notes: Some("  ".to_string()),
        };
        let parsed = request.parse().unwrap();
        assert_eq!(parsed.vehicle_id, vehicle_id);
        assert_eq!(parsed.maintenance_type_id, type_id);
        assert_eq!(parsed.status, MaintenanceStatus::Completed);
        assert_eq!(parsed.cost, dec(200_000));
        assert_eq!(parsed.notes, None);
    }

    #[test]
    fn test_spare_part_usage_subtotal() {
        let usage = SparePartUsageResponse::from(MaintenanceSparePartWithPart {
            id: Uuid::new_v4(),
            maintenance_id: Uuid::new_v4(),
            spare_part_id: Uuid::new_v4(),
            quantity: 4,
            price: dec(25_000),
            created_at: Utc::now(),
            spare_part_code: "SP-001".to_string(),
            spare_part_name: "Oli Mesin".to_string(),
        });
        assert_eq!(usage.subtotal, dec(100_000));
    }

    #[test]
    fn test_add_usage_requires_positive_quantity() {
        let request = AddSparePartUsageRequest {
            spare_part_id: Uuid::new_v4().to_string(),
            quantity: "0".to_string(),
        };
        assert!(request.parse().is_err());
    }
}
