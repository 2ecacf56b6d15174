//! DTOs de Vehicle
//!
//! Los campos numéricos del formulario llegan como texto y se convierten con
//! el paso de parse-and-validate antes de tocar el repositorio.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::ValidationErrors;

use crate::dto::maintenance_dto::MaintenanceListItem;
use crate::models::vehicle::{NewVehicle, Vehicle, VehicleChanges};
use crate::utils::validation::{
    blank_to_none, max_vehicle_year, parse_int, validate_non_negative, validate_not_empty,
    validate_range, FormErrors, MIN_VEHICLE_YEAR,
};

/// Request para crear un nuevo vehículo (campos de formulario en texto)
#[derive(Debug, Deserialize)]
pub struct CreateVehicleRequest {
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub year: String,
    pub color: Option<String>,
    pub mileage: String,
}

impl CreateVehicleRequest {
    pub fn parse(self) -> Result<NewVehicle, ValidationErrors> {
        let mut form = FormErrors::new();

        form.ensure("license_plate", validate_not_empty(&self.license_plate));
        form.ensure("brand", validate_not_empty(&self.brand));
        form.ensure("model", validate_not_empty(&self.model));

        let year = form.check("year", parse_int(&self.year).and_then(|y| {
            validate_range(y, MIN_VEHICLE_YEAR, max_vehicle_year())?;
            Ok(y)
        }));
        let mileage = form.check("mileage", parse_int(&self.mileage).and_then(|m| {
            validate_non_negative(m)?;
            Ok(m)
        }));

        form.finish()?;

        Ok(NewVehicle {
            license_plate: self.license_plate.trim().to_string(),
            brand: self.brand.trim().to_string(),
            model: self.model.trim().to_string(),
            year: year.unwrap(),
            color: blank_to_none(self.color),
            mileage: mileage.unwrap(),
            user_id: None,
        })
    }
}

/// Request para actualizar un vehículo existente (reemplazo parcial)
#[derive(Debug, Deserialize, Default)]
pub struct UpdateVehicleRequest {
    pub license_plate: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<String>,
    pub color: Option<String>,
    pub mileage: Option<String>,
}

impl UpdateVehicleRequest {
    pub fn parse(self) -> Result<VehicleChanges, ValidationErrors> {
        let mut form = FormErrors::new();
        let mut changes = VehicleChanges::default();

        if let Some(plate) = blank_to_none(self.license_plate) {
            changes.license_plate = Some(plate);
        }
        if let Some(brand) = blank_to_none(self.brand) {
            changes.brand = Some(brand);
        }
        if let Some(model) = blank_to_none(self.model) {
            changes.model = Some(model);
        }
        if let Some(year) = self.year {
            changes.year = form.check("year", parse_int(&year).and_then(|y| {
                validate_range(y, MIN_VEHICLE_YEAR, max_vehicle_year())?;
                Ok(y)
            }));
        }
        if let Some(color) = self.color {
            changes.color = Some(blank_to_none(Some(color)));
        }
        if let Some(mileage) = self.mileage {
            changes.mileage = form.check("mileage", parse_int(&mileage).and_then(|m| {
                validate_non_negative(m)?;
                Ok(m)
            }));
        }

        form.finish()?;
        Ok(changes)
    }
}

/// Request de actualización rápida de kilometraje (un solo campo)
#[derive(Debug, Deserialize)]
pub struct UpdateMileageRequest {
    pub mileage: String,
}

impl UpdateMileageRequest {
    pub fn parse(self) -> Result<i32, ValidationErrors> {
        let mut form = FormErrors::new();
        let mileage = form.check("mileage", parse_int(&self.mileage).and_then(|m| {
            validate_non_negative(m)?;
            Ok(m)
        }));
        form.finish()?;
        Ok(mileage.unwrap())
    }
}

/// Response de vehículo para la API
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub color: Option<String>,
    pub mileage: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            license_plate: vehicle.license_plate,
            brand: vehicle.brand,
            model: vehicle.model,
            year: vehicle.year,
            color: vehicle.color,
            mileage: vehicle.mileage,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}

/// Detalle de vehículo con su historial de perawatan
#[derive(Debug, Serialize)]
pub struct VehicleDetailResponse {
    #[serde(flatten)]
    pub vehicle: VehicleResponse,
    pub maintenances: Vec<MaintenanceListItem>,
}
