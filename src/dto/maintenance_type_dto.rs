//! DTOs de MaintenanceType

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::ValidationErrors;

use crate::models::maintenance_type::{MaintenanceType, MaintenanceTypeChanges, NewMaintenanceType};
use crate::utils::validation::{
    blank_to_none, parse_decimal, validate_non_negative, validate_not_empty, FormErrors,
};

#[derive(Debug, Deserialize)]
pub struct CreateMaintenanceTypeRequest {
    pub name: String,
    pub description: Option<String>,
    pub estimated_cost: Option<String>,
}

impl CreateMaintenanceTypeRequest {
    pub fn parse(self) -> Result<NewMaintenanceType, ValidationErrors> {
        let mut form = FormErrors::new();

        form.ensure("name", validate_not_empty(&self.name));

        let estimated_cost = match blank_to_none(self.estimated_cost) {
            Some(raw) => form.check("estimated_cost", parse_decimal(&raw).and_then(|c| {
                validate_non_negative(c)?;
                Ok(c)
            })),
            None => None,
        };

        form.finish()?;

        Ok(NewMaintenanceType {
            name: self.name.trim().to_string(),
            description: blank_to_none(self.description),
            estimated_cost,
        })
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateMaintenanceTypeRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub estimated_cost: Option<String>,
}

impl UpdateMaintenanceTypeRequest {
    pub fn parse(self) -> Result<MaintenanceTypeChanges, ValidationErrors> {
        let mut form = FormErrors::new();
        let mut changes = MaintenanceTypeChanges::default();

        if let Some(name) = blank_to_none(self.name) {
            changes.name = Some(name);
        }
        if let Some(description) = self.description {
            changes.description = Some(blank_to_none(Some(description)));
        }
        if let Some(raw) = self.estimated_cost {
            match blank_to_none(Some(raw)) {
                Some(raw) => {
                    let cost = form.check("estimated_cost", parse_decimal(&raw).and_then(|c| {
                        validate_non_negative(c)?;
                        Ok(c)
                    }));
                    changes.estimated_cost = cost.map(Some);
                }
                // Campo enviado vacío: limpiar el estimado
                None => changes.estimated_cost = Some(None),
            }
        }

        form.finish()?;
        Ok(changes)
    }
}

#[derive(Debug, Serialize)]
pub struct MaintenanceTypeResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub estimated_cost: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MaintenanceType> for MaintenanceTypeResponse {
    fn from(maintenance_type: MaintenanceType) -> Self {
        Self {
            id: maintenance_type.id,
            name: maintenance_type.name,
            description: maintenance_type.description,
            estimated_cost: maintenance_type.estimated_cost,
            created_at: maintenance_type.created_at,
            updated_at: maintenance_type.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_parse_ok() {
        let parsed = CreateMaintenanceTypeRequest {
            name: "Oil Change".to_string(),
            description: None,
            estimated_cost: Some("150000".to_string()),
        }
        .parse()
        .unwrap();
        assert_eq!(parsed.name, "Oil Change");
        assert_eq!(parsed.estimated_cost, Some(Decimal::from(150_000)));
    }

    #[test]
    fn test_create_without_estimated_cost() {
        let parsed = CreateMaintenanceTypeRequest {
            name: "Ganti Ban".to_string(),
            description: Some("Rotasi dan balancing".to_string()),
            estimated_cost: Some("".to_string()),
        }
        .parse()
        .unwrap();
        assert_eq!(parsed.estimated_cost, None);
        assert_eq!(parsed.description.as_deref(), Some("Rotasi dan balancing"));
    }

    #[test]
    fn test_create_rejects_negative_cost() {
        let result = CreateMaintenanceTypeRequest {
            name: "Tune Up".to_string(),
            description: None,
            estimated_cost: Some("-500".to_string()),
        }
        .parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let result = CreateMaintenanceTypeRequest {
            name: " ".to_string(),
            description: None,
            estimated_cost: None,
        }
        .parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_update_can_clear_estimated_cost() {
        let changes = UpdateMaintenanceTypeRequest {
            estimated_cost: Some("".to_string()),
            ..Default::default()
        }
        .parse()
        .unwrap();
        assert_eq!(changes.estimated_cost, Some(None));
    }
}
