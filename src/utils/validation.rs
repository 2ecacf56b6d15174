//! Utilidades de validación
//!
//! Este módulo contiene las funciones de parse-and-validate para los campos
//! de formulario: todos los campos numéricos llegan como texto y se convierten
//! aquí a valores tipados antes de tocar cualquier repositorio.

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

/// Año mínimo aceptado para un vehículo
pub const MIN_VEHICLE_YEAR: i32 = 1900;

/// Umbral de stock bajo para suku cadang
pub const LOW_STOCK_THRESHOLD: i32 = 10;

/// Año máximo aceptado para un vehículo (año actual + 1)
pub fn max_vehicle_year() -> i32 {
    Utc::now().year() + 1
}

/// Validar y convertir string a UUID
pub fn parse_uuid(value: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(value.trim()).map_err(|_| {
        let mut error = ValidationError::new("uuid");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Validar y convertir string a entero
pub fn parse_int(value: &str) -> Result<i32, ValidationError> {
    value.trim().parse::<i32>().map_err(|_| {
        let mut error = ValidationError::new("integer");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Validar y convertir string a decimal
pub fn parse_decimal(value: &str) -> Result<Decimal, ValidationError> {
    Decimal::from_str(value.trim()).map_err(|_| {
        let mut error = ValidationError::new("decimal");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Validar y convertir string a fecha
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en un rango específico
pub fn validate_range<T: PartialOrd + std::fmt::Display + Serialize>(
    value: T,
    min: T,
    max: T,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        let mut error = ValidationError::new("range");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Normalizar un campo opcional de formulario: vacío o solo espacios → None
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim().to_string();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    })
}

/// Validar que un valor esté en una lista de valores permitidos
pub fn validate_enum(value: &str, allowed_values: &[&str]) -> Result<(), ValidationError> {
    if !allowed_values.contains(&value) {
        let mut error = ValidationError::new("enum");
        error.add_param("value".into(), &value.to_string());
        error.add_param("allowed_values".into(), &format!("{:?}", allowed_values));
        return Err(error);
    }
    Ok(())
}

/// Acumulador de errores por campo para el paso de parse-and-validate
#[derive(Debug, Default)]
pub struct FormErrors {
    errors: ValidationErrors,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registrar el resultado de un campo, quedándose con el valor si es válido
    pub fn check<T>(&mut self, field: &'static str, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.errors.add(field, error);
                None
            }
        }
    }

    /// Registrar una validación sin valor asociado
    pub fn ensure(&mut self, field: &'static str, result: Result<(), ValidationError>) {
        if let Err(error) = result {
            self.errors.add(field, error);
        }
    }

    /// Cerrar el acumulador: Ok si no hubo errores
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uuid() {
        assert!(parse_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(parse_uuid("invalid-uuid").is_err());
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("50000").unwrap(), 50000);
        assert_eq!(parse_int(" 42 ").unwrap(), 42);
        assert!(parse_int("abc").is_err());
        assert!(parse_int("12.5").is_err());
        assert!(parse_int("").is_err());
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("150000").unwrap(), Decimal::new(150000, 0));
        assert_eq!(parse_decimal("99.50").unwrap(), Decimal::new(9950, 2));
        assert!(parse_decimal("not-a-number").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2024-01-10").is_ok());
        assert!(parse_date("2024/01/10").is_err());
        assert!(parse_date("10-01-2024").is_err());
    }

    #[test]
    fn test_validate_range_year() {
        assert!(validate_range(2020, MIN_VEHICLE_YEAR, max_vehicle_year()).is_ok());
        assert!(validate_range(1899, MIN_VEHICLE_YEAR, max_vehicle_year()).is_err());
        assert!(validate_range(max_vehicle_year() + 1, MIN_VEHICLE_YEAR, max_vehicle_year()).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(0).is_ok());
        assert!(validate_non_negative(50000).is_ok());
        assert!(validate_non_negative(-1).is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(1).is_ok());
        assert!(validate_positive(0).is_err());
    }

    #[test]
    fn test_validate_enum_status() {
        let allowed = ["pending", "in_progress", "completed", "cancelled"];
        assert!(validate_enum("pending", &allowed).is_ok());
        assert!(validate_enum("done", &allowed).is_err());
    }

    #[test]
    fn test_blank_to_none() {
        assert_eq!(blank_to_none(None), None);
        assert_eq!(blank_to_none(Some("".into())), None);
        assert_eq!(blank_to_none(Some("   ".into())), None);
        assert_eq!(blank_to_none(Some(" Merah ".into())), Some("Merah".into()));
    }

    #[test]
    fn test_form_errors_collects_all_fields() {
        let mut form = FormErrors::new();
        let year = form.check("year", parse_int("not-a-year"));
        let mileage = form.check("mileage", parse_int("-5").and_then(|m| {
            validate_non_negative(m)?;
            Ok(m)
        }));
        assert!(year.is_none());
        assert!(mileage.is_none());
        let errors = form.finish().unwrap_err();
        assert!(errors.field_errors().contains_key("year"));
        assert!(errors.field_errors().contains_key("mileage"));
    }

    #[test]
    fn test_form_errors_empty_is_ok() {
        let mut form = FormErrors::new();
        let value = form.check("year", parse_int("2024"));
        assert_eq!(value, Some(2024));
        assert!(form.finish().is_ok());
    }
}
