//! DTOs de la API
//!
//! Requests de formulario (campos numéricos como texto) y responses tipadas.

pub mod common;
pub mod dashboard_dto;
pub mod maintenance_dto;
pub mod maintenance_type_dto;
pub mod spare_part_dto;
pub mod vehicle_dto;
