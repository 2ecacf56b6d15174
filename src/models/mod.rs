//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod maintenance;
pub mod maintenance_spare_part;
pub mod maintenance_type;
pub mod spare_part;
pub mod status;
pub mod vehicle;
