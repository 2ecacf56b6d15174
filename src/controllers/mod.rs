//! Controllers
//!
//! Capa de mutation handlers y composición de vistas: validación del
//! formulario parseado, invocación de repositorios, invalidación de cache y
//! navegación de éxito.

pub mod dashboard_controller;
pub mod maintenance_controller;
pub mod maintenance_type_controller;
pub mod spare_part_controller;
pub mod vehicle_controller;
