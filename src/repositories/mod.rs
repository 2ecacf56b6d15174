//! Repositorios
//!
//! Capa de queries/commands: cada repositorio traduce las operaciones de su
//! entidad a consultas sqlx contra PostgreSQL.

pub mod maintenance_repository;
pub mod maintenance_spare_part_repository;
pub mod maintenance_type_repository;
pub mod spare_part_repository;
pub mod vehicle_repository;
