//! Cache
//!
//! Este módulo contiene el cache de vistas de listado.

pub mod view_cache;

pub use view_cache::{keys, ViewCache};
