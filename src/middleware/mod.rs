//! Middleware
//!
//! Contexto de autorización (pass-through en este deployment) y CORS.

pub mod auth;
pub mod cors;
