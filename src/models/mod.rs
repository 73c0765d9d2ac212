//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL, más los enums cerrados del dominio.

pub mod booking;
pub mod user;
pub mod vehicle;
