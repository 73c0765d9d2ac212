//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación,
//! JWT y política de acceso.

pub mod errors;
pub mod jwt;
pub mod policy;
pub mod validation;
