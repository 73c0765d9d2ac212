//! Acceso a datos
//!
//! Un repositorio por entidad; son los únicos módulos que emiten SQL.

pub mod booking_repository;
pub mod user_repository;
pub mod vehicle_repository;
