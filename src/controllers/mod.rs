//! Controllers: lógica de negocio de cada recurso

pub mod auth_controller;
pub mod booking_controller;
pub mod user_controller;
pub mod vehicle_controller;
