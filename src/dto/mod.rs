//! DTOs de request y response de la API

pub mod auth_dto;
pub mod booking_dto;
pub mod response;
pub mod user_dto;
pub mod vehicle_dto;
