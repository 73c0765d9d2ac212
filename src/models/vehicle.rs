//! Modelo de Vehicle
//!
//! Mapea exactamente a la tabla vehicles del schema.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Vehículo - mapea a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: i32,
    pub vehicle_name: String,
    #[sqlx(rename = "type")]
    pub vehicle_type: String,
    pub registration_number: String,
    pub daily_rent_price: Decimal,
    pub availability_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tipos de vehículo permitidos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleType {
    Car,
    Bike,
    Van,
    Suv,
}

impl VehicleType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "car" => Some(VehicleType::Car),
            "bike" => Some(VehicleType::Bike),
            "van" => Some(VehicleType::Van),
            "SUV" => Some(VehicleType::Suv),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Car => "car",
            VehicleType::Bike => "bike",
            VehicleType::Van => "van",
            VehicleType::Suv => "SUV",
        }
    }

    pub const ALLOWED: &'static [&'static str] = &["car", "bike", "van", "SUV"];
}

/// Estado de disponibilidad del vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityStatus {
    Available,
    Booked,
}

impl AvailabilityStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "available" => Some(AvailabilityStatus::Available),
            "booked" => Some(AvailabilityStatus::Booked),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "available",
            AvailabilityStatus::Booked => "booked",
        }
    }

    pub const ALLOWED: &'static [&'static str] = &["available", "booked"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_type_parse() {
        assert_eq!(VehicleType::parse("car"), Some(VehicleType::Car));
        assert_eq!(VehicleType::parse("SUV"), Some(VehicleType::Suv));
        // el enum es sensible a mayúsculas, "suv" no es válido
        assert_eq!(VehicleType::parse("suv"), None);
        assert_eq!(VehicleType::parse("truck"), None);
    }

    #[test]
    fn test_availability_status_parse() {
        assert_eq!(
            AvailabilityStatus::parse("available"),
            Some(AvailabilityStatus::Available)
        );
        assert_eq!(
            AvailabilityStatus::parse("booked"),
            Some(AvailabilityStatus::Booked)
        );
        assert_eq!(AvailabilityStatus::parse("maintenance"), None);
    }
}
