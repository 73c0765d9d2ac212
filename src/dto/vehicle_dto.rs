use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::vehicle::Vehicle;

// Request para crear un vehículo
#[derive(Debug, Deserialize)]
pub struct CreateVehicleRequest {
    pub vehicle_name: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub registration_number: String,
    pub daily_rent_price: f64,
    pub availability_status: String,
}

// Request para actualizar un vehículo (subconjunto no vacío de campos)
#[derive(Debug, Deserialize)]
pub struct UpdateVehicleRequest {
    pub vehicle_name: Option<String>,
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    pub registration_number: Option<String>,
    pub daily_rent_price: Option<f64>,
    pub availability_status: Option<String>,
}

impl UpdateVehicleRequest {
    pub fn is_empty(&self) -> bool {
        self.vehicle_name.is_none()
            && self.vehicle_type.is_none()
            && self.registration_number.is_none()
            && self.daily_rent_price.is_none()
            && self.availability_status.is_none()
    }
}

// Response de vehículo
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: i32,
    pub vehicle_name: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub registration_number: String,
    pub daily_rent_price: f64,
    pub availability_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            vehicle_name: v.vehicle_name,
            vehicle_type: v.vehicle_type,
            registration_number: v.registration_number,
            daily_rent_price: v.daily_rent_price.to_string().parse().unwrap_or(0.0),
            availability_status: v.availability_status,
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}
