use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::booking::Booking;

// Request para crear una reserva; el customer_id sale del token, no del body
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub vehicle_id: i32,
    pub rent_start_date: String,
    pub rent_end_date: String,
}

// Request para cambiar el estado de una reserva
#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: String,
}

// Datos del vehículo anidados en la respuesta de creación
#[derive(Debug, Serialize)]
pub struct BookingVehicleInfo {
    pub vehicle_name: String,
    pub daily_rent_price: f64,
}

// Response de creación de reserva, con el vehículo unido
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: i32,
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub rent_start_date: NaiveDate,
    pub rent_end_date: NaiveDate,
    pub total_price: f64,
    pub status: String,
    pub vehicle: BookingVehicleInfo,
}

// Response de una reserva sin joins (actualización de estado)
#[derive(Debug, Serialize)]
pub struct BookingRecordResponse {
    pub id: i32,
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub rent_start_date: NaiveDate,
    pub rent_end_date: NaiveDate,
    pub total_price: f64,
    pub status: String,
}

impl From<Booking> for BookingRecordResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            customer_id: b.customer_id,
            vehicle_id: b.vehicle_id,
            rent_start_date: b.rent_start_date,
            rent_end_date: b.rent_end_date,
            total_price: b.total_price.to_string().parse().unwrap_or(0.0),
            status: b.status,
        }
    }
}

// Fila del listado de admin: reserva + cliente + vehículo
#[derive(Debug, Serialize)]
pub struct AdminBookingResponse {
    pub id: i32,
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub rent_start_date: NaiveDate,
    pub rent_end_date: NaiveDate,
    pub total_price: f64,
    pub status: String,
    pub customer_name: String,
    pub customer_email: String,
    pub vehicle_name: String,
    pub registration_number: String,
}

// Fila del listado de un cliente: sus reservas + vehículo
#[derive(Debug, Serialize)]
pub struct CustomerBookingResponse {
    pub id: i32,
    pub vehicle_id: i32,
    pub rent_start_date: NaiveDate,
    pub rent_end_date: NaiveDate,
    pub total_price: f64,
    pub status: String,
    pub vehicle_name: String,
    pub registration_number: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
}
