//! Motor de reservas
//!
//! Orquesta las precondiciones de creación, la máquina de estados y la
//! reconciliación de reservas vencidas. Las reglas puras viven en
//! `models::booking`; acá se ordenan los chequeos y se delega la escritura
//! transaccional al repositorio.

use chrono::Utc;
use sqlx::PgPool;
use tracing::info;

use crate::dto::booking_dto::{
    AdminBookingResponse, BookingRecordResponse, BookingResponse, BookingVehicleInfo,
    CreateBookingRequest,CustomerBookingResponse, UpdateBookingStatusRequest,
};
use crate::dto::response::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::booking::{
    authorize_transition, check_transition, total_price_for, validate_rent_dates, BookingStatus,
};
use crate::models::vehicle::AvailabilityStatus;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;
use crate::utils::policy::is_admin;
use crate::utils::validation::validate_date;

pub struct BookingController {
    bookings: BookingRepository,
    vehicles: VehicleRepository,
}

impl BookingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            bookings: BookingRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    /// Crear una reserva para el sujeto autenticado
    ///
    /// Las precondiciones se chequean en orden fijo: fechas parseables,
    /// inicio no pasado, fin posterior al inicio, vehículo existente,
    /// vehículo disponible. El precio se calcula una sola vez acá.
    pub async fn create(
        &self,
        subject: AuthenticatedUser,
        request: CreateBookingRequest,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        let start = validate_date(&request.rent_start_date).map_err(|_| {
            AppError::BadRequest("Invalid date format. Use YYYY-MM-DD format".to_string())
        })?;
        let end = validate_date(&request.rent_end_date).map_err(|_| {
            AppError::BadRequest("Invalid date format. Use YYYY-MM-DD format".to_string())
        })?;

        validate_rent_dates(start, end, Utc::now().date_naive())?;

        let vehicle = self
            .vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        if vehicle.availability_status != AvailabilityStatus::Available.as_str() {
            return Err(AppError::Conflict(
                "Vehicle is not available for booking".to_string(),
            ));
        }

        let total_price = total_price_for(vehicle.daily_rent_price, start, end);

        // La disponibilidad se revalida dentro de la transacción; si otro
        // cliente gana la carrera, esto devuelve Conflict.
        let booking = self
            .bookings
            .create_booking(subject.id, vehicle.id, start, end, total_price)
            .await?;

        let response = BookingResponse {
            id: booking.id,
            customer_id: booking.customer_id,
            vehicle_id: booking.vehicle_id,
            rent_start_date: booking.rent_start_date,
            rent_end_date: booking.rent_end_date,
            total_price: booking.total_price.to_string().parse().unwrap_or(0.0),
            status: booking.status,
            vehicle: BookingVehicleInfo {
                vehicle_name: vehicle.vehicle_name,
                daily_rent_price: vehicle.daily_rent_price.to_string().parse().unwrap_or(0.0),
            },
        };

        Ok(ApiResponse::success_with_message(
            response,
            "Booking created successfully".to_string(),
        ))
    }

    /// Listar reservas según el rol del sujeto
    ///
    /// Antes de listar se reconcilian las reservas vencidas, así el listado
    /// nunca muestra una reserva activa con el período ya lapsado.
    pub async fn list(
        &self,
        subject: AuthenticatedUser,
    ) -> Result<ApiResponse<serde_json::Value>, AppError> {
        let reconciled = self.bookings.auto_return_expired().await?;
        if reconciled > 0 {
            info!("Auto-devueltas {} reservas vencidas", reconciled);
        }

        let data = if is_admin(&subject) {
            let rows = self.bookings.find_all_with_details().await?;
            let response: Vec<AdminBookingResponse> = rows
                .into_iter()
                .map(|r| AdminBookingResponse {
                    id: r.id,
                    customer_id: r.customer_id,
                    vehicle_id: r.vehicle_id,
                    rent_start_date: r.rent_start_date,
                    rent_end_date: r.rent_end_date,
                    total_price: r.total_price.to_string().parse().unwrap_or(0.0),
                    status: r.status,
                    customer_name: r.customer_name,
                    customer_email: r.customer_email,
                    vehicle_name: r.vehicle_name,
                    registration_number: r.registration_number,
                })
                .collect();
            serde_json::to_value(response)
                .map_err(|e| AppError::Internal(format!("Error serializing bookings: {}", e)))?
        } else {
            let rows = self.bookings.find_by_customer(subject.id).await?;
            let response: Vec<CustomerBookingResponse> = rows
                .into_iter()
                .map(|r| CustomerBookingResponse {
                    id: r.id,
                    vehicle_id: r.vehicle_id,
                    rent_start_date: r.rent_start_date,
                    rent_end_date: r.rent_end_date,
                    total_price: r.total_price.to_string().parse().unwrap_or(0.0),
                    status: r.status,
                    vehicle_name: r.vehicle_name,
                    registration_number: r.registration_number,
                    vehicle_type: r.vehicle_type,
                })
                .collect();
            serde_json::to_value(response)
                .map_err(|e| AppError::Internal(format!("Error serializing bookings: {}", e)))?
        };

        Ok(ApiResponse::success_with_message(
            data,
            "Bookings retrieved successfully".to_string(),
        ))
    }

    /// Cambiar el estado de una reserva
    ///
    /// Orden de chequeos: existencia, status válido, rechazo de `active`,
    /// autorización por rol/propiedad, legalidad de la transición. La
    /// escritura libera el vehículo en la misma transacción.
    pub async fn update_status(
        &self,
        subject: AuthenticatedUser,
        booking_id: i32,
        request: UpdateBookingStatusRequest,
    ) -> Result<ApiResponse<BookingRecordResponse>, AppError> {
        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        let requested = BookingStatus::parse(&request.status).ok_or_else(|| {
            AppError::BadRequest(
                "Status must be one of: active, cancelled, returned".to_string(),
            )
        })?;

        // Volver a active se rechaza siempre, antes de mirar permisos
        if requested == BookingStatus::Active {
            return Err(AppError::BadRequest(
                "Cannot revert a booking to active status".to_string(),
            ));
        }

        authorize_transition(&subject, booking.customer_id, requested)?;

        let current = BookingStatus::parse(&booking.status)
            .ok_or_else(|| AppError::Internal(format!("Unknown booking status: {}", booking.status)))?;

        check_transition(current, requested)?;

        let updated = self
            .bookings
            .update_status(booking.id, booking.vehicle_id, requested)
            .await?;

        Ok(ApiResponse::success_with_message(
            updated.into(),
            "Booking status updated successfully".to_string(),
        ))
    }
}
