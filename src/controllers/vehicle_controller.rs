use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::dto::response::ApiResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::models::vehicle::{AvailabilityStatus, VehicleType};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{is_unique_violation, AppError};

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        if request.vehicle_name.trim().is_empty() || request.registration_number.trim().is_empty() {
            return Err(AppError::BadRequest("All fields are required".to_string()));
        }

        VehicleType::parse(&request.vehicle_type).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Type must be one of: {}",
                VehicleType::ALLOWED.join(", ")
            ))
        })?;

        AvailabilityStatus::parse(&request.availability_status).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Availability status must be one of: {}",
                AvailabilityStatus::ALLOWED.join(", ")
            ))
        })?;

        let price = parse_positive_price(request.daily_rent_price)?;

        let vehicle = self
            .repository
            .create(
                &request.vehicle_name,
                &request.vehicle_type,
                &request.registration_number,
                price,
                &request.availability_status,
            )
            .await
            .map_err(|e| match e {
                AppError::Database(ref db) if is_unique_violation(db) => {
                    AppError::Conflict("Registration number already exists".to_string())
                }
                other => other,
            })?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehicle created successfully".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        Ok(vehicle.into())
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<VehicleResponse>>, AppError> {
        let vehicles = self.repository.find_all().await?;

        Ok(ApiResponse::success_with_message(
            vehicles.into_iter().map(VehicleResponse::from).collect(),
            "Vehicles retrieved successfully".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: i32,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        if request.is_empty() {
            return Err(AppError::BadRequest(
                "At least one field must be provided for update".to_string(),
            ));
        }

        // Revalidar solo los campos presentes
        if let Some(ref vehicle_type) = request.vehicle_type {
            VehicleType::parse(vehicle_type).ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Type must be one of: {}",
                    VehicleType::ALLOWED.join(", ")
                ))
            })?;
        }

        if let Some(ref status) = request.availability_status {
            AvailabilityStatus::parse(status).ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Availability status must be one of: {}",
                    AvailabilityStatus::ALLOWED.join(", ")
                ))
            })?;
        }

        let price = match request.daily_rent_price {
            Some(p) => Some(parse_positive_price(p)?),
            None => None,
        };

        let vehicle = self
            .repository
            .update(
                &current,
                request.vehicle_name,
                request.vehicle_type,
                request.registration_number,
                price,
                request.availability_status,
            )
            .await
            .map_err(|e| match e {
                AppError::Database(ref db) if is_unique_violation(db) => {
                    AppError::Conflict("Registration number already exists".to_string())
                }
                other => other,
            })?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehicle updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, id: i32) -> Result<ApiResponse<()>, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        // Un vehículo con reserva activa no se puede borrar
        if self.repository.has_active_booking(id).await? {
            return Err(AppError::Conflict(
                "Vehicle has an active booking and cannot be deleted".to_string(),
            ));
        }

        self.repository.delete(id).await?;

        Ok(ApiResponse::success_message(
            "Vehicle deleted successfully".to_string(),
        ))
    }
}

/// Convertir el precio del request a Decimal, exigiendo que sea positivo
fn parse_positive_price(value: f64) -> Result<Decimal, AppError> {
    let price = Decimal::from_f64_retain(value).ok_or_else(|| {
        AppError::BadRequest("Daily rent price must be a positive number".to_string())
    })?;

    if price <= Decimal::ZERO {
        return Err(AppError::BadRequest(
            "Daily rent price must be a positive number".to_string(),
        ));
    }

    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive_price() {
        assert_eq!(parse_positive_price(100.0).unwrap(), Decimal::from(100));
        assert!(parse_positive_price(0.0).is_err());
        assert!(parse_positive_price(-3.5).is_err());
        assert!(parse_positive_price(f64::NAN).is_err());
    }
}
