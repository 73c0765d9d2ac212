use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppError;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        vehicle_name: &str,
        vehicle_type: &str,
        registration_number: &str,
        daily_rent_price: Decimal,
        availability_status: &str,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (vehicle_name, type, registration_number, daily_rent_price, availability_status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(vehicle_name)
        .bind(vehicle_type)
        .bind(registration_number)
        .bind(daily_rent_price)
        .bind(availability_status)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn find_all(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(vehicles)
    }

    /// Actualizar un vehículo; los campos ausentes conservan su valor actual
    pub async fn update(
        &self,
        current: &Vehicle,
        vehicle_name: Option<String>,
        vehicle_type: Option<String>,
        registration_number: Option<String>,
        daily_rent_price: Option<Decimal>,
        availability_status: Option<String>,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET vehicle_name = $2, type = $3, registration_number = $4,
                daily_rent_price = $5, availability_status = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(current.id)
        .bind(vehicle_name.unwrap_or_else(|| current.vehicle_name.clone()))
        .bind(vehicle_type.unwrap_or_else(|| current.vehicle_type.clone()))
        .bind(registration_number.unwrap_or_else(|| current.registration_number.clone()))
        .bind(daily_rent_price.unwrap_or(current.daily_rent_price))
        .bind(availability_status.unwrap_or_else(|| current.availability_status.clone()))
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    /// Verificar si el vehículo tiene alguna reserva activa que lo referencia
    pub async fn has_active_booking(&self, vehicle_id: i32) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM bookings WHERE vehicle_id = $1 AND status = 'active')",
        )
        .bind(vehicle_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
