//! Repositorio de reservas
//!
//! Todas las escrituras que tocan reserva y vehículo a la vez van dentro
//! de una transacción: o se confirman ambas o ninguna. Nunca debe quedar
//! una reserva activa con su vehículo disponible, ni al revés.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::booking::{Booking, BookingStatus};
use crate::utils::errors::AppError;

/// Fila del listado de admin: reserva + cliente + vehículo
#[derive(Debug, sqlx::FromRow)]
pub struct AdminBookingRow {
    pub id: i32,
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub rent_start_date: NaiveDate,
    pub rent_end_date: NaiveDate,
    pub total_price: Decimal,
    pub status: String,
    pub customer_name: String,
    pub customer_email: String,
    pub vehicle_name: String,
    pub registration_number: String,
}

/// Fila del listado de un cliente: sus reservas + vehículo
#[derive(Debug, sqlx::FromRow)]
pub struct CustomerBookingRow {
    pub id: i32,
    pub vehicle_id: i32,
    pub rent_start_date: NaiveDate,
    pub rent_end_date: NaiveDate,
    pub total_price: Decimal,
    pub status: String,
    pub vehicle_name: String,
    pub registration_number: String,
    pub vehicle_type: String,
}

pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear la reserva y marcar el vehículo como booked, atómicamente
    ///
    /// El flip de disponibilidad se revalida en el momento de la escritura
    /// (`WHERE availability_status = 'available'`): si dos clientes compiten
    /// por el mismo vehículo, el que confirma segundo no matchea ninguna fila,
    /// la transacción se revierte y recibe Conflict.
    pub async fn create_booking(
        &self,
        customer_id: i32,
        vehicle_id: i32,
        rent_start_date: NaiveDate,
        rent_end_date: NaiveDate,
        total_price: Decimal,
    ) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await?;

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (customer_id, vehicle_id, rent_start_date, rent_end_date, total_price, status)
            VALUES ($1, $2, $3, $4, $5, 'active')
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(vehicle_id)
        .bind(rent_start_date)
        .bind(rent_end_date)
        .bind(total_price)
        .fetch_one(&mut *tx)
        .await?;

        let flipped = sqlx::query(
            r#"
            UPDATE vehicles
            SET availability_status = 'booked', updated_at = NOW()
            WHERE id = $1 AND availability_status = 'available'
            "#,
        )
        .bind(vehicle_id)
        .execute(&mut *tx)
        .await?;

        if flipped.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::Conflict(
                "Vehicle is not available for booking".to_string(),
            ));
        }

        tx.commit().await?;

        Ok(booking)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    pub async fn find_all_with_details(&self) -> Result<Vec<AdminBookingRow>, AppError> {
        let rows = sqlx::query_as::<_, AdminBookingRow>(
            r#"
            SELECT
                b.id,
                b.customer_id,
                b.vehicle_id,
                b.rent_start_date,
                b.rent_end_date,
                b.total_price,
                b.status,
                u.name AS customer_name,
                u.email AS customer_email,
                v.vehicle_name,
                v.registration_number
            FROM bookings b
            INNER JOIN users u ON b.customer_id = u.id
            INNER JOIN vehicles v ON b.vehicle_id = v.id
            ORDER BY b.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn find_by_customer(
        &self,
        customer_id: i32,
    ) -> Result<Vec<CustomerBookingRow>, AppError> {
        let rows = sqlx::query_as::<_, CustomerBookingRow>(
            r#"
            SELECT
                b.id,
                b.vehicle_id,
                b.rent_start_date,
                b.rent_end_date,
                b.total_price,
                b.status,
                v.vehicle_name,
                v.registration_number,
                v.type AS vehicle_type
            FROM bookings b
            INNER JOIN vehicles v ON b.vehicle_id = v.id
            WHERE b.customer_id = $1
            ORDER BY b.created_at DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Cambiar el estado de la reserva y liberar el vehículo, atómicamente
    ///
    /// Solo se libera el vehículo para estados terminales; el controller ya
    /// garantizó que la transición es legal.
    pub async fn update_status(
        &self,
        booking_id: i32,
        vehicle_id: i32,
        new_status: BookingStatus,
    ) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await?;

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(new_status.as_str())
        .bind(booking_id)
        .fetch_one(&mut *tx)
        .await?;

        if new_status.is_terminal() {
            sqlx::query(
                r#"
                UPDATE vehicles
                SET availability_status = 'available', updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(vehicle_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(booking)
    }

    /// Devolver automáticamente las reservas activas cuyo período ya venció
    ///
    /// Una sola transacción avanza cada reserva vencida a `returned` y libera
    /// su vehículo. Idempotente: una reserva que ya salió de `active` nunca
    /// vuelve a aparecer en el barrido.
    pub async fn auto_return_expired(&self) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;

        let expired: Vec<(i32, i32)> = sqlx::query_as(
            r#"
            SELECT id, vehicle_id
            FROM bookings
            WHERE status = 'active' AND rent_end_date < CURRENT_DATE
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        for (booking_id, vehicle_id) in &expired {
            sqlx::query(
                r#"
                UPDATE bookings
                SET status = 'returned', updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(booking_id)
            .execute(&mut *tx)
            .await?;

            sqlx::query(
                r#"
                UPDATE vehicles
                SET availability_status = 'available', updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(vehicle_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(expired.len() as u64)
    }
}
