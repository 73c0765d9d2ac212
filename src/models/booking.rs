//! Modelo de Booking y reglas del ciclo de vida
//!
//! Además del struct que mapea a la tabla bookings, este módulo concentra
//! las reglas puras del motor de reservas: validación de fechas, cálculo
//! del precio total, legalidad de transiciones y autorización. Mantenerlas
//! acá deja la máquina de estados visible en un solo lugar.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::middleware::auth::AuthenticatedUser;
use crate::utils::errors::AppError;
use crate::utils::policy::{is_admin, is_owner};

/// Reserva - mapea a la tabla bookings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i32,
    pub customer_id: i32,
    pub vehicle_id: i32,
    pub rent_start_date: NaiveDate,
    pub rent_end_date: NaiveDate,
    pub total_price: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Estados del ciclo de vida de una reserva
///
/// `cancelled` y `returned` son terminales: ninguna transición sale de ellos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Active,
    Cancelled,
    Returned,
}

impl BookingStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(BookingStatus::Active),
            "cancelled" => Some(BookingStatus::Cancelled),
            "returned" => Some(BookingStatus::Returned),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Active => "active",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Returned => "returned",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Returned)
    }
}

/// Validar las fechas de alquiler de una nueva reserva
///
/// La comparación con `today` es solo por fecha, sin hora del día.
pub fn validate_rent_dates(
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
) -> Result<(), AppError> {
    if start < today {
        return Err(AppError::BadRequest(
            "Rent start date cannot be in the past".to_string(),
        ));
    }
    if end <= start {
        return Err(AppError::BadRequest(
            "Rent end date must be after rent start date".to_string(),
        ));
    }
    Ok(())
}

/// Calcular el precio total de una reserva
///
/// Un día exclusivo (inicio = día 0, fin = día 1) cuesta exactamente un día
/// de renta. Se calcula una sola vez al crear la reserva y nunca se recalcula.
pub fn total_price_for(daily_rent_price: Decimal, start: NaiveDate, end: NaiveDate) -> Decimal {
    let days = (end - start).num_days();
    daily_rent_price * Decimal::from(days)
}

/// Autorizar una transición de estado solicitada por un sujeto
///
/// Cancelar es exclusivo del cliente dueño de la reserva (un admin no puede
/// cancelar, ni siquiera la propia); marcar como devuelta es exclusivo del
/// admin.
pub fn authorize_transition(
    subject: &AuthenticatedUser,
    booking_customer_id: i32,
    requested: BookingStatus,
) -> Result<(), AppError> {
    match requested {
        BookingStatus::Cancelled => {
            if is_admin(subject) {
                return Err(AppError::Forbidden(
                    "Admins cannot cancel bookings".to_string(),
                ));
            }
            if !is_owner(subject, booking_customer_id) {
                return Err(AppError::Forbidden(
                    "You can only cancel your own bookings".to_string(),
                ));
            }
            Ok(())
        }
        BookingStatus::Returned => {
            if !is_admin(subject) {
                return Err(AppError::Forbidden(
                    "Only admins can mark a booking as returned".to_string(),
                ));
            }
            Ok(())
        }
        BookingStatus::Active => Err(AppError::BadRequest(
            "Cannot revert a booking to active status".to_string(),
        )),
    }
}

/// Verificar la legalidad de una transición partiendo del estado actual
pub fn check_transition(
    current: BookingStatus,
    requested: BookingStatus,
) -> Result<(), AppError> {
    if current == requested {
        return Err(AppError::BadRequest(
            "Booking is already in that status".to_string(),
        ));
    }
    if current.is_terminal() {
        return Err(AppError::BadRequest(format!(
            "Cannot change status of a {} booking",
            current.as_str()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserRole;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn subject(id: i32, role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser { id, role }
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(BookingStatus::parse("active"), Some(BookingStatus::Active));
        assert_eq!(
            BookingStatus::parse("cancelled"),
            Some(BookingStatus::Cancelled)
        );
        assert_eq!(
            BookingStatus::parse("returned"),
            Some(BookingStatus::Returned)
        );
        assert_eq!(BookingStatus::parse("expired"), None);
    }

    #[test]
    fn test_total_price_two_days() {
        // 2025-01-01 a 2025-01-03 con precio 100/día => 200
        let total = total_price_for(Decimal::from(100), date(2025, 1, 1), date(2025, 1, 3));
        assert_eq!(total, Decimal::from(200));
    }

    #[test]
    fn test_total_price_single_day() {
        // 2025-01-01 a 2025-01-02 => un solo día de renta
        let total = total_price_for(Decimal::from(100), date(2025, 1, 1), date(2025, 1, 2));
        assert_eq!(total, Decimal::from(100));
    }

    #[test]
    fn test_rent_dates_in_the_past_rejected() {
        let today = date(2025, 6, 15);
        let err = validate_rent_dates(date(2025, 6, 14), date(2025, 6, 16), today).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_rent_dates_start_today_accepted() {
        let today = date(2025, 6, 15);
        assert!(validate_rent_dates(today, date(2025, 6, 16), today).is_ok());
    }

    #[test]
    fn test_rent_end_must_be_after_start() {
        let today = date(2025, 6, 15);
        assert!(validate_rent_dates(date(2025, 6, 16), date(2025, 6, 16), today).is_err());
        assert!(validate_rent_dates(date(2025, 6, 16), date(2025, 6, 15), today).is_err());
    }

    #[test]
    fn test_customer_can_cancel_own_booking() {
        let customer = subject(7, UserRole::Customer);
        assert!(authorize_transition(&customer, 7, BookingStatus::Cancelled).is_ok());
    }

    #[test]
    fn test_customer_cannot_cancel_foreign_booking() {
        let customer = subject(7, UserRole::Customer);
        let err = authorize_transition(&customer, 8, BookingStatus::Cancelled).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_admin_cannot_cancel_any_booking() {
        let admin = subject(1, UserRole::Admin);
        // ni siquiera una reserva propia
        let err = authorize_transition(&admin, 1, BookingStatus::Cancelled).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_only_admin_can_return() {
        let customer = subject(7, UserRole::Customer);
        let err = authorize_transition(&customer, 7, BookingStatus::Returned).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let admin = subject(1, UserRole::Admin);
        assert!(authorize_transition(&admin, 7, BookingStatus::Returned).is_ok());
    }

    #[test]
    fn test_revert_to_active_rejected() {
        let admin = subject(1, UserRole::Admin);
        let err = authorize_transition(&admin, 7, BookingStatus::Active).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_same_status_rejected() {
        let err = check_transition(BookingStatus::Active, BookingStatus::Active).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        assert!(check_transition(BookingStatus::Cancelled, BookingStatus::Returned).is_err());
        assert!(check_transition(BookingStatus::Cancelled, BookingStatus::Active).is_err());
        assert!(check_transition(BookingStatus::Returned, BookingStatus::Cancelled).is_err());
        assert!(check_transition(BookingStatus::Returned, BookingStatus::Active).is_err());
    }

    #[test]
    fn test_active_can_move_to_terminal() {
        assert!(check_transition(BookingStatus::Active, BookingStatus::Cancelled).is_ok());
        assert!(check_transition(BookingStatus::Active, BookingStatus::Returned).is_ok());
    }
}
