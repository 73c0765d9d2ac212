//! Utilidades de validación
//!
//! Funciones helper para validación de datos y conversión de tipos.

use chrono::NaiveDate;
use validator::ValidationError;

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar formato de email (chequeo básico local@dominio.tld)
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    let mut parts = value.split('@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    let valid = parts.next().is_none()
        && !local.is_empty()
        && !local.chars().any(char::is_whitespace)
        && !domain.is_empty()
        && !domain.chars().any(char::is_whitespace)
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.');

    if valid {
        Ok(())
    } else {
        let mut error = ValidationError::new("email");
        error.add_param("value".into(), &value.to_string());
        Err(error)
    }
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_date() {
        assert_eq!(
            validate_date("2025-01-03").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 3).unwrap()
        );
        assert!(validate_date("2025-13-01").is_err());
        assert!(validate_date("03/01/2025").is_err());
        assert!(validate_date("").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("juan@example.com").is_ok());
        assert!(validate_email("a.b+c@sub.example.org").is_ok());
        assert!(validate_email("sin-arroba").is_err());
        assert!(validate_email("juan@dominio").is_err());
        assert!(validate_email("juan@@example.com").is_err());
        assert!(validate_email("juan @example.com").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("hola").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }
}
