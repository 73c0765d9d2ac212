//! Política de acceso
//!
//! Predicados puros de autorización por rol y por propiedad del recurso,
//! consumidos por bookings y users.

use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::UserRole;

/// Verificar si el sujeto autenticado es administrador
pub fn is_admin(subject: &AuthenticatedUser) -> bool {
    subject.role == UserRole::Admin
}

/// Verificar si el sujeto autenticado es el dueño del recurso
pub fn is_owner(subject: &AuthenticatedUser, resource_owner_id: i32) -> bool {
    subject.id == resource_owner_id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(id: i32, role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser { id, role }
    }

    #[test]
    fn test_is_admin() {
        assert!(is_admin(&subject(1, UserRole::Admin)));
        assert!(!is_admin(&subject(1, UserRole::Customer)));
    }

    #[test]
    fn test_is_owner() {
        assert!(is_owner(&subject(7, UserRole::Customer), 7));
        assert!(!is_owner(&subject(7, UserRole::Customer), 8));
        // el rol no otorga propiedad
        assert!(!is_owner(&subject(1, UserRole::Admin), 2));
    }
}
