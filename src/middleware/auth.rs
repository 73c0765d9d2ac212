//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! y verificación del rol del sujeto autenticado.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::{
    models::user::UserRole,
    state::AppState,
    utils::errors::AppError,
    utils::jwt::{extract_token_from_header, verify_token, JwtConfig},
};

/// Sujeto autenticado que se inyecta en las requests
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub role: UserRole,
}

/// Middleware de autenticación JWT
///
/// Verifica el bearer token e inyecta `AuthenticatedUser` como extension;
/// todo lo que corre detrás de este middleware puede asumir un sujeto válido.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

    let token = extract_token_from_header(auth_header)?;

    let config = JwtConfig::from(&state.config);
    let claims = verify_token(token, &config)?;

    let id: i32 = claims
        .sub
        .parse()
        .map_err(|_| AppError::Unauthorized("Unauthorized".to_string()))?;

    let role = UserRole::parse(&claims.role)
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

    request.extensions_mut().insert(AuthenticatedUser { id, role });

    Ok(next.run(request).await)
}

/// Middleware de autorización: exige rol admin
///
/// Corre después de `auth_middleware` y lee la extension que este dejó.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<AuthenticatedUser>()
        .copied()
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

    if user.role != UserRole::Admin {
        return Err(AppError::Forbidden(
            "Forbidden: admin role required".to_string(),
        ));
    }

    Ok(next.run(request).await)
}
