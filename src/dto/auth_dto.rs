use serde::{Deserialize, Serialize};

use crate::dto::user_dto::UserResponse;

// Request de registro
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub role: String,
}

// Request de inicio de sesión
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

// Datos de inicio de sesión exitoso
#[derive(Debug, Serialize)]
pub struct SigninData {
    pub token: String,
    pub user: UserResponse,
}
