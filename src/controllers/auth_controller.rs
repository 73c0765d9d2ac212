use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{SigninData, SigninRequest, SignupRequest};
use crate::dto::response::ApiResponse;
use crate::dto::user_dto::UserResponse;
use crate::models::user::UserRole;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{is_unique_violation, AppError};
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthController {
    repository: UserRepository,
    jwt_config: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, config: &EnvironmentConfig) -> Self {
        Self {
            repository: UserRepository::new(pool),
            jwt_config: JwtConfig::from(config),
        }
    }

    pub async fn signup(
        &self,
        request: SignupRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        // Validar campos requeridos
        if request.name.trim().is_empty()
            || request.email.trim().is_empty()
            || request.password.is_empty()
            || request.phone.trim().is_empty()
            || request.role.trim().is_empty()
        {
            return Err(AppError::BadRequest("All fields are required".to_string()));
        }

        let role = UserRole::parse(&request.role).ok_or_else(|| {
            AppError::BadRequest("Role must be either \"admin\" or \"customer\"".to_string())
        })?;

        // Longitud mínima del password, antes del hash
        if request.password.len() < 6 {
            return Err(AppError::BadRequest(
                "Password must be at least 6 characters long".to_string(),
            ));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

        let email = request.email.to_lowercase();

        let user = self
            .repository
            .create(&request.name, &email, &password_hash, &request.phone, role.as_str())
            .await
            .map_err(|e| match e {
                // El contrato devuelve 400 (no 409) para email duplicado en signup
                AppError::Database(ref db) if is_unique_violation(db) => {
                    AppError::BadRequest("Email already exists".to_string())
                }
                other => other,
            })?;

        Ok(ApiResponse::success_with_message(
            user.into(),
            "User registered successfully".to_string(),
        ))
    }

    pub async fn signin(
        &self,
        request: SigninRequest,
    ) -> Result<ApiResponse<SigninData>, AppError> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(AppError::BadRequest(
                "Email and password are required".to_string(),
            ));
        }

        let user = self
            .repository
            .find_by_email(&request.email.to_lowercase())
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        let valid = verify(&request.password, &user.password)
            .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        let token = generate_token(user.id, &user.email, &user.role, &self.jwt_config)?;

        Ok(ApiResponse::success_with_message(
            SigninData {
                token,
                user: user.into(),
            },
            "Login successful".to_string(),
        ))
    }
}
