use sqlx::PgPool;

use crate::dto::response::ApiResponse;
use crate::dto::user_dto::{UpdateUserRequest, UserResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::UserRole;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{is_unique_violation, AppError};
use crate::utils::policy::{is_admin, is_owner};
use crate::utils::validation::validate_email;

pub struct UserController {
    repository: UserRepository,
}

impl UserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<UserResponse>>, AppError> {
        let users = self.repository.find_all().await?;

        Ok(ApiResponse::success_with_message(
            users.into_iter().map(UserResponse::from).collect(),
            "Users retrieved successfully".to_string(),
        ))
    }

    pub async fn update(
        &self,
        subject: AuthenticatedUser,
        user_id: i32,
        request: UpdateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        let current = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        // Admin puede actualizar a cualquiera; un cliente solo su propio perfil
        if !is_admin(&subject) && !is_owner(&subject, user_id) {
            return Err(AppError::Forbidden(
                "You can only update your own profile".to_string(),
            ));
        }

        if request.is_empty() {
            return Err(AppError::BadRequest(
                "At least one field must be provided for update".to_string(),
            ));
        }

        // Solo un admin puede tocar el rol
        if request.role.is_some() && !is_admin(&subject) {
            return Err(AppError::Forbidden(
                "You cannot change your own role".to_string(),
            ));
        }

        if let Some(ref role) = request.role {
            UserRole::parse(role).ok_or_else(|| {
                AppError::BadRequest("Role must be either \"admin\" or \"customer\"".to_string())
            })?;
        }

        let email = match request.email {
            Some(ref email) => {
                validate_email(email)
                    .map_err(|_| AppError::BadRequest("Invalid email format".to_string()))?;
                Some(email.to_lowercase())
            }
            None => None,
        };

        let user = self
            .repository
            .update(&current, request.name, email, request.phone, request.role)
            .await
            .map_err(|e| match e {
                // A diferencia del signup, acá el email duplicado sí es 409
                AppError::Database(ref db) if is_unique_violation(db) => {
                    AppError::Conflict("Email already exists".to_string())
                }
                other => other,
            })?;

        Ok(ApiResponse::success_with_message(
            user.into(),
            "User updated successfully".to_string(),
        ))
    }
}
