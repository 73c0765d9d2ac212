use axum::{
    extract::{Path, State},
    middleware,
    routing::{get, put},
    Extension, Json, Router,
};

use crate::controllers::user_controller::UserController;
use crate::dto::response::ApiResponse;
use crate::dto::user_dto::{UpdateUserRequest, UserResponse};
use crate::middleware::auth::{auth_middleware, require_admin, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router(state: AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/", get(get_users))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // La autorización self-o-admin del update se resuelve en el controller
    let authenticated_routes = Router::new()
        .route("/:user_id", put(update_user))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    admin_routes.merge(authenticated_routes)
}

async fn get_users(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn update_user(
    State(state): State<AppState>,
    Extension(subject): Extension<AuthenticatedUser>,
    Path(user_id): Path<i32>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.update(subject, user_id, request).await?;
    Ok(Json(response))
}
