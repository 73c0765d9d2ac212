use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Extension, Json, Router,
};

use crate::controllers::booking_controller::BookingController;
use crate::dto::booking_dto::{
    BookingRecordResponse, BookingResponse, CreateBookingRequest, UpdateBookingStatusRequest,
};
use crate::dto::response::ApiResponse;
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_booking_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_bookings))
        .route("/", post(create_booking))
        .route("/:booking_id", put(update_booking_status))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn get_bookings(
    State(state): State<AppState>,
    Extension(subject): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.list(subject).await?;
    Ok(Json(response))
}

async fn create_booking(
    State(state): State<AppState>,
    Extension(subject): Extension<AuthenticatedUser>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingResponse>>), AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.create(subject, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_booking_status(
    State(state): State<AppState>,
    Extension(subject): Extension<AuthenticatedUser>,
    Path(booking_id): Path<i32>,
    Json(request): Json<UpdateBookingStatusRequest>,
) -> Result<Json<ApiResponse<BookingRecordResponse>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.update_status(subject, booking_id, request).await?;
    Ok(Json(response))
}
