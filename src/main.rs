mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Vehicle Rental System API");
    info!("============================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match database::connection::create_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    database::connection::init_db(&pool).await?;
    info!("✅ Schema de base de datos verificado");

    let cors = if config.is_development() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let addr: SocketAddr = config.server_addr().parse()?;
    let app_state = AppState::new(pool, config);

    let app = Router::new()
        .route("/", get(health_check))
        .nest("/v1/auth", routes::auth_routes::create_auth_router())
        .nest("/v1/users", routes::user_routes::create_user_router(app_state.clone()))
        .nest("/v1/vehicles", routes::vehicle_routes::create_vehicle_router(app_state.clone()))
        .nest("/v1/bookings", routes::booking_routes::create_booking_router(app_state.clone()))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   POST /v1/auth/signup - Registro de usuario");
    info!("   POST /v1/auth/signin - Inicio de sesión");
    info!("   GET  /v1/users - Listar usuarios (admin)");
    info!("   PUT  /v1/users/:id - Actualizar usuario (self o admin)");
    info!("   GET  /v1/vehicles - Listar vehículos");
    info!("   GET  /v1/vehicles/:id - Obtener vehículo");
    info!("   POST /v1/vehicles - Crear vehículo (admin)");
    info!("   PUT  /v1/vehicles/:id - Actualizar vehículo (admin)");
    info!("   DELETE /v1/vehicles/:id - Eliminar vehículo (admin)");
    info!("   GET  /v1/bookings - Listar reservas (según rol)");
    info!("   POST /v1/bookings - Crear reserva");
    info!("   PUT  /v1/bookings/:id - Cambiar estado de reserva");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check del servicio
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "message": "Vehicle Rental System API is running",
        "data": {
            "service": "Vehicle Rental System",
            "version": "1.0.0",
            "status": "operational",
            "endpoints": {
                "auth": "/v1/auth",
                "users": "/v1/users",
                "vehicles": "/v1/vehicles",
                "bookings": "/v1/bookings"
            }
        }
    }))
}

/// Fallback 404 en JSON
async fn not_found() -> (axum::http::StatusCode, Json<serde_json::Value>) {
    (
        axum::http::StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": "Route not found"
        })),
    )
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
