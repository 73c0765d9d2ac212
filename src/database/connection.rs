//! Conexión a PostgreSQL e inicialización del schema
//!
//! Este módulo crea el pool de conexiones y bootstrapea las tres tablas
//! del sistema con sus constraints.

use anyhow::Result;
use sqlx::PgPool;

/// Crear un pool de conexiones a la base de datos
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    let pool = PgPool::connect(database_url).await?;

    Ok(pool)
}

/// Crear las tablas si no existen
///
/// Los CHECK constraints replican las invariantes estructurales (enums
/// cerrados, precio positivo, fin posterior al inicio, email en minúsculas).
/// La invariante cruzada reserva-activa ↔ vehículo-booked NO la mantiene la
/// base: es responsabilidad del motor de reservas, siempre transaccional.
pub async fn init_db(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            password VARCHAR(255) NOT NULL CHECK (LENGTH(password) >= 6),
            phone VARCHAR(20) NOT NULL,
            role VARCHAR(10) NOT NULL CHECK (role IN ('admin', 'customer')),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            CONSTRAINT email_lowercase CHECK (LOWER(email) = email)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vehicles (
            id SERIAL PRIMARY KEY,
            vehicle_name VARCHAR(255) NOT NULL,
            type VARCHAR(10) NOT NULL CHECK (type IN ('car', 'bike', 'van', 'SUV')),
            registration_number VARCHAR(50) NOT NULL UNIQUE,
            daily_rent_price DECIMAL(10, 2) NOT NULL CHECK (daily_rent_price > 0),
            availability_status VARCHAR(10) NOT NULL DEFAULT 'available'
                CHECK (availability_status IN ('available', 'booked')),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id SERIAL PRIMARY KEY,
            customer_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            vehicle_id INTEGER NOT NULL REFERENCES vehicles(id) ON DELETE CASCADE,
            rent_start_date DATE NOT NULL,
            rent_end_date DATE NOT NULL,
            total_price DECIMAL(10, 2) NOT NULL CHECK (total_price > 0),
            status VARCHAR(10) NOT NULL DEFAULT 'active'
                CHECK (status IN ('active', 'cancelled', 'returned')),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_rent_dates CHECK (rent_end_date > rent_start_date)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
