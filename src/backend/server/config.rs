/**
 * Server Configuration
 *
 * This module loads the optional PostgreSQL connection used by the user and
 * post stores.
 *
 * # Error Handling
 *
 * Database errors are logged but do not prevent server startup. Without a
 * database the server falls back to in-memory stores.
 */

use sqlx::PgPool;

/// Database configuration result
///
/// `None` if the database is not available.
pub type DatabaseConfig = Option<PgPool>;

/// Load and initialize database connection pool
///
/// This function:
/// 1. Reads `DATABASE_URL` from environment
/// 2. Creates a PostgreSQL connection pool
/// 3. Runs database migrations
pub async fn load_database() -> DatabaseConfig {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set. Using in-memory stores.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Using in-memory stores.");
            return None;
        }
    };

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("Database migrations completed successfully");
        }
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}

/// Port to bind, from `SERVER_PORT` (default 3001)
pub fn server_port() -> u16 {
    std::env::var("SERVER_PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(3001)
}
