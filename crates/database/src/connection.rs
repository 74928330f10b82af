use crate::error::DbError;
use crate::memory::MemoryStore;
use crate::repository::DbRepository;
use crate::store::EntryStore;
use configuration::DatabaseSettings;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::sync::Arc;
use std::time::Duration;

/// Establishes a connection pool to the PostgreSQL database.
///
/// The URL normally arrives through `DATABASE_URL` (see the `configuration`
/// crate). The pool can be shared across the entire application.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, DbError> {
    let database_url = settings
        .url
        .as_deref()
        .ok_or_else(|| DbError::ConnectionConfigError("DATABASE_URL must be set.".to_string()))?;

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .connect(database_url)
        .await?;

    tracing::info!(max_connections = settings.max_connections, "Connected to PostgreSQL.");
    Ok(pool)
}

/// A utility function to run database migrations automatically.
///
/// Ensures the `entries` table exists before the first request is served.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    // Use a relative path from the crate root
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied.");
    Ok(())
}

/// Opens the store selected by the settings: an in-memory store, or a
/// migrated PostgreSQL repository.
pub async fn open_store(settings: &DatabaseSettings) -> Result<Arc<dyn EntryStore>, DbError> {
    if settings.in_memory {
        tracing::warn!("Using the in-memory store; entries will not survive a restart.");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let pool = connect(settings).await?;
    run_migrations(&pool).await?;
    Ok(Arc::new(DbRepository::new(pool)))
}
