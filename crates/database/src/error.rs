use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to load settings for database connection: {0}")]
    ConnectionConfigError(String),

    #[error("Failed to connect to the database: {0}")]
    ConnectionError(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("A stored row could not be decoded: {0}")]
    InvalidRow(#[from] core_types::CoreError),

    #[error("The requested data was not found in the database.")]
    NotFound,
}
