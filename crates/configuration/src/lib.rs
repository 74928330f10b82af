use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
#[cfg(feature = "clap")]
pub mod cli;
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
#[cfg(feature = "clap")]
pub use cli::ConfigOverrides;
pub use logging::init_tracing;
pub use settings::{Config, DatabaseSettings, LoggingSettings, ServerSettings};

/// Prefix of environment overrides, e.g. `TRACKER__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "TRACKER";

/// Loads and validates the application configuration.
///
/// Sources, later ones winning: built-in defaults, the TOML file at `path`
/// (or `config.toml` in the working directory if present), then `TRACKER__*`
/// environment variables. `DATABASE_URL` (also read from `.env`) fills
/// `database.url` when nothing else set it.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config = read_config(path)?;
    config.validate()?;
    Ok(config)
}

/// Like `load_config`, without validation, so callers can apply overrides first.
pub fn read_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    dotenvy::dotenv().ok();

    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config.toml").required(false),
    };

    let builder = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("database.max_connections", 10)?
        .set_default("database.acquire_timeout_secs", 5)?
        .set_default("database.in_memory", false)?
        .set_default("logging.filter", "info")?
        .set_default("logging.file_prefix", "sales-tracker")?
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let mut config = builder.try_deserialize::<Config>()?;

    if config.database.url.is_none() {
        config.database.url = std::env::var("DATABASE_URL").ok();
    }

    Ok(config)
}
