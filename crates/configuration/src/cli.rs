use crate::error::ConfigError;
use crate::read_config;
use crate::settings::Config;
use clap::Args;
use std::path::PathBuf;

/// Command-line flags that take precedence over every other configuration source.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigOverrides {
    /// Path to a TOML configuration file (defaults to ./config.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// PostgreSQL connection URL, overriding `database.url` and DATABASE_URL.
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    /// Keep entries in memory instead of PostgreSQL.
    #[arg(long, global = true)]
    pub in_memory: bool,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.database_url {
            config.database.url = Some(url.clone());
        }
        if self.in_memory {
            config.database.in_memory = true;
        }
    }

    /// Reads every configuration source, applies these overrides, then validates.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let mut config = read_config(self.config.as_deref())?;
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }
}
