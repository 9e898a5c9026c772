use anyhow::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use serde::Deserialize;

use crate::constants::{DEFAULT_LOG_LEVEL, DEFAULT_STORE_PATH, DEFAULT_UNTIL_BOUNDARY_SECONDS, ENV_PREFIX};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub schedule: ScheduleConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Seconds field of the generated UNTIL boundary (`23:59:SS`).
    pub until_boundary_seconds: u32,
}

impl ScheduleConfig {
    /// ## Summary
    /// Checks that the boundary seconds form a valid wall-clock second.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` if the value is above 59.
    pub fn validate(&self) -> CoreResult<()> {
        if self.until_boundary_seconds > 59 {
            return Err(CoreError::InvalidConfiguration(format!(
                "schedule.until_boundary_seconds must be within 0..=59, got {}",
                self.until_boundary_seconds
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub path: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional `config.toml`.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it, or
    /// validating it fails.
    pub fn load() -> Result<Self> {
        Self::from_builder(
            Config::builder()
                // TOML file
                .add_source(config::File::with_name("config.toml").required(false))
                // Env
                .add_source(
                    config::Environment::with_prefix(ENV_PREFIX)
                        .prefix_separator("_")
                        .separator("__")
                        .ignore_empty(true)
                        .try_parsing(true),
                ),
        )
    }

    /// ## Summary
    /// Applies defaults to `builder`, then builds and validates the settings.
    ///
    /// ## Errors
    /// Returns an error if building, deserializing, or validating fails.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let settings = builder
            .set_default("logging.level", DEFAULT_LOG_LEVEL)?
            .set_default(
                "schedule.until_boundary_seconds",
                i64::from(DEFAULT_UNTIL_BOUNDARY_SECONDS),
            )?
            .set_default("store.path", DEFAULT_STORE_PATH)?
            .build()?
            .try_deserialize::<Settings>()?;

        settings.schedule.validate()?;
        Ok(settings)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
