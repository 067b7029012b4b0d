use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{CONFIG_FILE, DEFAULT_BUFFER_CAPACITY, DEFAULT_SOURCE_NAME, ENV_PREFIX};
use crate::error::{CoreError, CoreResult};


#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub parser: ParserConfig,
}

/// Tuning for the stream reader behind every parse call.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ParserConfig {
    /// Initial ring buffer capacity in bytes. The buffer doubles on demand.
    pub buffer_capacity: usize,
    /// Name reported in parse errors.
    pub source_name: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            source_name: DEFAULT_SOURCE_NAME.to_string(),
        }
    }
}

impl ParserConfig {
    /// ## Summary
    /// Returns a copy of this configuration reporting errors against `name`.
    #[must_use]
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    /// ## Summary
    /// Checks that the configuration can drive a reader.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if the buffer capacity is zero.
    pub fn validate(&self) -> CoreResult<()> {
        if self.buffer_capacity == 0 {
            return Err(CoreError::ConfigError(
                "parser.buffer_capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from an optional `vcard3.toml` file and `VCARD3__*`
    /// environment variables into a `Settings`.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it, or
    /// validating the parser section fails.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("parser.buffer_capacity", DEFAULT_BUFFER_CAPACITY as u64)?
            .set_default("parser.source_name", DEFAULT_SOURCE_NAME)?
            // TOML file
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            // Env overrides
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.parser.validate()?;
        tracing::debug!(
            buffer_capacity = settings.parser.buffer_capacity,
            source_name = %settings.parser.source_name,
            "Loaded settings"
        );

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
