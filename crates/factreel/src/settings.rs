//! Layered configuration.
//!
//! Sources, later overriding earlier:
//! 1. Bundled defaults (`factreel.toml` compiled into the binary)
//! 2. `~/.config/factreel/factreel.toml`
//! 3. `./factreel.toml`
//! 4. `FACTREEL_<SECTION>__<KEY>` environment variables
//!
//! Credentials are read separately, see
//! [`Credentials`](factreel_providers::Credentials).

use config::{Config, Environment, File, FileFormat};
use factreel_error::{ConfigError, FactreelError, FactreelResult};
use factreel_pipeline::PipelineSettings;
use factreel_providers::ProviderSettings;
use factreel_rate_limit::BackoffPolicy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Bundled default configuration.
pub const DEFAULT_CONFIG: &str = include_str!("../../../factreel.toml");

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "FACTREEL";

/// Top-level factreel configuration.
///
/// # Example
///
/// ```no_run
/// use factreel::FactreelConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = FactreelConfig::load()?;
/// println!("Videos go to {}", config.pipeline.output_dir.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct FactreelConfig {
    /// Stage parameters and output location
    #[serde(default)]
    pub pipeline: PipelineSettings,

    /// Speech rate-limit handling
    #[serde(default)]
    pub backoff: BackoffPolicy,

    /// Endpoints and models
    #[serde(default)]
    pub providers: ProviderSettings,
}

impl FactreelConfig {
    /// Load configuration from every layer, including the process environment.
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a present source cannot be parsed or
    /// the merged values are invalid.
    #[instrument]
    pub fn load() -> FactreelResult<Self> {
        Self::load_with_env(None)
    }

    /// Load configuration with explicit environment overrides.
    ///
    /// `env` replaces the process environment as the override source when
    /// given; keys use the same `FACTREEL_<SECTION>__<KEY>` form.
    ///
    /// # Errors
    ///
    /// See [`FactreelConfig::load`].
    pub fn load_with_env(env: Option<HashMap<String, String>>) -> FactreelResult<Self> {
        debug!("Loading configuration: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(config_dir) = dirs::config_dir() {
            let home_config = config_dir.join("factreel").join("factreel.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("factreel").required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            );

        Self::finish(builder.build())
    }

    /// Load configuration from a TOML string layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// See [`FactreelConfig::load`].
    pub fn from_toml_str(toml: &str) -> FactreelResult<Self> {
        Self::finish(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from_str(toml, FileFormat::Toml))
                .build(),
        )
    }

    /// Load configuration from a file layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> FactreelResult<Self> {
        Self::finish(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from(path.as_ref()))
                .build(),
        )
    }

    fn finish(built: Result<Config, config::ConfigError>) -> FactreelResult<Self> {
        let config: Self = built
            .map_err(|e| {
                FactreelError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                FactreelError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Check the merged values.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first invalid field.
    pub fn validate(&self) -> FactreelResult<()> {
        self.pipeline.validate()?;
        self.backoff.validate()?;
        Ok(())
    }
}
