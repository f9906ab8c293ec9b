//! Configuration management and validation.

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use validator::Validate;

/// Adapter configuration block.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdapterConfig {
    /// Whether the adapter registers with the host at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Budget the transport should allow for the endpoint call.
    #[serde(default = "default_timeout_ms")]
    #[validate(range(min = 100))]
    pub timeout_ms: u32,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_timeout_ms() -> u32 {
    1000
}

/// Top-level settings loaded from TOML with environment overrides.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub adapter: AdapterConfig,
}

impl Settings {
    /// Load settings from a TOML document, letting `CREATIVECDN__`-prefixed
    /// environment variables override individual keys.
    ///
    /// # Errors
    ///
    /// Returns an error when the TOML does not parse or does not match the
    /// settings shape.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let environment = Environment::default()
            .prefix("CREATIVECDN")
            .separator("__");

        let toml = File::from_str(toml_str, FileFormat::Toml);
        let config = Config::builder()
            .add_source(toml)
            .add_source(environment)
            .build()?;

        config.try_deserialize()
    }
}
