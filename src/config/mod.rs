//! Configuration management module.
//!
//! Supports loading configuration from:
//! - a `.env` file in the working directory
//! - TOML files (config/default.toml, config/{profile}.toml)
//! - Environment variables with `CODEBUILDER_WORKER__<SECTION>__<KEY>` pattern

mod server;

use std::time::{Duration, Instant};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::service::{DEFAULT_QUANTITY, GenerationLimits, RANDOM_GENERATOR};

pub use server::ServerConfig;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Code generation configuration.
    #[serde(default)]
    pub generation: GenerationSettings,

    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. `config/default.toml`
    /// 2. `config/{CODEBUILDER_PROFILE}.toml` (if `CODEBUILDER_PROFILE` is set)
    /// 3. Environment variables with `CODEBUILDER_WORKER__` prefix
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is not an error
        dotenvy::dotenv().ok();

        let profile =
            std::env::var("CODEBUILDER_PROFILE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{profile}")).required(false))
            // CODEBUILDER_WORKER__SERVER__PORT=8080 -> server.port = 8080
            .add_source(
                Environment::with_prefix("CODEBUILDER_WORKER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.generation.validate()?;

        if !matches!(self.observability.log_format.as_str(), "text" | "json") {
            return Err(ConfigError::Message(format!(
                "observability.log_format must be \"text\" or \"json\", got \"{}\"",
                self.observability.log_format
            )));
        }

        Ok(())
    }
}

/// Code generation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationSettings {
    /// Quantity used when a request does not specify one.
    #[serde(default = "default_quantity")]
    pub default_quantity: u64,

    /// Generator used when a request does not specify one.
    #[serde(default = "default_generator")]
    pub default_generator: String,

    /// Largest quantity a single request may ask for.
    #[serde(default = "default_max_request_quantity")]
    pub max_request_quantity: u64,

    /// Candidate draws allowed per request (0 = unlimited).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u64,

    /// Time allowed per request in milliseconds (0 = unlimited).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

const fn default_quantity() -> u64 {
    DEFAULT_QUANTITY
}

fn default_generator() -> String {
    RANDOM_GENERATOR.to_string()
}

const fn default_max_request_quantity() -> u64 {
    10_000
}

const fn default_max_attempts() -> u64 {
    1_000_000
}

const fn default_timeout_ms() -> u64 {
    10_000
}

impl GenerationSettings {
    /// Validate the generation settings.
    ///
    /// # Errors
    ///
    /// Returns an error if a default is inconsistent with the request ceiling.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_request_quantity == 0 {
            return Err(ConfigError::Message(
                "generation.max_request_quantity cannot be 0".to_string(),
            ));
        }
        if self.default_quantity > self.max_request_quantity {
            return Err(ConfigError::Message(
                "generation.default_quantity cannot exceed generation.max_request_quantity"
                    .to_string(),
            ));
        }
        if self.default_generator.is_empty() {
            return Err(ConfigError::Message(
                "generation.default_generator cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Loop guards for a request starting at `started`.
    #[must_use]
    pub fn limits(&self, started: Instant) -> GenerationLimits {
        GenerationLimits {
            max_attempts: (self.max_attempts > 0).then_some(self.max_attempts),
            deadline: (self.timeout_ms > 0)
                .then(|| started + Duration::from_millis(self.timeout_ms)),
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            default_quantity: default_quantity(),
            default_generator: default_generator(),
            max_request_quantity: default_max_request_quantity(),
            max_attempts: default_max_attempts(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Bearer token required by the generation API (empty = open access).
    #[serde(default)]
    pub api_token: String,
}

impl AuthConfig {
    /// Whether requests must present a token.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.api_token.is_empty()
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "text" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Enable Prometheus metrics endpoint.
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

const fn default_metrics_enabled() -> bool {
    true
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            metrics_enabled: true,
        }
    }
}
