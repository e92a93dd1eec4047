//! Configuration management for the Weather Ledger
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with WXL__ prefix (`WXL__GEMINI__MODEL`)

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Default Gemini REST endpoint
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default generative model
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

/// Environment variable carrying the model API key
pub const GEMINI_API_KEY_ENV: &str = "WXL__GEMINI__API_KEY";

/// Unprefixed fallback for the model API key
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Generative model configuration
    pub gemini: GeminiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeminiConfig {
    /// API key for the model service. May be empty; requests then fail.
    #[serde(default)]
    pub api_key: String,

    /// REST endpoint, without the `/models/...` suffix
    pub base_url: String,

    /// Model identifier
    pub model: String,
}

impl GeminiConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("WXL_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("gemini.api_key", "")?
            .set_default("gemini.base_url", DEFAULT_GEMINI_BASE_URL)?
            .set_default("gemini.model", DEFAULT_GEMINI_MODEL)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (WXL__ prefix, __ between keys)
            .add_source(
                Environment::with_prefix("WXL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Config = config.try_deserialize()?;

        // Plain API_KEY is honoured when no prefixed key was given
        if !config.gemini.is_configured() {
            if let Ok(key) = std::env::var(FALLBACK_API_KEY_ENV) {
                config.gemini.api_key = key;
            }
        }

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            gemini: GeminiConfig::default(),
        }
    }
}
