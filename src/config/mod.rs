//! Configuration module for the call bridge
//!
//! This module handles server configuration from various sources: .env files, YAML files,
//! and environment variables. Priority: YAML > ENV vars > .env values > defaults.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Merging YAML and environment configurations
//! - `validation`: Configuration validation logic
//!
//! # Example
//! ```rust,no_run
//! use callbridge::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable overrides
//! let config_path = PathBuf::from("config.yaml");
//! let config = ServerConfig::from_file(&config_path)?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use std::time::Duration;

mod env;
mod merge;
mod validation;
mod yaml;

use crate::core::TurnSettings;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 1337;
pub const DEFAULT_LANGUAGE: &str = "en-GB";
pub const DEFAULT_FALLBACK_MESSAGE: &str = "Sorry, something went wrong. Please try again.";

/// Server configuration
///
/// Contains all configuration needed to run the bridge:
/// - Server settings (host, port)
/// - Conversational engine endpoint
/// - Twilio-facing settings (callback URL, languages, first input)
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    // Engine settings
    /// Teneo engine endpoint
    pub engine_url: String,
    /// Per-request engine timeout. `None` waits until Twilio gives up on the webhook.
    pub engine_timeout_seconds: Option<u64>,

    // Telephony settings
    /// Callback URL Twilio posts the next utterance to (the `action` of each gather)
    pub webhook_url: Option<String>,
    /// Input sent to the engine when a call starts ringing
    pub first_input: String,
    /// Speech recognition language
    pub language_stt: String,
    /// Speech synthesis language. Not emitted in TwiML; Twilio picks the voice.
    pub language_tts: String,
    /// Spoken to the caller when a turn fails
    pub fallback_message: String,
}

impl ServerConfig {
    /// Load configuration from environment variables (and defaults)
    ///
    /// The .env file, if any, is expected to have been loaded by the caller.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = merge::merge_config(None)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - The engine URL is missing or any URL is invalid
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let yaml_config = yaml::YamlConfig::from_file(path)?;
        let config = merge::merge_config(Some(yaml_config))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        validation::validate_engine_url(&self.engine_url)?;
        validation::validate_webhook_url(&self.webhook_url)?;
        Ok(())
    }

    /// Get the server address as a string
    ///
    /// Returns the address in the format "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Engine request timeout, if one is configured
    pub fn engine_timeout(&self) -> Option<Duration> {
        self.engine_timeout_seconds.map(Duration::from_secs)
    }

    /// Settings applied by the turn handler to every call
    pub fn turn_settings(&self) -> TurnSettings {
        TurnSettings {
            first_input: self.first_input.clone(),
            language: self.language_stt.clone(),
            action_url: self.webhook_url.clone(),
            fallback_message: self.fallback_message.clone(),
        }
    }
}
