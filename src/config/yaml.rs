use serde::Deserialize;
use std::path::PathBuf;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Values present in
/// the file override environment variables.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 1337
///
/// engine:
///   url: "https://example.teneo.ai/my-bot/"
///   timeout_seconds: 10
///
/// telephony:
///   webhook_url: "https://bridge.example.com/"
///   first_input: ""
///   language_stt: "en-GB"
///   language_tts: "en-GB"
///   fallback_message: "Sorry, something went wrong. Please try again."
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub engine: Option<EngineYaml>,
    pub telephony: Option<TelephonyYaml>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Conversational engine configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct EngineYaml {
    /// Teneo engine endpoint
    pub url: Option<String>,
    /// Per-request timeout; unset waits indefinitely
    pub timeout_seconds: Option<u64>,
}

/// Twilio-facing configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TelephonyYaml {
    /// URL Twilio calls back with the next utterance
    pub webhook_url: Option<String>,
    /// Input sent to the engine when a call starts
    pub first_input: Option<String>,
    /// Speech recognition language
    pub language_stt: Option<String>,
    /// Speech synthesis language
    pub language_tts: Option<String>,
    /// Spoken when the engine cannot be reached
    pub fallback_message: Option<String>,
}

impl YamlConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be read
    /// - The YAML is malformed
    /// - Required fields have invalid types
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;

        let config: YamlConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse YAML config: {e}"))?;

        Ok(config)
    }
}
