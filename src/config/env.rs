//! Environment variable loading.
//!
//! The variable names match the ones documented for the bridge deployment
//! (`TENEO_ENGINE_URL`, `WEBHOOK_FOR_TWILIO`, ...). Blank values are treated
//! as unset so that a blank line in a `.env` file falls back to the default.
//! `FIRST_INPUT_FOR_TENEO` is sent to the engine verbatim, so only an empty
//! value counts as unset there.

use std::env;

/// Raw values read from the environment, before defaults are applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub engine_url: Option<String>,
    pub engine_timeout_seconds: Option<u64>,
    pub webhook_url: Option<String>,
    pub first_input: Option<String>,
    pub language_stt: Option<String>,
    pub language_tts: Option<String>,
    pub fallback_message: Option<String>,
}

impl EnvConfig {
    /// Read all recognized variables from the process environment
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            host: var("HOST"),
            port: parse_var("PORT")?,
            engine_url: var("TENEO_ENGINE_URL"),
            engine_timeout_seconds: parse_var("ENGINE_TIMEOUT_SECONDS")?,
            webhook_url: var("WEBHOOK_FOR_TWILIO"),
            first_input: raw_var("FIRST_INPUT_FOR_TENEO"),
            language_stt: var("LANGUAGE_STT"),
            language_tts: var("LANGUAGE_TTS"),
            fallback_message: var("FALLBACK_MESSAGE"),
        })
    }
}

fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Like `var`, but whitespace is a meaningful value
fn raw_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

fn parse_var<T>(name: &str) -> Result<Option<T>, Box<dyn std::error::Error>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match var(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| format!("Invalid {name} value '{raw}': {e}").into()),
        None => Ok(None),
    }
}
