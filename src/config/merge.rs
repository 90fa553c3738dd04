//! Merging environment and YAML configuration.

use super::env::EnvConfig;
use super::yaml::YamlConfig;
use super::{
    DEFAULT_FALLBACK_MESSAGE, DEFAULT_HOST, DEFAULT_LANGUAGE, DEFAULT_PORT, ServerConfig,
};

/// Build the final configuration.
///
/// Environment values form the base, YAML values override them, and defaults
/// fill whatever is still missing. The engine URL has no default.
pub fn merge_config(yaml: Option<YamlConfig>) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let env = EnvConfig::load()?;
    merge(env, yaml.unwrap_or_default())
}

pub(crate) fn merge(
    env: EnvConfig,
    yaml: YamlConfig,
) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let server = yaml.server.unwrap_or_default();
    let engine = yaml.engine.unwrap_or_default();
    let telephony = yaml.telephony.unwrap_or_default();

    let engine_url = engine.url.or(env.engine_url).ok_or(
        "Conversational engine URL is not configured (set TENEO_ENGINE_URL or engine.url)",
    )?;

    Ok(ServerConfig {
        host: server
            .host
            .or(env.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port: server.port.or(env.port).unwrap_or(DEFAULT_PORT),
        engine_url,
        engine_timeout_seconds: engine.timeout_seconds.or(env.engine_timeout_seconds),
        webhook_url: telephony.webhook_url.or(env.webhook_url),
        first_input: telephony.first_input.or(env.first_input).unwrap_or_default(),
        language_stt: telephony
            .language_stt
            .or(env.language_stt)
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        language_tts: telephony
            .language_tts
            .or(env.language_tts)
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        fallback_message: telephony
            .fallback_message
            .or(env.fallback_message)
            .unwrap_or_else(|| DEFAULT_FALLBACK_MESSAGE.to_string()),
    })
}
