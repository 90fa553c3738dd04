//! Base trait and types for conversational engines.
//!
//! A conversational engine receives one user utterance per call turn and answers
//! with the text to speak back plus a bag of named output parameters. The engine
//! owns the conversation state; the bridge only carries its session identifier
//! from one webhook invocation to the next.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Output parameter that ends the call when set to the literal string `"true"`
pub const PARAM_END_CALL: &str = "twilio_endCall";

/// Output parameter carrying recognition hints for the next speech gather
pub const PARAM_CUSTOM_VOCABULARY: &str = "twilio_customVocabulary";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur while talking to a conversational engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The HTTP request could not be sent or timed out
    #[error("Engine request failed: {0}")]
    Request(String),

    /// The engine answered with a non-success HTTP status
    #[error("Engine returned HTTP {status}")]
    Http { status: u16 },

    /// The engine body could not be decoded
    #[error("Invalid engine response: {0}")]
    InvalidResponse(String),

    /// The engine reported an error in its payload
    #[error("Engine error (status {status}): {message}")]
    Engine { status: i64, message: String },

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

// =============================================================================
// Reply Types
// =============================================================================

/// Output section of an engine reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineOutput {
    /// Text to speak back to the caller
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,

    /// Named output parameters set by the conversation flow
    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: HashMap<String, serde_json::Value>,
}

/// Engines send `null` for fields that have no value on this turn.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl EngineOutput {
    /// Get a string-valued output parameter.
    ///
    /// Parameters holding anything other than a JSON string are treated as absent.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).and_then(|value| value.as_str())
    }

    /// Whether the conversation flow asked to hang up.
    pub fn ends_call(&self) -> bool {
        self.parameter(PARAM_END_CALL) == Some("true")
    }

    /// Custom vocabulary for the next gather, if the flow provided a non-empty one.
    pub fn custom_vocabulary(&self) -> Option<&str> {
        self.parameter(PARAM_CUSTOM_VOCABULARY)
            .filter(|vocabulary| !vocabulary.is_empty())
    }
}

/// Reply returned by an engine for a single input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineReply {
    /// Session identifier to use for the next input of the same conversation
    pub session_id: String,

    /// Answer produced for this input
    pub output: EngineOutput,
}

// =============================================================================
// Engine Trait
// =============================================================================

/// A conversational engine that keeps server-side session state.
#[async_trait]
pub trait ConversationEngine: Send + Sync {
    /// Send one user input to the engine.
    ///
    /// `session_id` is `None` when no conversation has been started for the
    /// caller yet, in which case the engine starts a new session and returns
    /// its identifier in the reply.
    async fn send_input(&self, session_id: Option<&str>, text: &str) -> EngineResult<EngineReply>;

    /// Short provider name used in logs.
    fn name(&self) -> &str;
}
