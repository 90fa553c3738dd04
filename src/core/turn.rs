//! One conversational turn of a phone call.
//!
//! A turn starts with a Twilio status callback, sends the caller's words to the
//! conversational engine and ends with the TwiML document that either keeps
//! listening or hangs up:
//!
//! ```text
//! NEW --ringing--> AWAITING_SPEECH --speech--> AWAITING_SPEECH --endCall--> ENDED
//! ```

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::engine::{ConversationEngine, EngineError, EngineReply};
use super::session::{SessionStore, SessionStoreError};
use super::twiml::{SPEECH_TIMEOUT_SECONDS, SpeechGather, VoiceResponse, parse_hints};

/// Twilio call status as reported in the `CallStatus` field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallStatus {
    Queued,
    Ringing,
    InProgress,
    Completed,
    Busy,
    Failed,
    NoAnswer,
    Canceled,
    /// Any value Twilio may add later, kept verbatim
    Other(String),
}

impl CallStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            "queued" => CallStatus::Queued,
            "ringing" => CallStatus::Ringing,
            "in-progress" => CallStatus::InProgress,
            "completed" => CallStatus::Completed,
            "busy" => CallStatus::Busy,
            "failed" => CallStatus::Failed,
            "no-answer" => CallStatus::NoAnswer,
            "canceled" => CallStatus::Canceled,
            other => CallStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CallStatus::Queued => "queued",
            CallStatus::Ringing => "ringing",
            CallStatus::InProgress => "in-progress",
            CallStatus::Completed => "completed",
            CallStatus::Busy => "busy",
            CallStatus::Failed => "failed",
            CallStatus::NoAnswer => "no-answer",
            CallStatus::Canceled => "canceled",
            CallStatus::Other(other) => other,
        }
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inbound call event, one per webhook invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnEvent {
    pub call_id: String,
    pub status: CallStatus,
    pub speech: Option<String>,
}

/// What the caller contributed on this turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnKind {
    /// The call just arrived; the engine gets the configured first input
    FirstTurn,
    /// The caller said something
    Utterance(String),
    /// Nothing was recognized
    NoInput,
}

impl TurnKind {
    /// Classify an event. A ringing call is always the first turn, even if a
    /// speech result happens to be attached.
    pub fn classify(event: &TurnEvent) -> Self {
        match &event.status {
            CallStatus::Ringing => TurnKind::FirstTurn,
            CallStatus::InProgress => match event.speech.as_deref() {
                Some(speech) if !speech.is_empty() => TurnKind::Utterance(speech.to_string()),
                _ => TurnKind::NoInput,
            },
            CallStatus::Queued
            | CallStatus::Completed
            | CallStatus::Busy
            | CallStatus::Failed
            | CallStatus::NoAnswer
            | CallStatus::Canceled
            | CallStatus::Other(_) => TurnKind::NoInput,
        }
    }

    /// Text to send to the engine for this turn
    pub fn engine_input<'a>(&'a self, first_input: &'a str) -> &'a str {
        match self {
            TurnKind::FirstTurn => first_input,
            TurnKind::Utterance(speech) => speech,
            TurnKind::NoInput => "",
        }
    }
}

/// Per-deployment settings that shape every turn
#[derive(Debug, Clone)]
pub struct TurnSettings {
    /// Input sent to the engine when a call starts ringing
    pub first_input: String,
    /// Speech recognition language for gathers
    pub language: String,
    /// Callback URL for the next turn; Twilio posts to the current URL when unset
    pub action_url: Option<String>,
    /// Spoken when a turn cannot be completed
    pub fallback_message: String,
}

/// Failures that interrupt a turn before a reply is available
#[derive(Debug, Error)]
pub enum TurnError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    SessionStore(#[from] SessionStoreError),
}

/// Orchestrates one request/response cycle between Twilio and the engine
#[derive(Clone)]
pub struct TurnHandler {
    sessions: Arc<dyn SessionStore>,
    engine: Arc<dyn ConversationEngine>,
    settings: TurnSettings,
}

impl TurnHandler {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        engine: Arc<dyn ConversationEngine>,
        settings: TurnSettings,
    ) -> Self {
        Self {
            sessions,
            engine,
            settings,
        }
    }

    /// Handle one call event.
    ///
    /// Failures never drop the call: the caller hears the fallback message and
    /// the gather stays open so they can try again.
    pub async fn handle(&self, event: &TurnEvent) -> VoiceResponse {
        match self.run(event).await {
            Ok(response) => response,
            Err(e) => {
                error!(
                    call_id = %event.call_id,
                    engine = %self.engine.name(),
                    error = %e,
                    "Turn failed, answering with fallback message"
                );
                self.fallback()
            }
        }
    }

    async fn run(&self, event: &TurnEvent) -> Result<VoiceResponse, TurnError> {
        let kind = TurnKind::classify(event);
        let input = kind.engine_input(&self.settings.first_input);

        debug!(
            call_id = %event.call_id,
            status = %event.status,
            turn = ?kind,
            "Handling call turn"
        );

        let session_id = self.sessions.get(&event.call_id).await?;
        let reply = self
            .engine
            .send_input(session_id.as_deref(), input)
            .await?;
        // The reply is still spoken when the mapping cannot be recorded.
        if let Err(e) = self.sessions.set(&event.call_id, &reply.session_id).await {
            warn!(
                call_id = %event.call_id,
                session_id = %reply.session_id,
                error = %e,
                "Failed to record engine session"
            );
        }

        info!(call_id = %event.call_id, "Caller ID: {}", event.call_id);
        if !input.is_empty() {
            info!(call_id = %event.call_id, "Captured input: {}", input);
        }
        if !reply.output.text.is_empty() {
            info!(call_id = %event.call_id, "Spoken output: {}", reply.output.text);
        }

        Ok(self.shape_response(&reply))
    }

    /// Turn an engine reply into the TwiML to send back.
    pub fn shape_response(&self, reply: &EngineReply) -> VoiceResponse {
        if reply.output.ends_call() {
            return VoiceResponse::Hangup;
        }

        let hints = match reply.output.custom_vocabulary() {
            Some(vocabulary) => {
                debug!("Custom vocabulary: {}", vocabulary);
                parse_hints(vocabulary)
            }
            None => Vec::new(),
        };

        self.gather(reply.output.text.clone(), hints)
    }

    fn fallback(&self) -> VoiceResponse {
        self.gather(self.settings.fallback_message.clone(), Vec::new())
    }

    fn gather(&self, say: String, hints: Vec<String>) -> VoiceResponse {
        VoiceResponse::Gather(SpeechGather {
            say,
            language: self.settings.language.clone(),
            hints,
            action: self.settings.action_url.clone(),
            speech_timeout: SPEECH_TIMEOUT_SECONDS,
        })
    }
}
