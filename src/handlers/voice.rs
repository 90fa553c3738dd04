//! Twilio voice webhook
//!
//! Twilio posts a form-encoded status callback for every turn of a call and
//! expects TwiML back. The handler only reads the three fields it needs and
//! ignores the rest of Twilio's payload.

use axum::{
    extract::{Form, State, rejection::FormRejection},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

use crate::core::{CallStatus, TWIML_CONTENT_TYPE, TurnEvent};
use crate::errors::app_error::{AppError, AppResult};
use crate::state::AppState;

/// Fields of a Twilio voice request used by the bridge
#[derive(Debug, Deserialize)]
pub struct VoiceWebhookRequest {
    #[serde(rename = "CallSid")]
    pub call_sid: String,
    #[serde(rename = "CallStatus", default)]
    pub call_status: String,
    #[serde(rename = "SpeechResult")]
    pub speech_result: Option<String>,
}

impl VoiceWebhookRequest {
    fn into_turn_event(self) -> AppResult<TurnEvent> {
        if self.call_sid.trim().is_empty() {
            return Err(AppError::BadRequest("CallSid must not be empty".to_string()));
        }

        Ok(TurnEvent {
            call_id: self.call_sid,
            status: CallStatus::parse(&self.call_status),
            speech: self.speech_result,
        })
    }
}

/// Handle one turn of a call and answer with TwiML
pub async fn voice_webhook(
    State(state): State<Arc<AppState>>,
    request: Result<Form<VoiceWebhookRequest>, FormRejection>,
) -> AppResult<Response> {
    let Form(request) = request.map_err(|rejection| {
        warn!("Rejected voice webhook: {}", rejection.body_text());
        AppError::BadRequest(rejection.body_text())
    })?;

    let event = request.into_turn_event()?;
    let response = state.turn_handler.handle(&event).await;
    let xml = response.to_xml()?;

    Ok(([(header::CONTENT_TYPE, TWIML_CONTENT_TYPE)], xml).into_response())
}
