//! TwiML documents returned to Twilio.
//!
//! Only the two verbs the bridge needs are modelled: `<Hangup/>` to end the
//! call and `<Gather input="speech">` wrapping a `<Say>` to speak a reply and
//! listen for the next utterance.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use thiserror::Error;

/// Content type Twilio expects for TwiML responses
pub const TWIML_CONTENT_TYPE: &str = "text/xml";

/// Seconds of silence after which Twilio considers the utterance complete
pub const SPEECH_TIMEOUT_SECONDS: u32 = 1;

const GATHER_INPUT_SPEECH: &str = "speech";

/// Errors that can occur while rendering a TwiML document
#[derive(Debug, Error)]
pub enum TwimlError {
    #[error("Failed to write TwiML: {0}")]
    Write(String),

    #[error("TwiML is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Speak a reply, then listen for the caller's next utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechGather {
    /// Text spoken inside the gather
    pub say: String,
    /// Speech recognition language (e.g. "en-GB")
    pub language: String,
    /// Words or phrases the recognizer should favour
    pub hints: Vec<String>,
    /// Callback URL Twilio posts the recognized speech to
    pub action: Option<String>,
    /// Seconds of silence that end the utterance
    pub speech_timeout: u32,
}

/// A TwiML `<Response>` document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceResponse {
    /// End the call immediately
    Hangup,
    /// Speak and listen for more speech
    Gather(SpeechGather),
}

impl VoiceResponse {
    /// Whether this response terminates the call
    pub fn is_hangup(&self) -> bool {
        matches!(self, VoiceResponse::Hangup)
    }

    /// Render the document as XML.
    pub fn to_xml(&self) -> Result<String, TwimlError> {
        let mut writer = Writer::new(Vec::new());

        write(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;
        write(&mut writer, Event::Start(BytesStart::new("Response")))?;

        match self {
            VoiceResponse::Hangup => {
                write(&mut writer, Event::Empty(BytesStart::new("Hangup")))?;
            }
            VoiceResponse::Gather(gather) => {
                let hints = gather.hints.join(",");
                let speech_timeout = gather.speech_timeout.to_string();

                let mut start = BytesStart::new("Gather");
                start.push_attribute(("language", gather.language.as_str()));
                if !hints.is_empty() {
                    start.push_attribute(("hints", hints.as_str()));
                }
                if let Some(action) = &gather.action {
                    start.push_attribute(("action", action.as_str()));
                }
                start.push_attribute(("input", GATHER_INPUT_SPEECH));
                start.push_attribute(("speechTimeout", speech_timeout.as_str()));

                write(&mut writer, Event::Start(start))?;
                write(&mut writer, Event::Start(BytesStart::new("Say")))?;
                write(&mut writer, Event::Text(BytesText::new(&gather.say)))?;
                write(&mut writer, Event::End(BytesEnd::new("Say")))?;
                write(&mut writer, Event::End(BytesEnd::new("Gather")))?;
            }
        }

        write(&mut writer, Event::End(BytesEnd::new("Response")))?;

        Ok(String::from_utf8(writer.into_inner())?)
    }
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), TwimlError> {
    writer
        .write_event(event)
        .map_err(|e| TwimlError::Write(e.to_string()))
}

/// Split a custom vocabulary string into recognition hints.
///
/// Comma-separated input is treated as a list of phrases; otherwise every
/// whitespace-separated word becomes its own hint.
pub fn parse_hints(vocabulary: &str) -> Vec<String> {
    let items: Vec<&str> = if vocabulary.contains(',') {
        vocabulary.split(',').collect()
    } else {
        vocabulary.split_whitespace().collect()
    };

    items
        .into_iter()
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
