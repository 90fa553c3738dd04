//! Teneo Interaction Engine (TIE) API client.
//!
//! # API Reference
//!
//! - Endpoint: `POST <engine_url>` with an `application/x-www-form-urlencoded` body
//! - Input: `userinput` plus `viewtype=tieapi` / `viewname=tieapi` to select the JSON view
//! - Session: carried in the `JSESSIONID` cookie; the engine returns the id to
//!   use next in the `sessionId` field of every reply
//! - Errors: HTTP 200 with a non-zero `status` and a `message`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::COOKIE;
use serde::Deserialize;
use tracing::debug;

use super::base::{ConversationEngine, EngineError, EngineOutput, EngineReply, EngineResult};

/// Session cookie understood by the engine
const SESSION_COOKIE: &str = "JSESSIONID";

/// View selecting the JSON response format
const TIE_API_VIEW: &str = "tieapi";

/// Raw engine reply as sent over the wire.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TieResponse {
    #[serde(default)]
    status: i64,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    output: Option<EngineOutput>,
    #[serde(default)]
    session_id: Option<String>,
}

/// Teneo engine client
///
/// # Example
///
/// ```rust,ignore
/// use callbridge::core::engine::{ConversationEngine, TeneoEngine};
///
/// let engine = TeneoEngine::new("https://example.teneo.ai/my-bot/", None)?;
/// let reply = engine.send_input(None, "").await?;
/// println!("{} (session {})", reply.output.text, reply.session_id);
/// ```
pub struct TeneoEngine {
    client: reqwest::Client,
    engine_url: String,
}

impl TeneoEngine {
    /// Create a new client for the engine at `engine_url`.
    ///
    /// `timeout` bounds each request; `None` waits for the engine indefinitely.
    pub fn new(engine_url: impl Into<String>, timeout: Option<Duration>) -> EngineResult<Self> {
        let engine_url = engine_url.into();
        if engine_url.trim().is_empty() {
            return Err(EngineError::InvalidConfiguration(
                "engine URL must not be empty".to_string(),
            ));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| EngineError::InvalidConfiguration(e.to_string()))?;

        Ok(Self { client, engine_url })
    }

    /// Engine URL this client posts to
    pub fn engine_url(&self) -> &str {
        &self.engine_url
    }

    fn build_request(&self, session_id: Option<&str>, text: &str) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .post(&self.engine_url)
            .form(&[
                ("userinput", text),
                ("viewtype", TIE_API_VIEW),
                ("viewname", TIE_API_VIEW),
            ]);

        if let Some(session_id) = session_id.filter(|id| !id.is_empty()) {
            request = request.header(COOKIE, format!("{SESSION_COOKIE}={session_id}"));
        }

        request
    }
}

#[async_trait]
impl ConversationEngine for TeneoEngine {
    async fn send_input(&self, session_id: Option<&str>, text: &str) -> EngineResult<EngineReply> {
        debug!(
            url = %self.engine_url,
            has_session = session_id.is_some_and(|id| !id.is_empty()),
            "Sending input to Teneo engine"
        );

        let response = self
            .build_request(session_id, text)
            .send()
            .await
            .map_err(|e| EngineError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::Http {
                status: status.as_u16(),
            });
        }

        let body: TieResponse = response
            .json()
            .await
            .map_err(|e| EngineError::InvalidResponse(e.to_string()))?;

        if body.status != 0 {
            return Err(EngineError::Engine {
                status: body.status,
                message: body.message.unwrap_or_default(),
            });
        }

        let session_id = body
            .session_id
            .ok_or_else(|| EngineError::InvalidResponse("missing sessionId".to_string()))?;

        Ok(EngineReply {
            session_id,
            output: body.output.unwrap_or_default(),
        })
    }

    fn name(&self) -> &str {
        "teneo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn reply_body(session_id: &str, text: &str, parameters: serde_json::Value) -> serde_json::Value {
        json!({
            "status": 0,
            "input": {"text": "", "parameters": {}},
            "output": {
                "text": text,
                "emotion": "",
                "link": "",
                "parameters": parameters
            },
            "sessionId": session_id
        })
    }

    #[test]
    fn test_new_rejects_empty_url() {
        let result = TeneoEngine::new("  ", None);
        assert!(matches!(result, Err(EngineError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_engine_url() {
        let engine = TeneoEngine::new("https://engine.example.com/bot/", None).unwrap();
        assert_eq!(engine.engine_url(), "https://engine.example.com/bot/");
        assert_eq!(engine.name(), "teneo");
    }

    #[tokio::test]
    async fn test_send_input_without_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tieapi"))
            .and(body_string_contains("viewtype=tieapi"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply_body(
                "S1",
                "Hello",
                json!({}),
            )))
            .expect(1)
            .mount(&server)
            .await;

        let engine = TeneoEngine::new(format!("{}/tieapi", server.uri()), None).unwrap();
        let reply = engine.send_input(None, "").await.unwrap();

        assert_eq!(reply.session_id, "S1");
        assert_eq!(reply.output.text, "Hello");
        assert!(reply.output.parameters.is_empty());

        let requests: Vec<Request> = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("cookie").is_none());
    }

    #[tokio::test]
    async fn test_send_input_with_session_cookie() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("cookie", "JSESSIONID=S1"))
            .and(body_string_contains("userinput=book+a+flight"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply_body(
                "S1",
                "Where to?",
                json!({"twilio_customVocabulary": "Paris London"}),
            )))
            .expect(1)
            .mount(&server)
            .await;

        let engine = TeneoEngine::new(server.uri(), None).unwrap();
        let reply = engine.send_input(Some("S1"), "book a flight").await.unwrap();

        assert_eq!(reply.output.text, "Where to?");
        assert_eq!(reply.output.custom_vocabulary(), Some("Paris London"));
    }

    #[tokio::test]
    async fn test_empty_session_id_sends_no_cookie() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply_body(
                "S2",
                "Hi",
                json!({}),
            )))
            .mount(&server)
            .await;

        let engine = TeneoEngine::new(server.uri(), None).unwrap();
        engine.send_input(Some(""), "hi").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("cookie").is_none());
    }

    #[tokio::test]
    async fn test_null_output_fields_are_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": 0,
                "output": {"text": "Hi", "parameters": null},
                "sessionId": "S1"
            })))
            .mount(&server)
            .await;

        let engine = TeneoEngine::new(server.uri(), None).unwrap();
        let reply = engine.send_input(None, "").await.unwrap();

        assert_eq!(reply.session_id, "S1");
        assert_eq!(reply.output.text, "Hi");
        assert!(reply.output.parameters.is_empty());
        assert!(!reply.output.ends_call());
    }

    #[tokio::test]
    async fn test_null_reply_text_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": 0,
                "output": {"text": null, "parameters": {"twilio_endCall": "true"}},
                "sessionId": "S1"
            })))
            .mount(&server)
            .await;

        let engine = TeneoEngine::new(server.uri(), None).unwrap();
        let reply = engine.send_input(Some("S1"), "bye").await.unwrap();

        assert!(reply.output.text.is_empty());
        assert!(reply.output.ends_call());
    }

    #[tokio::test]
    async fn test_engine_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": -1, "message": "Solution not deployed"})),
            )
            .mount(&server)
            .await;

        let engine = TeneoEngine::new(server.uri(), None).unwrap();
        let err = engine.send_input(None, "").await.unwrap_err();

        match err {
            EngineError::Engine { status, message } => {
                assert_eq!(status, -1);
                assert_eq!(message, "Solution not deployed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let engine = TeneoEngine::new(server.uri(), None).unwrap();
        let err = engine.send_input(None, "").await.unwrap_err();

        assert!(matches!(err, EngineError::Http { status: 503 }));
    }

    #[tokio::test]
    async fn test_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let engine = TeneoEngine::new(server.uri(), None).unwrap();
        let err = engine.send_input(None, "").await.unwrap_err();

        assert!(matches!(err, EngineError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_missing_session_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": 0, "output": {"text": "Hi"}})),
            )
            .mount(&server)
            .await;

        let engine = TeneoEngine::new(server.uri(), None).unwrap();
        let err = engine.send_input(None, "").await.unwrap_err();

        assert!(matches!(err, EngineError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_timeout_is_reported_as_request_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(reply_body("S1", "late", json!({})))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let engine = TeneoEngine::new(server.uri(), Some(Duration::from_millis(50))).unwrap();
        let err = engine.send_input(None, "").await.unwrap_err();

        assert!(matches!(err, EngineError::Request(_)));
    }
}
