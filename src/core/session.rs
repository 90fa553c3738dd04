//! Call-to-conversation session registry.
//!
//! Every Twilio webhook is an independent HTTP request. The registry is what
//! links them into one conversation: it maps the `CallSid` of a call to the
//! session identifier the conversational engine handed out on the previous turn.

use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;

/// Errors raised by a session store backend.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// The backing store could not be reached or rejected the operation
    #[error("Session store backend error: {0}")]
    Backend(String),
}

/// Result type for session store operations.
pub type SessionStoreResult<T> = Result<T, SessionStoreError>;

/// Mapping from call identifier to engine session identifier.
///
/// Implementations must treat an unknown call id as "no session yet" rather
/// than an error, and `set` must replace any previous value for the call.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Session identifier recorded for `call_id`, if any.
    async fn get(&self, call_id: &str) -> SessionStoreResult<Option<String>>;

    /// Record `session_id` for `call_id`, overwriting any previous value.
    async fn set(&self, call_id: &str, session_id: &str) -> SessionStoreResult<()>;
}

/// Process-local session store.
///
/// Entries live until the process exits. Concurrent turns for the same call
/// are last-write-wins.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, String>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of calls with a recorded session
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, call_id: &str) -> SessionStoreResult<Option<String>> {
        Ok(self.sessions.get(call_id).map(|entry| entry.value().clone()))
    }

    async fn set(&self, call_id: &str, session_id: &str) -> SessionStoreResult<()> {
        self.sessions
            .insert(call_id.to_string(), session_id.to_string());
        Ok(())
    }
}
