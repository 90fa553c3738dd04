pub mod engine;
pub mod session;
pub mod turn;
pub mod twiml;

// Re-export commonly used types for convenience
pub use engine::{
    ConversationEngine, EngineError, EngineOutput, EngineReply, EngineResult, TeneoEngine,
};
pub use session::{InMemorySessionStore, SessionStore, SessionStoreError, SessionStoreResult};
pub use turn::{CallStatus, TurnError, TurnEvent, TurnHandler, TurnKind, TurnSettings};
pub use twiml::{SpeechGather, TWIML_CONTENT_TYPE, TwimlError, VoiceResponse};
