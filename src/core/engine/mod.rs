mod base;
pub mod teneo;

pub use base::{
    ConversationEngine, EngineError, EngineOutput, EngineReply, EngineResult,
    PARAM_CUSTOM_VOCABULARY, PARAM_END_CALL,
};
pub use teneo::TeneoEngine;
