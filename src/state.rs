use std::sync::Arc;

use tracing::info;

use crate::config::ServerConfig;
use crate::core::{
    ConversationEngine, EngineResult, InMemorySessionStore, SessionStore, TeneoEngine, TurnHandler,
};

/// Shared state for all request handlers
pub struct AppState {
    /// Call-to-session registry, owned here rather than as a global
    pub sessions: Arc<dyn SessionStore>,
    pub turn_handler: TurnHandler,
}

impl AppState {
    /// Create the application state with the Teneo engine and an in-memory session store
    pub async fn new(config: ServerConfig) -> EngineResult<Arc<Self>> {
        let engine = TeneoEngine::new(config.engine_url.clone(), config.engine_timeout())?;
        info!(
            engine = %engine.name(),
            engine_url = %engine.engine_url(),
            "Conversational engine client ready"
        );
        let sessions = Arc::new(InMemorySessionStore::new());

        Ok(Self::with_components(&config, sessions, Arc::new(engine)))
    }

    /// Create the application state from explicit components
    ///
    /// Used to plug in a different session backend or engine.
    pub fn with_components(
        config: &ServerConfig,
        sessions: Arc<dyn SessionStore>,
        engine: Arc<dyn ConversationEngine>,
    ) -> Arc<Self> {
        let turn_handler = TurnHandler::new(sessions.clone(), engine, config.turn_settings());

        Arc::new(Self {
            sessions,
            turn_handler,
        })
    }
}
