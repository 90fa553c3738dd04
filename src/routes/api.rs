use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::handlers::{api, voice};
use crate::state::AppState;
use std::sync::Arc;

/// Create the router serving the Twilio webhook and the health check
///
/// Twilio posts to `/`; a `GET` on the same path is the liveness probe.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(api::health_check).post(voice::voice_webhook))
        .layer(TraceLayer::new_for_http())
}
