//! HTTP request handlers
//!
//! - `api` - Health check endpoint
//! - `voice` - Twilio voice webhook driving each call turn

pub mod api;
pub mod voice;

pub use voice::voice_webhook;
