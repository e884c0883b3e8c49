//! Common response bodies for the HTTP handlers.

use axum::Json;
use axum::http::StatusCode;
use serde_json::{Value, json};

pub const SERVICE_NAME: &str = "VertoVoice Bot";

// ============================================================================
// Response Builders
// ============================================================================

/// The generic acknowledgement Slack gets for every accepted delivery.
#[must_use]
pub fn ok_status() -> Value {
    json!({ "status": "ok" })
}

#[must_use]
pub fn challenge_response(challenge: &str) -> Value {
    json!({ "challenge": challenge })
}

#[must_use]
pub fn health_body() -> Value {
    json!({ "status": "ok", "service": SERVICE_NAME })
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message })))
}
