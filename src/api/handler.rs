//! HTTP surface - thin router that delegates to specialized handlers.
//!
//! - `GET /`, `GET /health` - liveness
//! - `POST /slack/events` - Events API (delegated to `event_handler`)
//! - `POST /slack/interactions` - button clicks (delegated to `interactive_handler`)
//!
//! Every accepted delivery is answered immediately; the work it implies runs
//! on spawned tasks.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use super::{event_handler, helpers, interactive_handler, parsing};
use crate::core::state::AppState;
use crate::worker;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/slack/events", post(slack_events))
        .route("/slack/interactions", post(slack_interactions))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(helpers::health_body())
}

async fn slack_events(State(state): State<AppState>, body: String) -> (StatusCode, Json<Value>) {
    let json_body: Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(e) => {
            error!("Failed to parse event body: {}", e);
            return helpers::err_response(StatusCode::BAD_REQUEST, "Invalid JSON body");
        }
    };

    let (response, jobs) = event_handler::route_event(&state, &json_body);
    worker::spawn_jobs(&state, jobs);

    (StatusCode::OK, Json(response))
}

async fn slack_interactions(
    State(state): State<AppState>,
    body: String,
) -> (StatusCode, Json<Value>) {
    if !parsing::is_interactive_body(&body) {
        error!("Interaction body has no payload field");
        return helpers::err_response(StatusCode::BAD_REQUEST, "Missing payload");
    }

    let payload = match parsing::parse_interactive_payload(&body) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to parse interactive payload: {}", e);
            return helpers::err_response(StatusCode::BAD_REQUEST, "Invalid payload");
        }
    };

    let jobs = interactive_handler::route_interaction(&state, &payload);
    if !jobs.is_empty() {
        info!(jobs = jobs.len(), "Routed interaction");
    }
    worker::spawn_jobs(&state, jobs);

    (StatusCode::OK, Json(helpers::ok_status()))
}
