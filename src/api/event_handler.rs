//! Handler for Slack Events API deliveries.
//!
//! Routing here is synchronous: it decides which [`Job`]s a delivery produces
//! and returns the response body. The caller spawns the jobs.
//!
//! - `url_verification` - echo the challenge
//! - `message` - shared links in the text, PDF uploads in `files`
//! - `link_shared` - unfurl notifications for registered domains

use serde_json::Value;
use tracing::{debug, info, warn};

use super::helpers::{challenge_response, ok_status};
use super::parsing::{v_array, v_first_str, v_str};
use crate::core::models::PendingKey;
use crate::core::state::AppState;
use crate::utils::links::{normalize_and_dedupe_links, shareable_links};
use crate::utils::mime::is_pdf_file;
use crate::worker::Job;

// ============================================================================
// Message Events
// ============================================================================

/// Jobs for a `message` event: one per PDF attachment, one per shared link.
fn route_message(event: &Value) -> Vec<Job> {
    if v_str(event, &["bot_id"]).is_some() {
        debug!("Ignoring bot message");
        return Vec::new();
    }
    if let Some(subtype) = v_str(event, &["subtype"])
        && subtype != "file_share"
    {
        debug!(subtype, "Ignoring message subtype");
        return Vec::new();
    }

    let Some(channel) = v_str(event, &["channel"]) else {
        return Vec::new();
    };
    let Some(thread_ts) = v_first_str(event, &[&["thread_ts"], &["ts"]]) else {
        return Vec::new();
    };
    let key = PendingKey::new(channel, thread_ts);

    let mut jobs = Vec::new();

    for file in v_array(event, &["files"]).into_iter().flatten() {
        let name = v_str(file, &["name"]);
        if !is_pdf_file(
            v_str(file, &["filetype"]),
            v_str(file, &["mimetype"]),
            name,
        ) {
            continue;
        }
        let Some(file_url) = v_first_str(file, &[&["url_private_download"], &["url_private"]])
        else {
            warn!(file = ?name, "PDF attachment has no download URL");
            continue;
        };
        jobs.push(Job::Pdf {
            key: key.clone(),
            file_url: file_url.to_string(),
            file_name: name.unwrap_or("document.pdf").to_string(),
        });
    }

    let text = v_str(event, &["text"]).unwrap_or("");
    for url in shareable_links(text) {
        jobs.push(Job::Url {
            key: key.clone(),
            url,
        });
    }

    jobs
}

// ============================================================================
// Link Shared Events
// ============================================================================

fn route_link_shared(event: &Value) -> Vec<Job> {
    let Some(channel) = v_str(event, &["channel"]) else {
        return Vec::new();
    };
    let Some(thread_ts) = v_first_str(event, &[&["thread_ts"], &["message_ts"]]) else {
        return Vec::new();
    };
    let key = PendingKey::new(channel, thread_ts);

    let raw = v_array(event, &["links"])
        .into_iter()
        .flatten()
        .filter_map(|link| v_str(link, &["url"]))
        .map(str::to_string);

    normalize_and_dedupe_links(raw)
        .into_iter()
        .map(|url| Job::Url {
            key: key.clone(),
            url,
        })
        .collect()
}

// ============================================================================
// Main Entry Point
// ============================================================================

/// Route one Events API delivery. Returns the response body and the jobs it
/// produced.
pub fn route_event(state: &AppState, body: &Value) -> (Value, Vec<Job>) {
    match v_str(body, &["type"]) {
        Some("url_verification") => {
            let challenge = v_str(body, &["challenge"]).unwrap_or("");
            info!("Answering url_verification");
            (challenge_response(challenge), Vec::new())
        }
        Some("event_callback") => (ok_status(), route_event_callback(state, body)),
        other => {
            debug!(kind = ?other, "Ignoring unknown delivery type");
            (ok_status(), Vec::new())
        }
    }
}

fn route_event_callback(state: &AppState, body: &Value) -> Vec<Job> {
    // Slack redelivers on slow acks; without an id there is nothing to dedupe on.
    if let Some(event_id) = v_str(body, &["event_id"])
        && !state.dedup.first_sighting(event_id)
    {
        info!(event_id, "Duplicate event, skipping");
        return Vec::new();
    }

    let Some(event) = body.get("event") else {
        return Vec::new();
    };

    let jobs = match v_str(event, &["type"]) {
        Some("message") => route_message(event),
        Some("link_shared") => route_link_shared(event),
        other => {
            debug!(kind = ?other, "Ignoring event type");
            Vec::new()
        }
    };

    if !jobs.is_empty() {
        info!(jobs = jobs.len(), "Routed event");
    }
    jobs
}
