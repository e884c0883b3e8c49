//! Handler for Slack interactive components.
//!
//! Only `block_actions` from the voice picker buttons are acted on. The
//! pending content is claimed here, before the ack, so a second click on the
//! same picker finds nothing and gets the expiry notice instead of a second
//! set of drafts.

use serde_json::Value;
use tracing::{debug, info};

use super::parsing::{v_array, v_first_str, v_str};
use crate::core::models::{PendingKey, VOICE_ACTION_PREFIX, VoiceProfile};
use crate::core::state::AppState;
use crate::worker::Job;

/// Which voice a picker action asked for. Unknown keys fall back to the
/// default voice.
#[must_use]
pub fn voice_for_action(action_id: &str, value: Option<&str>) -> VoiceProfile {
    action_id
        .strip_prefix(VOICE_ACTION_PREFIX)
        .and_then(VoiceProfile::from_key)
        .or_else(|| value.and_then(VoiceProfile::from_key))
        .unwrap_or_default()
}

/// Route one interactivity payload into at most one job.
pub fn route_interaction(state: &AppState, payload: &Value) -> Vec<Job> {
    let kind = v_str(payload, &["type"]).unwrap_or("");
    if kind != "block_actions" {
        debug!(kind, "Ignoring interactive payload");
        return Vec::new();
    }

    let Some(action) = v_array(payload, &["actions"]).and_then(|a| a.first()) else {
        return Vec::new();
    };
    let action_id = v_str(action, &["action_id"]).unwrap_or("");
    if !action_id.starts_with(VOICE_ACTION_PREFIX) {
        debug!(action_id, "Ignoring unrelated action");
        return Vec::new();
    }
    let voice = voice_for_action(action_id, v_str(action, &["value"]));

    let Some(channel) = v_first_str(payload, &[&["channel", "id"], &["container", "channel_id"]])
    else {
        return Vec::new();
    };
    let Some(thread_ts) = v_first_str(
        payload,
        &[
            &["message", "thread_ts"],
            &["container", "thread_ts"],
            &["message", "ts"],
            &["container", "message_ts"],
        ],
    ) else {
        return Vec::new();
    };
    let picker_ts = v_first_str(payload, &[&["message", "ts"], &["container", "message_ts"]])
        .map(str::to_string);
    let key = PendingKey::new(channel, thread_ts);

    info!(voice = voice.key(), key = %key, "Voice selected");

    match state.pending.take(&key) {
        Some(entry) => vec![Job::Draft {
            key,
            voice,
            picker_ts,
            content: entry.content,
        }],
        None => vec![Job::Expired { key }],
    }
}
