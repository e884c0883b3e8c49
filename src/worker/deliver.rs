use tracing::{info, warn};

use super::ingest::post_in_thread;
use crate::ai::generate_drafts;
use crate::core::models::{DraftResult, ExtractedContent, PendingKey, VoiceProfile};
use crate::core::state::AppState;
use crate::slack::blocks::{
    SELECTION_EXPIRED, build_voice_chosen_blocks, draft_error_message, drafts_message,
    voice_chosen_text,
};

pub async fn deliver_drafts(
    state: &AppState,
    key: &PendingKey,
    voice: VoiceProfile,
    picker_ts: Option<&str>,
    content: &ExtractedContent,
) {
    // Swap the buttons out so the picker can't be clicked twice.
    if let Some(ts) = picker_ts {
        let blocks = build_voice_chosen_blocks(voice);
        if let Err(e) = state
            .slack
            .update_message(&key.channel_id, ts, &voice_chosen_text(voice), Some(&blocks))
            .await
        {
            warn!("Could not update voice picker: {}", e);
        }
    }

    info!(voice = voice.key(), "Generating drafts");
    let result = generate_drafts(
        state.generator.as_ref(),
        content.text(),
        content.source_label(),
        voice,
    )
    .await;

    let text = match result {
        DraftResult::Success { drafts } => drafts_message(&drafts, content.source_label()),
        DraftResult::Failure { error } => draft_error_message(&error),
    };
    post_in_thread(state, key, &text).await;
}

pub async fn deliver_expired(state: &AppState, key: &PendingKey) {
    info!("No pending content for {}", key);
    post_in_thread(state, key, SELECTION_EXPIRED).await;
}
