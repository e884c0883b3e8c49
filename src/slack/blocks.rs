//! Block Kit payloads and the user-facing message texts.

use serde_json::{Value, json};

use crate::core::models::VoiceProfile;

pub const VOICE_PICKER_BLOCK_ID: &str = "vertovoice_pick_voice";

pub const ACK_URL: &str = "📝 Got it! Extracting content from that link...";
pub const ACK_PDF: &str = "📝 Got the PDF! Extracting content...";
pub const URL_FAILED: &str =
    "❌ Couldn't extract content from that URL. Try sharing a different link or uploading a PDF.";
pub const PDF_FAILED: &str =
    "❌ Couldn't extract text from that PDF. Make sure it's not a scanned image.";
pub const SELECTION_EXPIRED: &str =
    "⌛ That request has expired or was already used. Please share the link or PDF again.";

#[must_use]
pub fn picker_prompt(source_label: &str) -> String {
    format!("Content extracted from {source_label}. Pick a voice for the drafts:")
}

/// Section text plus one button per voice profile.
#[must_use]
pub fn build_voice_picker_blocks(source_label: &str) -> Value {
    let buttons: Vec<Value> = VoiceProfile::ALL
        .iter()
        .map(|voice| {
            json!({
                "type": "button",
                "text": { "type": "plain_text", "text": voice.label() },
                "action_id": voice.action_id(),
                "value": voice.key(),
            })
        })
        .collect();

    json!([
        {
            "type": "section",
            "text": { "type": "mrkdwn", "text": picker_prompt(source_label) }
        },
        {
            "type": "actions",
            "block_id": VOICE_PICKER_BLOCK_ID,
            "elements": buttons
        }
    ])
}

/// Replacement for the picker once a voice was chosen, so it cannot be reused.
#[must_use]
pub fn build_voice_chosen_blocks(voice: VoiceProfile) -> Value {
    json!([
        {
            "type": "context",
            "elements": [
                { "type": "mrkdwn", "text": voice_chosen_text(voice) }
            ]
        }
    ])
}

#[must_use]
pub fn voice_chosen_text(voice: VoiceProfile) -> String {
    format!("✍️ Writing drafts in the *{}* voice...", voice.label())
}

#[must_use]
pub fn drafts_message(drafts: &str, source_label: &str) -> String {
    format!(
        "✨ *Here are 2 LinkedIn post drafts:*\n\n{drafts}\n\n---\n_Source: {source_label}_\n_Edit as needed, then post!_"
    )
}

#[must_use]
pub fn draft_error_message(error: &str) -> String {
    format!("❌ Error generating drafts: {error}")
}

#[must_use]
pub fn video_error_message(reason: &str) -> String {
    format!("❌ Couldn't analyze that video: {reason}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picker_has_one_button_per_voice() {
        let blocks = build_voice_picker_blocks("https://example.com/post");
        let buttons = blocks[1]["elements"].as_array().unwrap();

        assert_eq!(buttons.len(), VoiceProfile::ALL.len());
        assert_eq!(buttons[0]["action_id"], "select_zoran");
        assert_eq!(buttons[0]["value"], "zoran");
        assert!(
            blocks[0]["text"]["text"]
                .as_str()
                .unwrap()
                .contains("https://example.com/post")
        );
    }

    #[test]
    fn drafts_message_keeps_model_text_and_source() {
        let msg = drafts_message("## Version A\nx\n\n## Version B\ny", "deck.pdf");
        assert!(msg.contains("## Version A"));
        assert!(msg.contains("## Version B"));
        assert!(msg.contains("_Source: deck.pdf_"));
    }
}
