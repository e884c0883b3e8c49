use tracing::{error, info, warn};

use crate::core::models::{ExtractedContent, PendingKey, SourceKind};
use crate::core::state::AppState;
use crate::extract::{ExtractError, classifier};
use crate::slack::blocks::{
    ACK_PDF, ACK_URL, PDF_FAILED, URL_FAILED, build_voice_picker_blocks, picker_prompt,
    video_error_message,
};

pub async fn ingest_url(state: &AppState, key: &PendingKey, url: &str) {
    post_in_thread(state, key, ACK_URL).await;

    let (kind, result) = if classifier::is_video_url(url) {
        info!(url, "Analyzing video link");
        (SourceKind::Video, state.extractor.extract_video(url).await)
    } else {
        info!(url, "Extracting web page");
        (SourceKind::Url, state.extractor.extract_url(url).await)
    };

    match result {
        Ok(content) => offer_voice_choice(state, key, content).await,
        Err(e) => {
            warn!(url, "Extraction failed: {}", e);
            post_in_thread(state, key, &failure_message(kind, &e)).await;
        }
    }
}

pub async fn ingest_pdf(state: &AppState, key: &PendingKey, file_url: &str, file_name: &str) {
    post_in_thread(state, key, ACK_PDF).await;

    match state.extractor.extract_pdf(file_url, file_name).await {
        Ok(content) => offer_voice_choice(state, key, content).await,
        Err(e) => {
            warn!(file_name, "PDF extraction failed: {}", e);
            post_in_thread(state, key, &failure_message(SourceKind::Pdf, &e)).await;
        }
    }
}

/// Store the content under its thread, then ask which voice to write in.
async fn offer_voice_choice(state: &AppState, key: &PendingKey, content: ExtractedContent) {
    let label = content.source_label().to_string();
    info!(
        source = %label,
        chars = content.text().chars().count(),
        "Content ready, awaiting voice selection"
    );
    state.pending.put(key.clone(), content);

    let blocks = build_voice_picker_blocks(&label);
    if let Err(e) = state
        .slack
        .post_blocks(
            &key.channel_id,
            Some(&key.thread_ts),
            &picker_prompt(&label),
            &blocks,
        )
        .await
    {
        error!("Failed to post voice picker: {}", e);
    }
}

/// The user-facing text for a failed extraction.
#[must_use]
pub fn failure_message(kind: SourceKind, err: &ExtractError) -> String {
    match kind {
        SourceKind::Video => video_error_message(&err.to_string()),
        SourceKind::Pdf => PDF_FAILED.to_string(),
        SourceKind::Url => URL_FAILED.to_string(),
    }
}

pub(super) async fn post_in_thread(state: &AppState, key: &PendingKey, text: &str) {
    if let Err(e) = state
        .slack
        .post_text(&key.channel_id, Some(&key.thread_ts), text)
        .await
    {
        error!("Failed to post to {}: {}", key, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_failures_carry_the_reason() {
        let msg = failure_message(
            SourceKind::Video,
            &ExtractError::Config("Video analysis is not configured".into()),
        );
        assert!(msg.contains("Video analysis is not configured"));
    }

    #[test]
    fn page_and_pdf_failures_use_fixed_text() {
        assert_eq!(
            failure_message(SourceKind::Url, &ExtractError::Status(403)),
            URL_FAILED
        );
        assert_eq!(
            failure_message(SourceKind::Pdf, &ExtractError::TooShort { chars: 12 }),
            PDF_FAILED
        );
    }
}
