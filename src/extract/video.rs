//! Video analysis through Gemini, which can read YouTube links directly.

use std::time::Duration;

use serde_json::{Value, json};
use tracing::{error, info};

use super::ExtractError;
use super::classifier;
use crate::core::models::{ExtractedContent, SourceKind};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub const VIDEO_ANALYSIS_PROMPT: &str = "Analyze this video and produce a structured summary \
that a ghostwriter could turn into a LinkedIn post. Use these sections:\n\
1. Main topic: one or two sentences on what the video is about.\n\
2. Key points: the most important arguments, findings or steps, as bullets.\n\
3. Notable quotes: memorable lines said in the video, verbatim where possible.\n\
4. Audience: who the video is for.\n\
5. Takeaways: what a viewer should do or remember afterwards.\n\
6. Tone: how the speaker comes across.\n\
Only describe what is actually in the video.";

pub struct VideoExtractor {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl VideoExtractor {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        api_key: Option<String>,
        model: String,
        timeout_secs: u64,
    ) -> Result<Self, ExtractError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ExtractError::Fetch(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key,
            model,
        })
    }

    /// Summarize a video the classifier already recognized.
    ///
    /// # Errors
    ///
    /// [`ExtractError::Config`] without an API key, [`ExtractError::Remote`]
    /// for any failed call, [`ExtractError::Empty`] for a blank answer.
    pub async fn extract(&self, url: &str) -> Result<ExtractedContent, ExtractError> {
        let Some(api_key) = self.api_key.as_deref() else {
            error!(url = %url, "Video analysis requested without GEMINI_API_KEY");
            return Err(ExtractError::Config(
                "Video analysis is not configured (GEMINI_API_KEY is not set)".to_string(),
            ));
        };

        let canonical = classifier::normalize(url);
        let text = self
            .generate(api_key, &canonical)
            .await
            .inspect_err(|e| error!(url = %canonical, error = %e, "Video analysis failed"))?;

        let content = format_video_content(&canonical, &text)?;
        info!(url = %canonical, chars = content.chars().count(), "Extracted video analysis");
        Ok(ExtractedContent::new(content, canonical, SourceKind::Video))
    }

    async fn generate(&self, api_key: &str, video_url: &str) -> Result<String, ExtractError> {
        let endpoint = format!("{GEMINI_API_BASE}/{}:generateContent", self.model);
        let response = self
            .client
            .post(&endpoint)
            .header("x-goog-api-key", api_key)
            .json(&build_video_request(video_url))
            .send()
            .await
            .map_err(|e| ExtractError::Remote(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(ExtractError::Remote(format!(
                "Gemini API error (status {status}): {body}"
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ExtractError::Remote(format!("Failed to parse Gemini response: {e}")))?;

        Ok(response_text(&body))
    }
}

#[must_use]
pub fn build_video_request(video_url: &str) -> Value {
    json!({
        "contents": [{
            "parts": [
                { "file_data": { "file_uri": video_url } },
                { "text": VIDEO_ANALYSIS_PROMPT }
            ]
        }]
    })
}

/// Concatenate the text parts of the first candidate.
#[must_use]
pub fn response_text(body: &Value) -> String {
    body.get("candidates")
        .and_then(Value::as_array)
        .and_then(|c| c.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

/// Prefix the analysis with a header naming the video.
///
/// # Errors
///
/// Returns [`ExtractError::Empty`] if the model produced no text.
pub fn format_video_content(canonical_url: &str, analysis: &str) -> Result<String, ExtractError> {
    let analysis = analysis.trim();
    if analysis.is_empty() {
        return Err(ExtractError::Empty);
    }
    Ok(format!("# Video Analysis\nSource: {canonical_url}\n\n{analysis}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_is_a_configuration_error() {
        let extractor = VideoExtractor::new(None, "gemini-2.0-flash".to_string(), 5).unwrap();
        let err = extractor
            .extract("https://youtu.be/dQw4w9WgXcQ")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Config(_)));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn request_carries_url_and_instruction() {
        let req = build_video_request("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        let parts = req["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(
            parts[0]["file_data"]["file_uri"],
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
        assert!(parts[1]["text"].as_str().unwrap().contains("Notable quotes"));
    }

    #[test]
    fn response_text_joins_parts() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Topic: Rust. " }, { "text": "Tone: upbeat." }] }
            }]
        });
        assert_eq!(response_text(&body), "Topic: Rust. Tone: upbeat.");
        assert_eq!(response_text(&json!({ "candidates": [] })), "");
    }

    #[test]
    fn empty_analysis_is_rejected_and_text_is_prefixed() {
        assert_eq!(
            format_video_content("https://www.youtube.com/watch?v=x", "  "),
            Err(ExtractError::Empty)
        );
        let content = format_video_content("https://www.youtube.com/watch?v=x", "Topic").unwrap();
        assert!(content.starts_with("# Video Analysis\nSource: https://www.youtube.com/watch?v=x"));
        assert!(content.ends_with("Topic"));
    }
}
