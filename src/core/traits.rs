//! Seams between request routing and the outside world.
//!
//! The HTTP layer and the worker only talk to Slack, the extractors and the
//! LLM through these traits, so tests can swap in recording fakes.

use async_trait::async_trait;
use openai_api_rs::v1::chat_completion::ChatCompletionMessage;
use serde_json::Value;

use super::models::ExtractedContent;
use crate::errors::SlackError;
use crate::extract::ExtractError;

#[async_trait]
pub trait ChatPoster: Send + Sync {
    /// Post plain text, optionally as a thread reply.
    async fn post_text(
        &self,
        channel_id: &str,
        thread_ts: Option<&str>,
        text: &str,
    ) -> Result<(), SlackError>;

    /// Post Block Kit blocks with a plain-text fallback.
    async fn post_blocks(
        &self,
        channel_id: &str,
        thread_ts: Option<&str>,
        text_fallback: &str,
        blocks: &Value,
    ) -> Result<(), SlackError>;

    /// Replace an existing message's text and blocks.
    async fn update_message(
        &self,
        channel_id: &str,
        ts: &str,
        text: &str,
        blocks: Option<&Value>,
    ) -> Result<(), SlackError>;
}

#[async_trait]
pub trait ContentExtractor: Send + Sync {
    async fn extract_url(&self, url: &str) -> Result<ExtractedContent, ExtractError>;

    async fn extract_video(&self, url: &str) -> Result<ExtractedContent, ExtractError>;

    async fn extract_pdf(
        &self,
        file_url: &str,
        file_name: &str,
    ) -> Result<ExtractedContent, ExtractError>;
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run one non-streaming completion and return the model's text.
    async fn generate(&self, prompt: Vec<ChatCompletionMessage>) -> Result<String, SlackError>;
}
