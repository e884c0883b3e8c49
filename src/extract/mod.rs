//! Content extraction: web pages, Slack-hosted PDFs and videos, reduced to
//! plain text for prompting.

pub mod classifier;
pub mod pdf;
pub mod video;
pub mod web;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::config::AppConfig;
use crate::core::models::ExtractedContent;
use crate::core::traits::ContentExtractor;

/// Extracted text must be longer than this (in characters) to be usable.
pub const MIN_CONTENT_CHARS: usize = 100;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("request failed: {0}")]
    Fetch(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("could not parse content: {0}")]
    Parse(String),

    #[error("document has no body")]
    NoBody,

    #[error("only {chars} characters of content")]
    TooShort { chars: usize },

    #[error("{0}")]
    Config(String),

    #[error("{0}")]
    Remote(String),

    #[error("no content extracted")]
    Empty,
}

/// Collapse every whitespace run (including newlines) into one space.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Reject near-empty results.
///
/// # Errors
///
/// Returns [`ExtractError::TooShort`] when `text` has `MIN_CONTENT_CHARS`
/// characters or fewer.
pub fn ensure_min_length(text: String) -> Result<String, ExtractError> {
    let chars = text.chars().count();
    if chars > MIN_CONTENT_CHARS {
        Ok(text)
    } else {
        Err(ExtractError::TooShort { chars })
    }
}

/// Production extractor wired to the real network clients.
pub struct LiveExtractor {
    web: web::WebExtractor,
    pdf: pdf::PdfExtractor,
    video: video::VideoExtractor,
}

impl LiveExtractor {
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, ExtractError> {
        Ok(Self {
            web: web::WebExtractor::new()?,
            pdf: pdf::PdfExtractor::new(config.slack_bot_token.clone())?,
            video: video::VideoExtractor::new(
                config.gemini_api_key.clone(),
                config.gemini_model.clone(),
                config.llm_timeout_secs,
            )?,
        })
    }
}

#[async_trait]
impl ContentExtractor for LiveExtractor {
    async fn extract_url(&self, url: &str) -> Result<ExtractedContent, ExtractError> {
        self.web.extract(url).await
    }

    async fn extract_video(&self, url: &str) -> Result<ExtractedContent, ExtractError> {
        self.video.extract(url).await
    }

    async fn extract_pdf(
        &self,
        file_url: &str,
        file_name: &str,
    ) -> Result<ExtractedContent, ExtractError> {
        self.pdf.extract(file_url, file_name).await
    }
}
