#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use openai_api_rs::v1::chat_completion::ChatCompletionMessage;
use serde_json::Value;
use vertovoice::SlackError;
use vertovoice::core::models::{ExtractedContent, SourceKind};
use vertovoice::core::state::AppState;
use vertovoice::core::traits::{ChatPoster, ContentExtractor, TextGenerator};
use vertovoice::extract::ExtractError;

#[derive(Debug, Clone, PartialEq)]
pub enum Posted {
    Text {
        channel: String,
        thread_ts: Option<String>,
        text: String,
    },
    Blocks {
        channel: String,
        thread_ts: Option<String>,
        blocks: Value,
    },
    Update {
        channel: String,
        ts: String,
        text: String,
    },
}

#[derive(Default)]
pub struct RecordingSlack {
    pub posts: Mutex<Vec<Posted>>,
}

impl RecordingSlack {
    pub fn posts(&self) -> Vec<Posted> {
        self.posts.lock().unwrap().clone()
    }

    pub fn blocks_posts(&self) -> usize {
        self.posts()
            .iter()
            .filter(|p| matches!(p, Posted::Blocks { .. }))
            .count()
    }

    pub fn texts(&self) -> Vec<String> {
        self.posts()
            .into_iter()
            .filter_map(|p| match p {
                Posted::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl ChatPoster for RecordingSlack {
    async fn post_text(
        &self,
        channel_id: &str,
        thread_ts: Option<&str>,
        text: &str,
    ) -> Result<(), SlackError> {
        self.posts.lock().unwrap().push(Posted::Text {
            channel: channel_id.into(),
            thread_ts: thread_ts.map(str::to_string),
            text: text.into(),
        });
        Ok(())
    }

    async fn post_blocks(
        &self,
        channel_id: &str,
        thread_ts: Option<&str>,
        _text_fallback: &str,
        blocks: &Value,
    ) -> Result<(), SlackError> {
        self.posts.lock().unwrap().push(Posted::Blocks {
            channel: channel_id.into(),
            thread_ts: thread_ts.map(str::to_string),
            blocks: blocks.clone(),
        });
        Ok(())
    }

    async fn update_message(
        &self,
        channel_id: &str,
        ts: &str,
        text: &str,
        _blocks: Option<&Value>,
    ) -> Result<(), SlackError> {
        self.posts.lock().unwrap().push(Posted::Update {
            channel: channel_id.into(),
            ts: ts.into(),
            text: text.into(),
        });
        Ok(())
    }
}

pub const ARTICLE_TEXT: &str = "# A Post\n\nThis article explains how small teams can ship reliable software by keeping feedback loops short and tooling simple.";

/// Extractor returning canned content, or a canned error when `fail` is set.
#[derive(Default)]
pub struct StubExtractor {
    pub calls: Mutex<Vec<String>>,
    pub fail: Option<ExtractError>,
}

impl StubExtractor {
    pub fn failing(err: ExtractError) -> Self {
        Self {
            calls: Mutex::default(),
            fail: Some(err),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, call: String, label: &str, kind: SourceKind) -> Result<ExtractedContent, ExtractError> {
        self.calls.lock().unwrap().push(call);
        match &self.fail {
            Some(err) => Err(err.clone()),
            None => Ok(ExtractedContent::new(ARTICLE_TEXT.to_string(), label, kind)),
        }
    }
}

#[async_trait]
impl ContentExtractor for StubExtractor {
    async fn extract_url(&self, url: &str) -> Result<ExtractedContent, ExtractError> {
        self.answer(format!("url:{url}"), url, SourceKind::Url)
    }

    async fn extract_video(&self, url: &str) -> Result<ExtractedContent, ExtractError> {
        self.answer(format!("video:{url}"), url, SourceKind::Video)
    }

    async fn extract_pdf(
        &self,
        file_url: &str,
        file_name: &str,
    ) -> Result<ExtractedContent, ExtractError> {
        self.answer(format!("pdf:{file_url}"), file_name, SourceKind::Pdf)
    }
}

/// Generator that records prompts and replies with fixed drafts.
#[derive(Default)]
pub struct StubGenerator {
    pub prompts: Mutex<Vec<Vec<ChatCompletionMessage>>>,
}

impl StubGenerator {
    pub fn prompts(&self) -> Vec<Vec<ChatCompletionMessage>> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: Vec<ChatCompletionMessage>) -> Result<String, SlackError> {
        self.prompts.lock().unwrap().push(prompt);
        Ok("## Version A\nShip small.\n\n## Version B\nHow small do you ship?".to_string())
    }
}

pub struct Harness {
    pub state: AppState,
    pub slack: Arc<RecordingSlack>,
    pub extractor: Arc<StubExtractor>,
    pub generator: Arc<StubGenerator>,
}

pub fn harness() -> Harness {
    harness_with(StubExtractor::default())
}

pub fn harness_with(extractor: StubExtractor) -> Harness {
    let slack = Arc::new(RecordingSlack::default());
    let extractor = Arc::new(extractor);
    let generator = Arc::new(StubGenerator::default());
    let state = AppState::new(slack.clone(), extractor.clone(), generator.clone());
    Harness {
        state,
        slack,
        extractor,
        generator,
    }
}
