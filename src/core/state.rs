use std::sync::Arc;

use super::config::AppConfig;
use super::dedup::EventDedup;
use super::pending::PendingStore;
use super::traits::{ChatPoster, ContentExtractor, TextGenerator};
use crate::ai::LlmClient;
use crate::errors::SlackError;
use crate::extract::LiveExtractor;
use crate::slack::SlackClient;

/// Everything a request handler or background job needs, shared by `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pending: Arc<PendingStore>,
    pub dedup: Arc<EventDedup>,
    pub slack: Arc<dyn ChatPoster>,
    pub extractor: Arc<dyn ContentExtractor>,
    pub generator: Arc<dyn TextGenerator>,
}

impl AppState {
    #[must_use]
    pub fn new(
        slack: Arc<dyn ChatPoster>,
        extractor: Arc<dyn ContentExtractor>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            pending: Arc::new(PendingStore::default()),
            dedup: Arc::new(EventDedup::default()),
            slack,
            extractor,
            generator,
        }
    }

    /// Wire the production Slack, extraction and OpenAI clients.
    ///
    /// # Errors
    ///
    /// Returns an error if any HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, SlackError> {
        let slack = SlackClient::new(config.slack_bot_token.clone());
        let extractor = LiveExtractor::new(config)
            .map_err(|e| SlackError::ConfigError(format!("extractor setup failed: {e}")))?;
        let generator = LlmClient::new(
            config.openai_api_key.clone(),
            config.openai_org_id.clone(),
            config.openai_model.clone(),
            config.llm_timeout_secs,
        )?;

        Ok(Self::new(
            Arc::new(slack),
            Arc::new(extractor),
            Arc::new(generator),
        ))
    }
}
