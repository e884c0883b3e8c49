//! Slack API client module
//!
//! Encapsulates the Slack Web API calls the bot makes: threaded replies,
//! Block Kit messages and in-place message updates.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use slack_morphism::hyper_tokio::{SlackClientHyperConnector, SlackHyperClient};
use slack_morphism::prelude::SlackApiChatPostMessageRequest;
use slack_morphism::{SlackApiToken, SlackApiTokenValue, SlackChannelId, SlackMessageContent, SlackTs};
use std::time::Duration;
use tracing::warn;

use crate::core::traits::ChatPoster;
use crate::errors::SlackError;

const SLACK_API_BASE: &str = "https://slack.com/api";

// Build the Slack client connector safely without panicking.
// If connector construction fails, store None and surface a SlackError at call sites.
static SLACK_CLIENT: std::sync::LazyLock<Option<SlackHyperClient>> =
    std::sync::LazyLock::new(|| match SlackClientHyperConnector::new() {
        Ok(connector) => Some(SlackHyperClient::new(connector)),
        Err(e) => {
            warn!("Failed to create Slack HTTP connector: {}", e);
            None
        }
    });

static HTTP_CLIENT: std::sync::LazyLock<Client> = std::sync::LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// Build the JSON payload for `chat.postMessage` with blocks.
#[must_use]
pub fn build_post_blocks_payload(
    channel: &str,
    thread_ts: Option<&str>,
    text_fallback: &str,
    blocks: &Value,
) -> Value {
    let mut payload = json!({
        "channel": channel,
        "text": text_fallback,
        "blocks": blocks,
    });

    if let Some(ts) = thread_ts {
        payload["thread_ts"] = Value::String(ts.to_string());
    }

    payload
}

/// Build the JSON payload for `chat.update`. Omitting `blocks` clears them.
#[must_use]
pub fn build_update_payload(channel: &str, ts: &str, text: &str, blocks: Option<&Value>) -> Value {
    json!({
        "channel": channel,
        "ts": ts,
        "text": text,
        "blocks": blocks.cloned().unwrap_or_else(|| json!([])),
    })
}

/// Slack API client
pub struct SlackClient {
    token: SlackApiToken,
}

impl SlackClient {
    #[must_use]
    pub fn new(token: String) -> Self {
        Self {
            token: SlackApiToken::new(SlackApiTokenValue::new(token)),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the Slack API call fails.
    pub async fn post_message(
        &self,
        channel_id: &str,
        thread_ts: Option<&str>,
        message: &str,
    ) -> Result<(), SlackError> {
        let session = SLACK_CLIENT
            .as_ref()
            .ok_or_else(|| {
                SlackError::GeneralError("Slack HTTP connector not initialized".to_string())
            })?
            .open_session(&self.token);

        let post_req = SlackApiChatPostMessageRequest::new(
            SlackChannelId(channel_id.to_string()),
            SlackMessageContent::new().with_text(message.to_string()),
        )
        .opt_thread_ts(thread_ts.map(|ts| SlackTs(ts.to_string())));

        session.chat_post_message(&post_req).await?;
        Ok(())
    }

    /// Post a message with Block Kit `blocks` to a channel or thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the Slack API request fails.
    pub async fn post_message_with_blocks(
        &self,
        channel_id: &str,
        thread_ts: Option<&str>,
        text_fallback: &str,
        blocks: &Value,
    ) -> Result<(), SlackError> {
        let payload = build_post_blocks_payload(channel_id, thread_ts, text_fallback, blocks);
        self.call_web_api("chat.postMessage", &payload).await
    }

    /// Update an existing message via Slack's `chat.update` API.
    ///
    /// # Errors
    ///
    /// Returns an error if the Slack API request or response parsing fails.
    pub async fn update_message(
        &self,
        channel_id: &str,
        ts: &str,
        text: &str,
        blocks: Option<&Value>,
    ) -> Result<(), SlackError> {
        let payload = build_update_payload(channel_id, ts, text, blocks);
        self.call_web_api("chat.update", &payload).await
    }

    async fn call_web_api(&self, method: &str, payload: &Value) -> Result<(), SlackError> {
        let resp = HTTP_CLIENT
            .post(format!("{SLACK_API_BASE}/{method}"))
            .bearer_auth(&self.token.token_value.0)
            .json(payload)
            .send()
            .await
            .map_err(|e| SlackError::HttpError(format!("{method} request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(SlackError::ApiError(format!(
                "{method} HTTP {}",
                resp.status()
            )));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| SlackError::GeneralError(format!("{method} JSON parse error: {e}")))?;

        check_ok(method, &body)
    }
}

/// Slack reports failures as `{"ok": false, "error": "..."}` with HTTP 200.
fn check_ok(method: &str, body: &Value) -> Result<(), SlackError> {
    if body.get("ok").and_then(Value::as_bool).unwrap_or(false) {
        return Ok(());
    }
    Err(SlackError::ApiError(format!(
        "{method} error: {}",
        body.get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
    )))
}

#[async_trait]
impl ChatPoster for SlackClient {
    async fn post_text(
        &self,
        channel_id: &str,
        thread_ts: Option<&str>,
        text: &str,
    ) -> Result<(), SlackError> {
        self.post_message(channel_id, thread_ts, text).await
    }

    async fn post_blocks(
        &self,
        channel_id: &str,
        thread_ts: Option<&str>,
        text_fallback: &str,
        blocks: &Value,
    ) -> Result<(), SlackError> {
        self.post_message_with_blocks(channel_id, thread_ts, text_fallback, blocks)
            .await
    }

    async fn update_message(
        &self,
        channel_id: &str,
        ts: &str,
        text: &str,
        blocks: Option<&Value>,
    ) -> Result<(), SlackError> {
        SlackClient::update_message(self, channel_id, ts, text, blocks).await
    }
}
