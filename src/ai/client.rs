//! LLM (`OpenAI`) API client module
//!
//! Encapsulates the single non-streaming call used to write post drafts.

use std::time::Duration;

use async_trait::async_trait;
use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::info;

use crate::core::traits::TextGenerator;
use crate::errors::SlackError;

const OPENAI_RESPONSES_URL: &str = "https://api.openai.com/v1/responses";

/// Drafts are two short posts; this leaves generous headroom.
const MAX_OUTPUT_TOKENS: usize = 2000;

/// LLM API client for generating drafts
pub struct LlmClient {
    http: Client,
    api_key: String,
    org_id: Option<String>,
    model_name: String,
}

impl LlmClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        api_key: String,
        org_id: Option<String>,
        model_name: String,
        timeout_secs: u64,
    ) -> Result<Self, SlackError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                SlackError::HttpError(format!("Failed to build OpenAI HTTP client: {e}"))
            })?;

        Ok(Self {
            http,
            api_key,
            org_id,
            model_name,
        })
    }

    fn headers(&self) -> Result<reqwest::header::HeaderMap, SlackError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let auth_value = format!("Bearer {}", self.api_key)
            .parse()
            .map_err(|e| SlackError::HttpError(format!("Invalid Authorization header: {e}")))?;
        headers.insert("Authorization", auth_value);

        if let Some(org) = &self.org_id {
            let org_value = org.parse().map_err(|e| {
                SlackError::HttpError(format!("Invalid OpenAI-Organization header: {e}"))
            })?;
            headers.insert("OpenAI-Organization", org_value);
        }

        Ok(headers)
    }

    /// # Errors
    ///
    /// Returns an error if the HTTP request to `OpenAI` fails or the response
    /// carries no text.
    pub async fn generate_text(
        &self,
        prompt: Vec<ChatCompletionMessage>,
    ) -> Result<String, SlackError> {
        #[cfg(feature = "debug-logs")]
        info!("Using ChatGPT prompt:\n{:?}", prompt);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            model = %self.model_name,
            "Generating drafts with {} messages in prompt",
            prompt.len()
        );

        let request_body = json!({
            "model": self.model_name,
            "input": build_responses_input_from_prompt(&prompt),
            "max_output_tokens": MAX_OUTPUT_TOKENS
        });

        let response = self
            .http
            .post(OPENAI_RESPONSES_URL)
            .headers(self.headers()?)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| SlackError::HttpError(format!("OpenAI API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(SlackError::OpenAIError(format!(
                "OpenAI API error (status {status}): {error_text}"
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            SlackError::OpenAIError(format!("Failed to parse OpenAI response: {e}"))
        })?;

        output_text(&response_json)
            .ok_or_else(|| SlackError::OpenAIError("No text in response".to_string()))
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: Vec<ChatCompletionMessage>) -> Result<String, SlackError> {
        self.generate_text(prompt).await
    }
}

/// Build Responses API input payload from a chat-style prompt.
/// - Filters out assistant messages (Responses treats assistant content as output)
/// - Emits typed `input_text` parts
pub(crate) fn build_responses_input_from_prompt(prompt: &[ChatCompletionMessage]) -> Vec<Value> {
    prompt
        .iter()
        .filter(|m| !matches!(m.role, MessageRole::assistant))
        .filter_map(|m| {
            let role_str = match m.role {
                MessageRole::system => "system",
                MessageRole::user | MessageRole::function | MessageRole::tool => "user",
                MessageRole::assistant => "assistant",
            };

            let Content::Text(t) = &m.content else {
                return None;
            };

            Some(json!({
                "role": role_str,
                "content": [{ "type": "input_text", "text": t }]
            }))
        })
        .collect()
}

/// Pull the generated text out of a Responses API body.
///
/// Prefers the `output_text` convenience field and falls back to joining the
/// `output_text` parts of each output item.
pub(crate) fn output_text(response_json: &Value) -> Option<String> {
    if let Some(text) = response_json.get("output_text").and_then(Value::as_str) {
        return Some(text.to_string());
    }

    let collected: Vec<String> = response_json
        .get("output")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .filter(|p| p.get("type").and_then(Value::as_str) == Some("output_text"))
        .filter_map(|p| {
            p.get("text")
                .and_then(Value::as_str)
                .or_else(|| p.get("text").and_then(|t| t.get("value")).and_then(Value::as_str))
                .map(ToString::to_string)
        })
        .collect();

    if collected.is_empty() {
        None
    } else {
        Some(collected.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(role: MessageRole, text: &str) -> ChatCompletionMessage {
        ChatCompletionMessage {
            role,
            content: Content::Text(text.to_string()),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        }
    }

    #[test]
    fn test_build_responses_input_filters_assistant_and_uses_typed_parts() {
        let prompt = vec![
            message(MessageRole::system, "policy"),
            message(MessageRole::assistant, "ack"),
            message(MessageRole::user, "hello"),
        ];

        let input = build_responses_input_from_prompt(&prompt);

        assert_eq!(input.len(), 2);
        assert_eq!(input[0]["role"], "system");
        assert_eq!(input[1]["role"], "user");
        assert_eq!(input[1]["content"][0]["type"], "input_text");
        assert_eq!(input[1]["content"][0]["text"], "hello");
    }

    #[test]
    fn test_output_text_prefers_convenience_field() {
        let body = json!({ "output_text": "## Version A\nHi", "output": [] });
        assert_eq!(output_text(&body).as_deref(), Some("## Version A\nHi"));
    }

    #[test]
    fn test_output_text_collects_message_parts() {
        let body = json!({
            "output": [
                { "type": "reasoning", "content": [] },
                { "type": "message", "content": [
                    { "type": "output_text", "text": "## Version A" },
                    { "type": "refusal", "refusal": "no" },
                    { "type": "output_text", "text": { "value": "## Version B" } }
                ]}
            ]
        });
        assert_eq!(
            output_text(&body).as_deref(),
            Some("## Version A\n## Version B")
        );
        assert!(output_text(&json!({ "output": [] })).is_none());
    }
}
