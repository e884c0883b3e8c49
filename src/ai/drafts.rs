use tracing::{error, info};

use super::prompt_builder::build_draft_prompt;
use crate::core::models::{DraftResult, VoiceProfile};
use crate::core::traits::TextGenerator;

/// Generate two LinkedIn post variants for `content` in `voice`.
///
/// Failures are folded into [`DraftResult::Failure`] with the error text; the
/// model output is passed through untouched on success.
pub async fn generate_drafts(
    generator: &dyn TextGenerator,
    content: &str,
    source_label: &str,
    voice: VoiceProfile,
) -> DraftResult {
    let prompt = build_draft_prompt(content, source_label, voice);

    match generator.generate(prompt).await {
        Ok(drafts) => {
            info!(voice = voice.key(), chars = drafts.len(), "Generated drafts");
            DraftResult::Success { drafts }
        }
        Err(e) => {
            error!(voice = voice.key(), "Draft generation error: {}", e);
            DraftResult::Failure {
                error: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SlackError;
    use async_trait::async_trait;
    use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content};
    use std::sync::Mutex;

    struct Recorder {
        prompts: Mutex<Vec<Vec<ChatCompletionMessage>>>,
        reply: Result<String, String>,
    }

    #[async_trait]
    impl TextGenerator for Recorder {
        async fn generate(
            &self,
            prompt: Vec<ChatCompletionMessage>,
        ) -> Result<String, SlackError> {
            self.prompts.lock().unwrap().push(prompt);
            self.reply.clone().map_err(SlackError::OpenAIError)
        }
    }

    fn text(msg: &ChatCompletionMessage) -> &str {
        match &msg.content {
            Content::Text(t) => t,
            Content::ImageUrl(_) => "",
        }
    }

    #[tokio::test]
    async fn success_passes_model_text_through() {
        let generator = Recorder {
            prompts: Mutex::new(Vec::new()),
            reply: Ok("## Version A\nfoo\n\n## Version B\nbar?".to_string()),
        };
        let long = "word ".repeat(4000);

        let result = generate_drafts(&generator, &long, "doc.pdf", VoiceProfile::Company).await;

        assert_eq!(
            result,
            DraftResult::Success {
                drafts: "## Version A\nfoo\n\n## Version B\nbar?".to_string()
            }
        );
        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(text(&prompts[0][0]).contains("company page"));
        // 20_000 chars of input are capped well below that in the prompt.
        assert!(text(&prompts[0][1]).len() < 9_500);
    }

    #[tokio::test]
    async fn api_error_becomes_failure_with_message() {
        let generator = Recorder {
            prompts: Mutex::new(Vec::new()),
            reply: Err("rate limited".to_string()),
        };

        let result = generate_drafts(&generator, "text", "", VoiceProfile::Zoran).await;

        match result {
            DraftResult::Failure { error } => assert!(error.contains("rate limited")),
            DraftResult::Success { .. } => panic!("expected failure"),
        }
    }
}
