use slack_morphism::errors::SlackClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SlackError {
    #[error("Failed to parse Slack event: {0}")]
    ParseError(String),

    #[error("Failed to access Slack API: {0}")]
    ApiError(String),

    #[error("Failed to access OpenAI API: {0}")]
    OpenAIError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    GeneralError(String),
}

impl From<SlackClientError> for SlackError {
    fn from(error: SlackClientError) -> Self {
        SlackError::ApiError(error.to_string())
    }
}

impl From<reqwest::Error> for SlackError {
    fn from(error: reqwest::Error) -> Self {
        SlackError::HttpError(error.to_string())
    }
}

impl From<anyhow::Error> for SlackError {
    fn from(error: anyhow::Error) -> Self {
        SlackError::ApiError(error.to_string())
    }
}

impl From<serde_json::Error> for SlackError {
    fn from(error: serde_json::Error) -> Self {
        SlackError::ParseError(error.to_string())
    }
}
