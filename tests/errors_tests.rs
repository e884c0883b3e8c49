use std::error::Error;
use vertovoice::errors::SlackError;
use vertovoice::extract::ExtractError;

#[test]
fn test_slack_error_implements_error_trait() {
    fn assert_error<T: Error>(_: &T) {}

    let error = SlackError::ParseError("test error".to_string());
    assert_error(&error);
    assert_error(&ExtractError::NoBody);
}

#[test]
fn test_slack_error_display() {
    let error = SlackError::ApiError("API failed".to_string());
    assert_eq!(format!("{error}"), "Failed to access Slack API: API failed");

    let error = SlackError::OpenAIError("Model unavailable".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to access OpenAI API: Model unavailable"
    );

    let error = SlackError::ConfigError("SLACK_BOT_TOKEN missing".to_string());
    assert_eq!(
        format!("{error}"),
        "Configuration error: SLACK_BOT_TOKEN missing"
    );

    let error = SlackError::GeneralError("plain".to_string());
    assert_eq!(format!("{error}"), "plain");
}

#[test]
fn test_extract_error_display() {
    assert_eq!(
        ExtractError::Status(404).to_string(),
        "unexpected HTTP status 404"
    );
    assert_eq!(
        ExtractError::TooShort { chars: 42 }.to_string(),
        "only 42 characters of content"
    );
    assert_eq!(
        ExtractError::Config("GEMINI_API_KEY is not set".into()).to_string(),
        "GEMINI_API_KEY is not set"
    );
}

#[test]
fn test_slack_error_from_conversions() {
    let err = anyhow::anyhow!("test error");
    let slack_err: SlackError = err.into();

    match slack_err {
        SlackError::ApiError(msg) => assert!(msg.contains("test error")),
        _ => panic!("Unexpected error type"),
    }

    let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
    assert!(matches!(SlackError::from(json_err), SlackError::ParseError(_)));

    #[allow(unused)]
    #[allow(clippy::items_after_statements)]
    fn _check_reqwest_conversion(err: reqwest::Error) -> SlackError {
        SlackError::from(err)
    }
}
