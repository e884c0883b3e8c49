use openai_api_rs::v1::chat_completion::{Content, MessageRole};
use vertovoice::ai::prompt_builder::{
    MAX_SOURCE_CHARS, build_draft_prompt, draft_request, system_prompt,
};
use vertovoice::core::models::VoiceProfile;

fn text_of(content: &Content) -> &str {
    match content {
        Content::Text(t) => t,
        _ => panic!("expected text content"),
    }
}

#[test]
fn test_prompt_is_system_then_user() {
    let prompt = build_draft_prompt("Body", "report.pdf", VoiceProfile::Company);
    assert_eq!(prompt.len(), 2);
    assert!(matches!(prompt[0].role, MessageRole::system));
    assert!(matches!(prompt[1].role, MessageRole::user));
    assert_eq!(
        text_of(&prompt[0].content),
        system_prompt(VoiceProfile::Company)
    );
    assert!(text_of(&prompt[1].content).contains("report.pdf"));
}

#[test]
fn test_long_sources_are_cut_before_sending() {
    let marker = "TAIL-MARKER";
    let content = format!("{}{}", "x".repeat(MAX_SOURCE_CHARS), marker);
    let req = draft_request(&content, "https://example.com", VoiceProfile::Neutral);
    assert!(!req.contains(marker));
}

#[test]
fn test_blank_source_label_is_omitted() {
    let req = draft_request("Body", "   ", VoiceProfile::Zoran);
    assert!(!req.contains("Source:"));
}

#[test]
fn test_every_voice_keeps_the_guardrails() {
    for voice in VoiceProfile::ALL {
        assert!(
            system_prompt(voice).contains("# GUARDRAILS"),
            "{} lacks guardrails",
            voice.key()
        );
    }
}
