//! Voice profiles and the draft-generation prompt.

use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};

use crate::core::models::VoiceProfile;

/// Source text beyond this many characters is cut off before prompting.
pub const MAX_SOURCE_CHARS: usize = 8000;

/// Upper bound on each draft, stated in the prompt.
pub const MAX_DRAFT_WORDS: usize = 200;

const SHARED_GUARDRAILS: &str = "\
# GUARDRAILS
ALWAYS:
- Use specific numbers or outcomes when the source provides them
- Keep posts concise and conversational, never like a press release
- Credit sources and people by name

NEVER:
- Use more than 2 emojis per post
- Write in all caps for emphasis
- Open with \"Thrilled\", \"Excited\" or \"Honored\"
- Make claims the source does not back up
- Use hashtags";

const ZORAN_PROFILE: &str = "\
You are a LinkedIn content ghostwriter for Zoran Arsovski, CEO of VertoDigital, a B2B \
marketing agency. Your posts must sound exactly like Zoran wrote them.

# ZORAN'S VOICE
Zoran sounds like a smart friend who runs a successful B2B agency: direct, warm and \
practical, never preachy.
- Gets straight to the point. The first line is the hook or the insight.
- States opinions plainly without piling on caveats. Trusts the reader.
- Uses one number that tells the story rather than a wall of metrics.
- Names people. Tags team members by first and last name instead of \"the team\".
- Self-aware and a little self-deprecating; shows he is still learning.
- Practical over theoretical: what works, \"few insights from the kitchen\".

Phrases he uses: \"The talking points are simple\", \"As hands-on as it gets\", \
\"Would love to hear from you\", \"Thoughts?\", \"Anything to add?\".
Phrases he avoids: corporate jargon, \"game-changing\", \"crushing it\", \"DM me\", \
generic motivational lines.
Formatting: dashes for bullet lists, line breaks between thoughts, British spelling \
(\"optimisation\"), at most 1-2 emojis.

# VERTODIGITAL TEAM (for tagging when their expertise applies)
- Ivailo Shipochki - Partner, Head of Advertising
- Yasen Lilov - Partner, Head of Data & Analytics
- Lily Grozeva - Partner, Head of SEO
- Bilyana Katmarova - Partner & CFO
- Rumyana Kercheva - Director, Advertising (ABM)
- Paul Green - US Sales Lead
- Simeon Penev - Lead, Automation & AI

# SOCIAL PROOF (max one quote per post, only if it fits naturally)
- G2: 35 reviews, 4.9/5 average
- \"We've come to see them as an extension to our team.\" - Hristo B.
- \"From one integration per week, we ended up integrating 5-7 companies per week.\" - Georgi G., Releva

Final check: would Zoran post this exact thing on his personal LinkedIn? If not, revise.";

const COMPANY_PROFILE: &str = "\
You write LinkedIn posts for the VertoDigital company page. VertoDigital is a B2B \
marketing agency specialising in advertising, SEO, analytics and automation.

# COMPANY VOICE
- Speaks as \"we\", crediting the specific people who did the work.
- Confident and useful: every post teaches the reader one concrete thing.
- Data-grounded; picks the single most telling number.
- Friendly but professional; no hype, no buzzwords.
- Closes with an invitation to discuss rather than a hard sell.";

const NEUTRAL_PROFILE: &str = "\
You write clear, professional LinkedIn posts for a B2B marketing audience.

# VOICE
- Plain, neutral language without persona or in-jokes.
- Lead with the most useful point from the source.
- Short paragraphs, optional dash bullets for lists.
- Accurate to the source; no embellishment.";

/// Complete system prompt for `voice`.
#[must_use]
pub fn system_prompt(voice: VoiceProfile) -> String {
    let profile = match voice {
        VoiceProfile::Zoran => ZORAN_PROFILE,
        VoiceProfile::Company => COMPANY_PROFILE,
        VoiceProfile::Neutral => NEUTRAL_PROFILE,
    };
    format!("{profile}\n\n{SHARED_GUARDRAILS}")
}

/// Hard-cut `content` to at most `MAX_SOURCE_CHARS` characters.
#[must_use]
pub fn truncate_source(content: &str) -> &str {
    match content.char_indices().nth(MAX_SOURCE_CHARS) {
        Some((byte_idx, _)) => &content[..byte_idx],
        None => content,
    }
}

/// The user turn asking for two labelled post variants.
#[must_use]
pub fn draft_request(content: &str, source_label: &str, voice: VoiceProfile) -> String {
    let source_line = if source_label.trim().is_empty() {
        String::new()
    } else {
        format!("Source: {source_label}\n\n")
    };

    format!(
        "Based on this content, create 2 different LinkedIn post drafts in the {voice} voice.\n\n\
         SOURCE CONTENT:\n{content}\n\n\
         {source_line}---\n\n\
         Create 2 distinct versions:\n\
         - **Version A**: insight-led (open with the key learning or observation)\n\
         - **Version B**: question-led (end with a genuine question to the reader)\n\n\
         For each version:\n\
         1. Keep it under {MAX_DRAFT_WORDS} words\n\
         2. Follow the voice profile's language patterns\n\
         3. Tag relevant people only if their expertise applies\n\
         4. Include a social proof quote only if it fits naturally\n\n\
         Format your response as:\n\
         ## Version A\n[post content]\n\n\
         ## Version B\n[post content]\n",
        voice = voice.label(),
        content = truncate_source(content),
    )
}

#[must_use]
pub fn build_draft_prompt(
    content: &str,
    source_label: &str,
    voice: VoiceProfile,
) -> Vec<ChatCompletionMessage> {
    vec![
        ChatCompletionMessage {
            role: MessageRole::system,
            content: Content::Text(system_prompt(voice)),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        },
        ChatCompletionMessage {
            role: MessageRole::user,
            content: Content::Text(draft_request(content, source_label, voice)),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        },
    ]
}
