use serde::{Deserialize, Serialize};

/// Where a piece of extracted content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    Url,
    Pdf,
    Video,
}

/// Plain text produced by one of the extractors, ready for prompting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    text: String,
    source_label: String,
    source_kind: SourceKind,
}

impl ExtractedContent {
    #[must_use]
    pub fn new(text: String, source_label: impl Into<String>, source_kind: SourceKind) -> Self {
        Self {
            text,
            source_label: source_label.into(),
            source_kind,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// URL or file name shown back to the user.
    #[must_use]
    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    #[must_use]
    pub fn source_kind(&self) -> SourceKind {
        self.source_kind
    }
}

/// A Slack conversation thread: `(channel id, thread timestamp)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PendingKey {
    pub channel_id: String,
    pub thread_ts: String,
}

impl PendingKey {
    #[must_use]
    pub fn new(channel_id: impl Into<String>, thread_ts: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            thread_ts: thread_ts.into(),
        }
    }
}

impl std::fmt::Display for PendingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.channel_id, self.thread_ts)
    }
}

/// Named system-prompt variant used for draft generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VoiceProfile {
    #[default]
    Zoran,
    Company,
    Neutral,
}

impl VoiceProfile {
    pub const ALL: [VoiceProfile; 3] = [
        VoiceProfile::Zoran,
        VoiceProfile::Company,
        VoiceProfile::Neutral,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            VoiceProfile::Zoran => "zoran",
            VoiceProfile::Company => "company",
            VoiceProfile::Neutral => "neutral",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            VoiceProfile::Zoran => "Zoran",
            VoiceProfile::Company => "VertoDigital",
            VoiceProfile::Neutral => "Neutral",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.key().eq_ignore_ascii_case(key.trim()))
    }

    /// Resolve a profile by key, falling back to the default for unknown keys.
    #[must_use]
    pub fn from_key_or_default(key: &str) -> Self {
        Self::from_key(key).unwrap_or_default()
    }

    /// Button action id for this profile, e.g. `select_zoran`.
    #[must_use]
    pub fn action_id(self) -> String {
        format!("{}{}", VOICE_ACTION_PREFIX, self.key())
    }
}

pub const VOICE_ACTION_PREFIX: &str = "select_";

/// Outcome of one draft generation call. The drafts are opaque model text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftResult {
    Success { drafts: String },
    Failure { error: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_keys_round_trip_and_unknown_falls_back() {
        for v in VoiceProfile::ALL {
            assert_eq!(VoiceProfile::from_key(v.key()), Some(v));
        }
        assert_eq!(VoiceProfile::from_key(" Company "), Some(VoiceProfile::Company));
        assert_eq!(
            VoiceProfile::from_key_or_default("pirate"),
            VoiceProfile::Zoran
        );
    }

    #[test]
    fn action_id_uses_select_prefix() {
        assert_eq!(VoiceProfile::Zoran.action_id(), "select_zoran");
    }
}
