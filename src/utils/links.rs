use regex::Regex;
use std::collections::HashSet;
use url::Url;

/// Extract HTTP(S) links from Slack message text.
///
/// Supports Slack link markup (`<https://example.com|label>`, `<https://example.com>`)
/// and bare URLs. The bracketed form is consumed whole, so a label is never
/// mistaken for part of the URL. Slack's `&amp;`, `&lt;` and `&gt;` escapes
/// are undone on each match.
#[must_use]
pub fn extract_links_from_text(text: &str) -> Vec<String> {
    // Source: https://docs.slack.dev/messaging/formatting-message-text/#linking-urls
    static LINK_RE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
        Regex::new(r"<(https?://[^>|\s]+)(?:\|[^>]*)?>|(https?://[^\s<>]+)")
            .unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
    });

    LINK_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| trim_trailing_punctuation(&unescape_slack_text(m.as_str())).to_string())
        .collect()
}

/// Reverse the three entity escapes Slack applies to message text.
#[must_use]
pub fn unescape_slack_text(text: &str) -> String {
    // `&amp;` last so an escaped `&amp;lt;` stays a literal `&lt;`.
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Links in `text` worth fetching, normalized and deduped in first-seen order.
#[must_use]
pub fn shareable_links(text: &str) -> Vec<String> {
    normalize_and_dedupe_links(extract_links_from_text(text))
}

#[must_use]
pub fn normalize_and_dedupe_links<I>(raw_links: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut out: Vec<String> = Vec::new();

    for raw in raw_links {
        let trimmed = trim_trailing_punctuation(raw.trim());
        if let Some(norm) = normalize_link(trimmed)
            && seen.insert(norm.clone())
        {
            out.push(norm);
        }
    }

    out
}

#[must_use]
fn normalize_link(raw: &str) -> Option<String> {
    let raw = raw
        .trim()
        .trim_matches(|c: char| matches!(c, '<' | '>' | '"' | '\''));
    if !(raw.starts_with("http://") || raw.starts_with("https://")) {
        return None;
    }

    let mut url = Url::parse(raw).ok()?;
    url.set_fragment(None);

    // Slack message permalinks and Slack-hosted files are not articles; files
    // arrive through the `files` array instead.
    if let Some(host) = url.host_str().map(str::to_ascii_lowercase) {
        let path = url.path();
        let is_message_permalink = host.ends_with("slack.com") && path.contains("/archives/");
        let is_file_url = host == "slack-files.com"
            || host == "files.slack.com"
            || (host.ends_with("slack.com") && path.contains("/files-pri/"));

        if is_message_permalink || is_file_url {
            return None;
        }
    }

    let rendered = url.to_string();
    let rendered = rendered.trim_end_matches('/').to_string();

    Some(rendered)
}

#[must_use]
fn trim_trailing_punctuation(s: &str) -> &str {
    s.trim_end_matches(&['.', ',', ';', ':', '!', '?', ')', ']', '}'][..])
}
