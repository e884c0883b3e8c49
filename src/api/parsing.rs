use serde_json::Value;
use url::form_urlencoded;

use crate::SlackError;

pub fn is_interactive_body(body: &str) -> bool {
    body.starts_with("payload=") || body.contains("&payload=")
}

/// Pull the JSON `payload` field out of a form-encoded interactivity POST.
pub fn parse_interactive_payload(form_body: &str) -> Result<Value, SlackError> {
    let raw = form_urlencoded::parse(form_body.as_bytes())
        .find(|(key, _)| key == "payload")
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| SlackError::ParseError("Missing payload field".to_string()))?;

    serde_json::from_str(&raw)
        .map_err(|e| SlackError::ParseError(format!("Invalid JSON payload: {}", e)))
}

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

pub fn v_array<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Vec<Value>> {
    v_path(root, path).and_then(|v| v.as_array())
}

/// First non-empty string found among several candidate paths.
pub fn v_first_str<'a>(root: &'a Value, paths: &[&[&str]]) -> Option<&'a str> {
    paths
        .iter()
        .find_map(|path| v_str(root, path).filter(|s| !s.is_empty()))
}
