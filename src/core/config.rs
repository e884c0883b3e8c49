use std::env;

const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub slack_bot_token: String,
    pub openai_api_key: String,
    pub openai_org_id: Option<String>,
    pub openai_model: String,
    /// Video analysis is disabled (per-request configuration error) when unset.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub port: u16,
    pub llm_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            slack_bot_token: env::var("SLACK_BOT_TOKEN")
                .map_err(|e| format!("SLACK_BOT_TOKEN: {}", e))?,
            openai_api_key: env::var("OPENAI_API_KEY")
                .map_err(|e| format!("OPENAI_API_KEY: {}", e))?,
            openai_org_id: env::var("OPENAI_ORG_ID").ok(),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
            gemini_api_key: env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            port: parse_var("PORT", DEFAULT_PORT)?,
            llm_timeout_secs: parse_var("LLM_TIMEOUT_SECS", DEFAULT_LLM_TIMEOUT_SECS)?,
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| format!("{}: {}", name, e)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_var_falls_back_to_default_when_unset() {
        let port: u16 = parse_var("VERTOVOICE_TEST_UNSET_PORT", 4242).unwrap();
        assert_eq!(port, 4242);
    }

    #[test]
    fn parse_var_names_the_variable_on_bad_input() {
        // SAFETY: test-only variable, not read by any other test.
        unsafe { env::set_var("VERTOVOICE_TEST_BAD_TIMEOUT", "soon") };
        let err = parse_var::<u64>("VERTOVOICE_TEST_BAD_TIMEOUT", 1).unwrap_err();
        assert!(err.starts_with("VERTOVOICE_TEST_BAD_TIMEOUT"));
    }
}
