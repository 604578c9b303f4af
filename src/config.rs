use std::env;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1/messages";

/// Runtime configuration, read once at startup. API keys are optional here —
/// a missing key is fatal only when that backend is actually selected.
#[derive(Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub claude_api_key: Option<String>,
    /// Override for the OpenAI chat-completions URL (tests point this at a
    /// local mock server).
    pub openai_base_url: String,
    /// Override for the Anthropic messages URL.
    pub anthropic_base_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        let openai_api_key = env::var("OPENAI_API_KEY").ok();
        let claude_api_key = env::var("CLAUDE_API_KEY").ok();

        if openai_api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY not set — OpenAI backend unavailable");
        }
        if claude_api_key.is_none() {
            tracing::warn!("CLAUDE_API_KEY not set — Claude backend unavailable");
        }

        Self {
            openai_api_key,
            claude_api_key,
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| OPENAI_BASE_URL.to_string()),
            anthropic_base_url: env::var("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|_| ANTHROPIC_BASE_URL.to_string()),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("claude_api_key", &self.claude_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("openai_base_url", &self.openai_base_url)
            .field("anthropic_base_url", &self.anthropic_base_url)
            .finish()
    }
}
