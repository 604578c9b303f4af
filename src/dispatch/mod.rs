pub mod anthropic;
pub mod custom;
pub mod openai;

use clap::ValueEnum;

use crate::config::Config;
use crate::diff;
use crate::dispatch::anthropic::AnthropicDispatch;
use crate::dispatch::custom::CustomDispatch;
use crate::dispatch::openai::OpenAiDispatch;
use crate::error::RewriteError;
use crate::parser;
use crate::prompt;

/// Where a sentence is sent for rewriting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// OpenAI chat completions — strict censor persona.
    #[value(name = "openai")]
    OpenAi,
    /// Anthropic messages API — coaching persona.
    Claude,
    /// User-supplied HTTP endpoint, raw text in, rewrite out.
    Custom,
}

impl Backend {
    pub fn name(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Claude => "claude",
            Self::Custom => "custom",
        }
    }
}

/// One rewrite submission. Built from a single user action and consumed
/// synchronously; never outlives the call.
#[derive(Clone, Debug)]
pub struct RewriteRequest {
    pub backend: Backend,
    pub input_text: String,
    /// Target URL for the custom backend. Required iff backend is Custom.
    pub endpoint_url: Option<String>,
}

/// What one successful submission renders.
#[derive(Clone, Debug, PartialEq)]
pub struct RewriteResult {
    pub rewritten: String,
    /// At most 50 chars after newline-stripping.
    pub explanation: String,
    /// In [0, 1]: 0 = identical, 1 = nothing in common.
    pub diff_ratio: f64,
}

/// Routes one rewrite request to the selected backend adapter, parses the
/// reply, and scores the change. Stateless across calls.
pub struct Dispatcher {
    config: Config,
    openai: OpenAiDispatch,
    anthropic: AnthropicDispatch,
    custom: CustomDispatch,
}

impl Dispatcher {
    pub fn from_config(config: Config) -> Self {
        Self {
            config,
            openai: OpenAiDispatch::new(),
            anthropic: AnthropicDispatch::new(),
            custom: CustomDispatch::new(),
        }
    }

    /// Run one submission end to end. Empty input and a missing custom URL
    /// are rejected before any network call. An empty rewritten string from
    /// any backend is an error — the UI shows a fixed failure message rather
    /// than a blank result.
    pub async fn rewrite(&self, req: &RewriteRequest) -> Result<RewriteResult, RewriteError> {
        let text = req.input_text.trim();
        if text.is_empty() {
            return Err(RewriteError::EmptyInput);
        }

        tracing::debug!(backend = req.backend.name(), "dispatching rewrite");

        let (rewritten, explanation) = match req.backend {
            Backend::OpenAi => {
                let api_key = self
                    .config
                    .openai_api_key
                    .as_deref()
                    .ok_or(RewriteError::MissingApiKey { backend: "openai" })?;
                let prompt = prompt::build_prompt(Backend::OpenAi, text)
                    .unwrap_or_default();
                let raw = self
                    .openai
                    .query_model(&prompt, &self.config.openai_base_url, api_key)
                    .await?;
                parser::parse_response(&raw)
            }
            Backend::Claude => {
                let api_key = self
                    .config
                    .claude_api_key
                    .as_deref()
                    .ok_or(RewriteError::MissingApiKey { backend: "claude" })?;
                let prompt = prompt::build_prompt(Backend::Claude, text)
                    .unwrap_or_default();
                let raw = self
                    .anthropic
                    .query_model(&prompt, &self.config.anthropic_base_url, api_key)
                    .await?;
                parser::parse_response(&raw)
            }
            Backend::Custom => {
                let url = req
                    .endpoint_url
                    .as_deref()
                    .map(str::trim)
                    .filter(|u| !u.is_empty())
                    .ok_or(RewriteError::MissingEndpoint)?;
                self.custom.query_endpoint(text, url).await
            }
        };

        if rewritten.is_empty() {
            tracing::warn!(
                backend = req.backend.name(),
                detail = %explanation,
                "backend returned no rewrite"
            );
            return Err(RewriteError::EmptyRewrite {
                detail: explanation,
            });
        }

        Ok(RewriteResult {
            diff_ratio: diff::diff_ratio(text, &rewritten),
            rewritten,
            explanation,
        })
    }
}
