use thiserror::Error;

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("input text is empty")]
    EmptyInput,

    #[error("custom backend selected but no endpoint URL given")]
    MissingEndpoint,

    #[error("missing API key for {backend}")]
    MissingApiKey { backend: &'static str },

    #[error("rate limited by {provider}")]
    RateLimited { provider: String },

    #[error("upstream error from {provider}: {message}")]
    Upstream {
        provider: String,
        message: String,
        status: Option<u16>,
    },

    #[error("auth failed for {provider}: {message}")]
    AuthFailed { provider: String, message: String },

    #[error("schema parse error: {0}")]
    SchemaParse(String),

    #[error("model returned no rewrite")]
    EmptyRewrite { detail: String },

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
}

impl RewriteError {
    /// Extract provider name from structured error variants.
    /// Returns None for variants that don't carry provider context.
    pub fn provider(&self) -> Option<&str> {
        match self {
            Self::RateLimited { provider } => Some(provider),
            Self::Upstream { provider, .. } => Some(provider),
            Self::AuthFailed { provider, .. } => Some(provider),
            _ => None,
        }
    }

    /// Produce a sanitized message safe for showing to the user.
    /// Does not leak internal URLs, connection details, or upstream error bodies.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyInput => "你想說的話不能是空白".to_string(),
            Self::MissingEndpoint => "請輸入 URL".to_string(),
            Self::MissingApiKey { backend } => {
                format!("no API key configured for {backend}")
            }
            Self::RateLimited { provider } => {
                format!("rate limited by {provider} — try again shortly")
            }
            Self::Upstream {
                provider, message, ..
            } => {
                format!("upstream error from {provider}: {message}")
            }
            Self::AuthFailed { provider, message } => {
                format!("authentication failed for {provider}: {message}")
            }
            Self::SchemaParse(_) => "failed to parse provider response".to_string(),
            Self::EmptyRewrite { .. } => "模型未成功回傳改寫語句".to_string(),
            Self::Request(_) => "request to provider failed".to_string(),
        }
    }
}
