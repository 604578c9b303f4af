use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::RewriteError;

const MAX_RESPONSE_BYTES: usize = 2 * 1024 * 1024; // 2MB

const MODEL: &str = "gpt-4";
const TEMPERATURE: f64 = 0.3;
const MAX_TOKENS: u64 = 300;

/// Chat-completions adapter. Transport and auth failures propagate to the
/// caller — there is no local recovery on this path.
pub struct OpenAiDispatch {
    client: Client,
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

impl Default for OpenAiDispatch {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenAiDispatch {
    pub fn new() -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(4)
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }

    /// Send one prompt, return the first choice's message content raw.
    pub async fn query_model(
        &self,
        prompt: &str,
        base_url: &str,
        api_key: &str,
    ) -> Result<String, RewriteError> {
        let body = serde_json::json!({
            "model": MODEL,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });

        let response = self
            .client
            .post(base_url)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RewriteError::RateLimited {
                provider: "openai".to_string(),
            });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(RewriteError::AuthFailed {
                provider: "openai".to_string(),
                message: format!("{status}"),
            });
        }

        // Catch-all for any other non-success status. Cap error body reads
        // to MAX_RESPONSE_BYTES to prevent memory exhaustion.
        if !status.is_success() {
            let error_bytes = response.bytes().await.unwrap_or_default();
            let truncated = &error_bytes[..error_bytes.len().min(MAX_RESPONSE_BYTES)];
            let text = String::from_utf8_lossy(truncated);
            return Err(RewriteError::Upstream {
                provider: "openai".to_string(),
                message: format!("{status}: {text}"),
                status: Some(status.as_u16()),
            });
        }

        let bytes = response.bytes().await.map_err(|e| RewriteError::Upstream {
            provider: "openai".to_string(),
            message: format!("failed to read response body: {e}"),
            status: None,
        })?;

        if bytes.len() > MAX_RESPONSE_BYTES {
            return Err(RewriteError::Upstream {
                provider: "openai".to_string(),
                message: format!(
                    "response too large: {} bytes (max {})",
                    bytes.len(),
                    MAX_RESPONSE_BYTES
                ),
                status: None,
            });
        }

        let completion: ChatCompletion = serde_json::from_slice(&bytes)
            .map_err(|e| RewriteError::SchemaParse(format!("failed to parse response: {e}")))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| RewriteError::Upstream {
                provider: "openai".to_string(),
                message: "empty choices or null content".to_string(),
                status: None,
            })
    }
}
