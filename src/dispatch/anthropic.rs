use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::RewriteError;

const MODEL: &str = "claude-3-opus-20240229";
const TEMPERATURE: f64 = 0.3;
const MAX_TOKENS: u64 = 400;

/// Protocol version header required by the messages API.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Messages-API adapter. Auth goes in `x-api-key` (not a Bearer token), the
/// prompt is wrapped in a content-block list, and the reply text lives at
/// `content[0].text`. A missing or empty text block degrades to an empty
/// string — the dispatcher turns that into the rewrite-failed error.
pub struct AnthropicDispatch {
    client: Client,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

impl Default for AnthropicDispatch {
    fn default() -> Self {
        Self::new()
    }
}

impl AnthropicDispatch {
    pub fn new() -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(4)
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }

    /// Send one prompt, return the first content block's text (or "").
    pub async fn query_model(
        &self,
        prompt: &str,
        base_url: &str,
        api_key: &str,
    ) -> Result<String, RewriteError> {
        let body = serde_json::json!({
            "model": MODEL,
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
            "messages": [{
                "role": "user",
                "content": [{"type": "text", "text": prompt}],
            }],
        });

        let response = self
            .client
            .post(base_url)
            .header("Content-Type", "application/json")
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RewriteError::RateLimited {
                provider: "claude".to_string(),
            });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(RewriteError::AuthFailed {
                provider: "claude".to_string(),
                message: format!("{status}"),
            });
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(RewriteError::Upstream {
                provider: "claude".to_string(),
                message: format!("{status}: {text}"),
                status: Some(status.as_u16()),
            });
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| RewriteError::SchemaParse(format!("failed to parse response: {e}")))?;

        Ok(parsed
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .unwrap_or_default())
    }
}
