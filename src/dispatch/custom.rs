use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::parser;

/// Wall-clock limit for one round trip to a user endpoint.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Adapter for a user-supplied endpoint. Unlike the hosted adapters this one
/// never returns Err: the endpoint is untrusted and arbitrary, so every
/// failure — bad status, timeout, unreachable host, garbage body — collapses
/// into an empty rewrite plus a descriptive message. The dispatcher treats
/// the empty rewrite as the failure signal.
pub struct CustomDispatch {
    client: Client,
    timeout: Duration,
}

#[derive(Deserialize)]
struct CustomReply {
    #[serde(default)]
    rewritten: Option<String>,
    #[serde(default)]
    explanation: Option<String>,
}

impl Default for CustomDispatch {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomDispatch {
    pub fn new() -> Self {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    /// Build with a non-default timeout (tests use short ones).
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .connect_timeout(timeout)
            .build()
            .expect("failed to build HTTP client");

        Self { client, timeout }
    }

    /// POST `{"input": text}` and return `(rewritten, explanation)`.
    pub async fn query_endpoint(&self, text: &str, url: &str) -> (String, String) {
        let body = serde_json::json!({ "input": text });

        let response = match self
            .client
            .post(url)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return (String::new(), format!("錯誤：{e}")),
        };

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return (String::new(), format!("狀態碼 {} 錯誤", status.as_u16()));
        }

        match response.json::<CustomReply>().await {
            Ok(reply) => (
                reply.rewritten.unwrap_or_default(),
                parser::truncate_explanation(&reply.explanation.unwrap_or_default()),
            ),
            Err(e) => (String::new(), format!("錯誤：{e}")),
        }
    }
}

impl std::fmt::Debug for CustomDispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomDispatch")
            .field("timeout", &self.timeout)
            .finish()
    }
}
