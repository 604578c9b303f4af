//! Command-line surface: one sentence in, one moderated sentence out.

use std::io::Read;
use std::time::Duration;

use clap::Parser;

use crate::dispatch::{Backend, Dispatcher, RewriteRequest, RewriteResult};
use crate::error::RewriteError;

/// Pause before dispatch, mirroring the review-in-progress pacing of the
/// original panel.
const REVIEW_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Parser)]
#[command(
    name = "langtower",
    about = "語馴塔 — send a sentence through a moderation backend and see what survives"
)]
pub struct Args {
    /// The sentence to submit. Reads stdin when omitted.
    pub text: Option<String>,

    /// Which moderation backend reviews the sentence.
    #[arg(long, value_enum, default_value_t = Backend::OpenAi)]
    pub backend: Backend,

    /// Endpoint URL for the custom backend. Required iff --backend custom.
    #[arg(long)]
    pub endpoint_url: Option<String>,

    /// Skip the 2-second review pacing delay.
    #[arg(long)]
    pub no_delay: bool,
}

impl Args {
    /// Resolve the submitted text: positional argument, else stdin.
    pub fn resolve_text(&self) -> std::io::Result<String> {
        match &self.text {
            Some(text) => Ok(text.clone()),
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                Ok(buf)
            }
        }
    }

    pub fn to_request(&self, text: String) -> RewriteRequest {
        RewriteRequest {
            backend: self.backend,
            input_text: text,
            endpoint_url: self.endpoint_url.clone(),
        }
    }
}

/// Run one submission: validate, pace, dispatch, render.
///
/// Whitespace-only input short-circuits with a warning before any network
/// call. Errors come back as the user-facing message; the process exit code
/// is the caller's concern.
pub async fn run(args: &Args, dispatcher: &Dispatcher) -> Result<(), RewriteError> {
    let text = args.resolve_text().unwrap_or_default();
    if text.trim().is_empty() {
        eprintln!("你想說的話不能是空白");
        return Ok(());
    }

    let request = args.to_request(text);

    if !args.no_delay {
        eprintln!("審查中...");
        tokio::time::sleep(REVIEW_DELAY).await;
    }

    let result = dispatcher.rewrite(&request).await?;
    println!("{}", render(&result));
    Ok(())
}

/// Format a result block the way the panel shows it.
pub fn render(result: &RewriteResult) -> String {
    format!(
        "核准語句：{}\n審查說明：{}\n修改比例：{:.1}%",
        result.rewritten,
        result.explanation,
        result.diff_ratio * 100.0
    )
}
