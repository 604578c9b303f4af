//! langtower — a single-shot moderation/rewrite dispatcher.
//!
//! One sentence goes in, one of three backends (OpenAI chat completions,
//! Anthropic messages, or a user-supplied endpoint) rewrites it, and the
//! result comes back with a short explanation and a diff ratio measuring how
//! much was changed. No state survives a call.

pub mod cli;
pub mod config;
pub mod diff;
pub mod dispatch;
pub mod error;
pub mod parser;
pub mod prompt;
