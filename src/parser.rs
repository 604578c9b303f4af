//! Extracts the two labeled sections from a model's free-text reply.
//!
//! The hosted backends are instructed to answer with a `【改寫】` section
//! followed by a `【說明】` section. Models don't always comply, so parsing is
//! best-effort: first occurrence of each marker wins, and both sections have
//! documented fallbacks so the caller always gets something to show.

/// Delimits the rewritten sentence in a model reply.
pub const REWRITE_MARKER: &str = "【改寫】";

/// Delimits the explanation in a model reply.
pub const EXPLANATION_MARKER: &str = "【說明】";

/// Shown when the model reply carries no explanation section.
pub const NO_EXPLANATION_PLACEHOLDER: &str = "（模型未返回說明內容）";

/// Explanation cap, counted in chars (replies are CJK-heavy).
pub const MAX_EXPLANATION_CHARS: usize = 50;

/// Parse a raw model reply into `(rewritten, explanation)`.
///
/// The rewrite is the text between the first `【改寫】` and the next `【說明】`
/// (or end of string), trimmed. If the rewrite marker is absent the whole
/// trimmed reply is used, so something is always shown even when the model
/// ignored the format directive. The explanation is everything after the first
/// `【說明】`, newline-stripped and capped at 50 chars; absent marker (or a
/// marker with nothing after it) yields a fixed placeholder.
pub fn parse_response(raw: &str) -> (String, String) {
    let rewritten = match raw.find(REWRITE_MARKER) {
        Some(pos) => {
            let tail = &raw[pos + REWRITE_MARKER.len()..];
            let end = tail.find(EXPLANATION_MARKER).unwrap_or(tail.len());
            tail[..end].trim().to_string()
        }
        None => raw.trim().to_string(),
    };

    let explanation = match raw.find(EXPLANATION_MARKER) {
        Some(pos) => {
            let tail = &raw[pos + EXPLANATION_MARKER.len()..];
            if tail.is_empty() {
                NO_EXPLANATION_PLACEHOLDER.to_string()
            } else {
                truncate_explanation(tail)
            }
        }
        None => NO_EXPLANATION_PLACEHOLDER.to_string(),
    };

    (rewritten, explanation)
}

/// Strip newlines, trim, and cap at [`MAX_EXPLANATION_CHARS`] chars.
pub fn truncate_explanation(text: &str) -> String {
    let flattened: String = text.chars().filter(|c| *c != '\n').collect();
    flattened
        .trim()
        .chars()
        .take(MAX_EXPLANATION_CHARS)
        .collect()
}
