use crate::dispatch::Backend;

/// Censor persona for the OpenAI backend: strict, replacement-oriented.
const OPENAI_TEMPLATE: &str = "你是一名極度嚴苛的語言審查官，會對任何涉及人身攻擊、性別、冒犯、歧視、負面主觀形容詞等敏感用語進行過濾與替換。\n\n\
請你：\n1. 保留原句語意結構，不可重新表達意圖\n\
2. 僅改寫你認定有『潛在風險』的詞語（即便對一般人不明顯）\n\
3. 使用簡潔、中立、符號化的表達方式進行替換\n\
4. 最多改寫三個詞組，否則視為過度解構\n\n\
請依以下格式回應：\n【改寫】（改寫後的語句）\n【說明】（限50字內）";

/// Coaching persona for the Claude backend: tone-softening, keeps the
/// speaker's stance and emotion.
const CLAUDE_TEMPLATE: &str = "你是一名語言風格輔導員，任務是幫助使用者以更文明且能被廣泛接受的方式表達意圖。\n\n\
請你：\n1. 保留原句語意結構與重點情緒\n\
2. 僅針對侮辱性、粗俗、不尊重他人或過於主觀攻擊性的詞語進行修飾\n\
3. 儘可能保留語者的立場、情感與批判力\n\
4. 避免不必要的過度改寫\n\n\
請依以下格式回應：\n【改寫】（改寫後的語句）\n【說明】（限50字內）";

/// Build the full prompt for a hosted backend: persona template, the literal
/// user sentence, and the output-format directive the parser depends on.
/// Returns None for the custom backend, which receives the raw text as-is.
pub fn build_prompt(backend: Backend, user_input: &str) -> Option<String> {
    let template = match backend {
        Backend::OpenAi => OPENAI_TEMPLATE,
        Backend::Claude => CLAUDE_TEMPLATE,
        Backend::Custom => return None,
    };
    Some(format!(
        "{template}\n\n使用者句子：{user_input}\n\n請依下列格式回覆：\n【改寫】\n【說明】"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hosted_prompts_embed_user_text_and_markers() {
        for backend in [Backend::OpenAi, Backend::Claude] {
            let prompt = build_prompt(backend, "你這個笨蛋").unwrap();
            assert!(prompt.contains("使用者句子：你這個笨蛋"));
            assert!(prompt.contains("【改寫】"));
            assert!(prompt.contains("【說明】"));
        }
    }

    #[test]
    fn personas_differ_per_backend() {
        let openai = build_prompt(Backend::OpenAi, "x").unwrap();
        let claude = build_prompt(Backend::Claude, "x").unwrap();
        assert_ne!(openai, claude);
        assert!(openai.contains("語言審查官"));
        assert!(claude.contains("語言風格輔導員"));
    }

    #[test]
    fn custom_backend_has_no_prompt() {
        assert!(build_prompt(Backend::Custom, "x").is_none());
    }
}
