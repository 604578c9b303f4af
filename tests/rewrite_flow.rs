//! End-to-end dispatcher tests: request validation, parsing, diff scoring.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use langtower::config::Config;
use langtower::diff;
use langtower::dispatch::{Backend, Dispatcher, RewriteRequest};
use langtower::error::RewriteError;

fn test_config() -> Config {
    Config {
        openai_api_key: Some("sk-test".to_string()),
        claude_api_key: Some("sk-claude-test".to_string()),
        // Unroutable defaults: any test that should not touch the network
        // fails loudly if it does.
        openai_base_url: "http://127.0.0.1:1/".to_string(),
        anthropic_base_url: "http://127.0.0.1:1/".to_string(),
    }
}

/// Helper: one-shot mock server returning a chat-completions reply whose
/// message content is `reply`.
async fn mock_openai(reply: &str) -> (tokio::task::JoinHandle<()>, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let body = serde_json::json!({
        "choices": [{"message": {"content": reply}}]
    })
    .to_string();

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 16384];
        let _ = socket.read(&mut buf).await;
        let response = format!(
            "HTTP/1.1 200 OK\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
    });

    (server, format!("http://127.0.0.1:{port}/v1/chat/completions"))
}

// ---------------------------------------------------------------------------
// The canonical scenario: an insult goes in, a sanitized sentence comes out.
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rude_sentence_through_openai_backend() {
    let (server, url) = mock_openai("【改寫】你這個[:)]\n【說明】移除貶義詞").await;

    let mut config = test_config();
    config.openai_base_url = url;
    let dispatcher = Dispatcher::from_config(config);

    let result = dispatcher
        .rewrite(&RewriteRequest {
            backend: Backend::OpenAi,
            input_text: "你這個笨蛋".to_string(),
            endpoint_url: None,
        })
        .await
        .unwrap();

    assert_eq!(result.rewritten, "你這個[:)]");
    assert_eq!(result.explanation, "移除貶義詞");
    assert_eq!(
        result.diff_ratio,
        diff::diff_ratio("你這個笨蛋", "你這個[:)]")
    );
    assert!(result.diff_ratio > 0.0 && result.diff_ratio <= 1.0);

    server.await.unwrap();
}

#[tokio::test]
async fn marker_free_reply_still_renders_something() {
    let (server, url) = mock_openai("模型直接回了一句話").await;

    let mut config = test_config();
    config.openai_base_url = url;
    let dispatcher = Dispatcher::from_config(config);

    let result = dispatcher
        .rewrite(&RewriteRequest {
            backend: Backend::OpenAi,
            input_text: "測試".to_string(),
            endpoint_url: None,
        })
        .await
        .unwrap();

    assert_eq!(result.rewritten, "模型直接回了一句話");
    assert_eq!(result.explanation, "（模型未返回說明內容）");
    server.await.unwrap();
}

#[tokio::test]
async fn input_is_trimmed_before_scoring() {
    let (server, url) = mock_openai("【改寫】原句【說明】無須修改").await;

    let mut config = test_config();
    config.openai_base_url = url;
    let dispatcher = Dispatcher::from_config(config);

    let result = dispatcher
        .rewrite(&RewriteRequest {
            backend: Backend::OpenAi,
            input_text: "  原句  ".to_string(),
            endpoint_url: None,
        })
        .await
        .unwrap();

    // Identical after trimming: nothing changed.
    assert_eq!(result.diff_ratio, 0.0);
    server.await.unwrap();
}

// ---------------------------------------------------------------------------
// Validation failures happen before any network call (unroutable base URLs
// in test_config would error otherwise).
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_input_is_rejected_without_a_call() {
    let dispatcher = Dispatcher::from_config(test_config());

    for text in ["", "   ", "\n\t "] {
        let err = dispatcher
            .rewrite(&RewriteRequest {
                backend: Backend::OpenAi,
                input_text: text.to_string(),
                endpoint_url: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RewriteError::EmptyInput));
    }
}

#[tokio::test]
async fn custom_backend_requires_a_url() {
    let dispatcher = Dispatcher::from_config(test_config());

    for endpoint_url in [None, Some(String::new()), Some("  ".to_string())] {
        let err = dispatcher
            .rewrite(&RewriteRequest {
                backend: Backend::Custom,
                input_text: "句子".to_string(),
                endpoint_url,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RewriteError::MissingEndpoint));
        assert_eq!(err.user_message(), "請輸入 URL");
    }
}

#[tokio::test]
async fn missing_key_errors_only_for_the_selected_backend() {
    let mut config = test_config();
    config.openai_api_key = None;

    let (server, url) = mock_openai("ignored").await;
    config.anthropic_base_url = url; // reachable, but claude key is present

    let dispatcher = Dispatcher::from_config(config);

    let err = dispatcher
        .rewrite(&RewriteRequest {
            backend: Backend::OpenAi,
            input_text: "句子".to_string(),
            endpoint_url: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RewriteError::MissingApiKey { backend: "openai" }
    ));

    server.abort();
}

// ---------------------------------------------------------------------------
// Empty rewrite halts the flow with the fixed failure message.
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_rewrite_from_custom_backend_is_an_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 16384];
        let _ = socket.read(&mut buf).await;
        let body = r#"{"rewritten":"","explanation":"endpoint declined"}"#;
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
    });

    let dispatcher = Dispatcher::from_config(test_config());
    let err = dispatcher
        .rewrite(&RewriteRequest {
            backend: Backend::Custom,
            input_text: "句子".to_string(),
            endpoint_url: Some(format!("http://127.0.0.1:{port}/rewrite")),
        })
        .await
        .unwrap_err();

    match &err {
        RewriteError::EmptyRewrite { detail } => assert_eq!(detail, "endpoint declined"),
        other => panic!("expected EmptyRewrite, got {other:?}"),
    }
    assert_eq!(err.user_message(), "模型未成功回傳改寫語句");

    server.await.unwrap();
}
