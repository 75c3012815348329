//! Backend 集成测试
//!
//! 使用 mockito 模拟 OpenAI 兼容接口和 Azure AI inference 接口

use aicommit_rs::error::AicError;
use aicommit_rs::git::NoRepository;
use aicommit_rs::llm::provider::ModelCatalog;
use aicommit_rs::llm::provider::test_utils::{
    completion_body, ensure_crypto_provider, test_app_config,
};
use aicommit_rs::message::{CommitMessagePipeline, GenerationRequest};
use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;

const SYSTEM: &str = "classify";
const USER: &str = "Branch: main";

// ========== OpenAI ==========

#[tokio::test]
async fn test_openai_success_uses_bearer_auth() {
    ensure_crypto_provider();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "model": "gpt-4o-mini",
            "messages": [
                {"role": "system", "content": SYSTEM},
                {"role": "user", "content": USER}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("  feat - add login page \n"))
        .create_async()
        .await;

    let config = test_app_config("gpt-4o-mini", &server.url(), Some("sk-test"));
    let provider = ModelCatalog::create(&config).unwrap();
    assert_eq!(provider.name(), "openai");

    let completion = provider.complete(SYSTEM, USER).await.unwrap();
    assert_eq!(completion.text.trim(), "feat - add login page");
    assert_eq!(completion.raw["object"], "chat.completion");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_model_id_is_sent_in_catalog_spelling() {
    ensure_crypto_provider();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::PartialJsonString(
            r#"{"model":"gpt-4o-mini"}"#.to_string(),
        ))
        .with_status(200)
        .with_body(completion_body("feat - add login page"))
        .create_async()
        .await;

    let config = test_app_config(" GPT-4o-Mini ", &server.url(), Some("sk-test"));
    let provider = ModelCatalog::create(&config).unwrap();

    let completion = provider.complete(SYSTEM, USER).await.unwrap();
    assert_eq!(completion.text, "feat - add login page");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_azure_model_id_is_sent_in_catalog_spelling() {
    ensure_crypto_provider();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_query(Matcher::Any)
        .match_body(Matcher::PartialJsonString(
            r#"{"model":"llama-3.3-70b-instruct"}"#.to_string(),
        ))
        .with_status(200)
        .with_body(completion_body("fix - handle nulls"))
        .create_async()
        .await;

    let config = test_app_config("LLAMA-3.3-70B-Instruct", &server.url(), Some("secret"));
    let provider = ModelCatalog::create(&config).unwrap();

    provider.complete(SYSTEM, USER).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_configured_sampling_fields_are_sent() {
    ensure_crypto_provider();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "model": "gpt-4.1",
            "temperature": 0.5,
            "max_tokens": 64
        })))
        .with_status(200)
        .with_body(completion_body("chore - tidy"))
        .create_async()
        .await;

    let mut config = test_app_config("gpt-4.1", &server.url(), Some("sk-test"));
    config.ai.temperature = Some(0.5);
    config.ai.max_tokens = Some(64);
    let provider = ModelCatalog::create(&config).unwrap();

    provider.complete(SYSTEM, USER).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_openai_401_is_api_error() {
    ensure_crypto_provider();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
        .create_async()
        .await;

    let config = test_app_config("gpt-4o", &server.url(), Some("sk-invalid"));
    let provider = ModelCatalog::create(&config).unwrap();

    match provider.complete(SYSTEM, USER).await {
        Err(err @ AicError::LlmApi { status: 401, .. }) => {
            assert!(err.to_string().contains("Incorrect API key"));
            assert!(err.suggestion().unwrap().contains("API key"));
        }
        other => panic!("Expected LlmApi 401, got {:?}", other.map(|c| c.text)),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rate_limit_and_server_errors_are_unavailable() {
    ensure_crypto_provider();

    for status in [429, 500, 503] {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(status)
            .with_body("try later")
            .expect(1)
            .create_async()
            .await;

        let config = test_app_config("gpt-4o-mini", &server.url(), Some("sk-test"));
        let provider = ModelCatalog::create(&config).unwrap();

        let result = provider.complete(SYSTEM, USER).await;
        assert!(
            matches!(result, Err(AicError::BackendUnavailable(_))),
            "status {} should be BackendUnavailable",
            status
        );
        // 不自动重试
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_connection_refused_is_unavailable() {
    ensure_crypto_provider();
    let config = test_app_config("gpt-4o-mini", "http://127.0.0.1:1", Some("sk-test"));
    let provider = ModelCatalog::create(&config).unwrap();

    let result = provider.complete(SYSTEM, USER).await;
    assert!(matches!(result, Err(AicError::BackendUnavailable(_))));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    ensure_crypto_provider();
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let config = test_app_config("gpt-4o-mini", &server.url(), Some("sk-test"));
    let provider = ModelCatalog::create(&config).unwrap();

    match provider.complete(SYSTEM, USER).await {
        Err(err @ AicError::Llm(_)) => {
            assert!(err.to_string().contains("Failed to parse"));
            assert!(err.suggestion().is_some());
        }
        other => panic!("Expected Llm parse error, got {:?}", other.map(|c| c.text)),
    }
}

#[tokio::test]
async fn test_missing_openai_key_is_config_error() {
    ensure_crypto_provider();
    let config = test_app_config("gpt-4o-mini", "http://localhost", None);

    match ModelCatalog::create(&config) {
        Err(err @ AicError::Config(_)) => {
            assert!(err.to_string().contains("OPENAI_API_KEY"));
            assert!(err.suggestion().unwrap().contains("set-settings"));
        }
        Err(other) => panic!("Expected Config error, got {:?}", other),
        Ok(_) => panic!("Expected Config error"),
    }
}

// ========== Azure AI inference ==========

#[tokio::test]
async fn test_azure_uses_api_key_header_and_version() {
    ensure_crypto_provider();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_query(Matcher::UrlEncoded(
            "api-version".into(),
            "2024-05-01-preview".into(),
        ))
        .match_header("api-key", "llama-secret")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "model": "llama-3.3-70b-instruct"
        })))
        .with_status(200)
        .with_body(completion_body("fix - guard against empty branch"))
        .create_async()
        .await;

    let config = test_app_config("llama-3.3-70b-instruct", &server.url(), Some("llama-secret"));
    let provider = ModelCatalog::create(&config).unwrap();
    assert_eq!(provider.name(), "azure-inference");

    let completion = provider.complete(SYSTEM, USER).await.unwrap();
    assert_eq!(completion.text, "fix - guard against empty branch");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_azure_requires_endpoint() {
    ensure_crypto_provider();
    let mut config = test_app_config("llama-3.3-70b-instruct", "http://x", Some("k"));
    config.providers.llama.endpoint = None;

    match ModelCatalog::create(&config) {
        Err(AicError::Config(msg)) => assert!(msg.contains("LLAMA_API_URL")),
        Err(other) => panic!("Expected Config error, got {:?}", other),
        Ok(_) => panic!("Expected Config error"),
    }
}

#[tokio::test]
async fn test_unknown_model_is_rejected() {
    let config = test_app_config("gpt-2", "http://localhost", Some("sk-test"));
    assert!(matches!(
        ModelCatalog::create(&config),
        Err(AicError::UnsupportedModel(m)) if m == "gpt-2"
    ));
}

// ========== 完整流程 ==========

#[tokio::test]
async fn test_pipeline_against_mock_backend() {
    ensure_crypto_provider();
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("Original message: add retry".to_string()))
        .with_status(200)
        .with_body(completion_body("type - feat - add retry to uploader"))
        .create_async()
        .await;

    let mut config = test_app_config("gpt-4o-mini", &server.url(), Some("sk-test"));
    config.cache.enabled = false;
    let git = NoRepository::new("not a git repository");
    let request = GenerationRequest {
        branch: Some("feature/UP-77-retry".to_string()),
        message: "add retry".to_string(),
        diff: Some("diff --git a/up.rs b/up.rs\n+retry();\n".to_string()),
        debug: false,
    };

    let message = CommitMessagePipeline::new(&git, &config)
        .run(&request)
        .await
        .unwrap();

    assert_eq!(message, "[UP-77] feat - add retry to uploader");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_ignore_api_errors_falls_back_to_draft() {
    ensure_crypto_provider();
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(503)
        .create_async()
        .await;

    let mut config = test_app_config("gpt-4o-mini", &server.url(), Some("sk-test"));
    config.cache.enabled = false;
    config.ai.ignore_api_errors = true;
    let git = NoRepository::new("not a git repository");
    let request = GenerationRequest {
        branch: Some("feature/UP-77-retry".to_string()),
        message: "add retry".to_string(),
        diff: Some("diff --git a/up.rs b/up.rs\n+retry();\n".to_string()),
        debug: false,
    };

    let message = CommitMessagePipeline::new(&git, &config)
        .run(&request)
        .await
        .unwrap();
    assert_eq!(message, "[UP-77] add retry");
}
