//! Test utilities for provider tests

use crate::config::{AppConfig, ProviderConfig};

/// 在测试中安装 rustls crypto provider
///
/// reqwest 0.13 + rustls-no-provider 需要手动安装 crypto provider，
/// 生产代码在 main.rs 中完成，测试需要单独调用。
/// 多次调用是安全的（install_default 失败时忽略即可）。
pub fn ensure_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// `AppConfig` pointing the given model at a mock server
///
/// # Example
/// ```
/// use aicommit_rs::llm::provider::test_utils::test_app_config;
///
/// let config = test_app_config("gpt-4o-mini", "http://localhost:8080", Some("sk-test"));
/// assert_eq!(config.ai.model, "gpt-4o-mini");
/// assert_eq!(config.providers.openai.api_key.as_deref(), Some("sk-test"));
/// ```
pub fn test_app_config(model: &str, base_url: &str, api_key: Option<&str>) -> AppConfig {
    let provider = ProviderConfig {
        endpoint: Some(base_url.to_string()),
        api_key: api_key.map(str::to_string),
        key_encrypted: false,
    };

    let mut config = AppConfig::default();
    config.ai.model = model.to_string();
    config.providers.openai = provider.clone();
    config.providers.llama = provider;
    config
}

/// Minimal successful chat completions body
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "test",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}
