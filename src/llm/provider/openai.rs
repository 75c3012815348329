use async_trait::async_trait;
use reqwest::Client;

use super::http::{ChatRequest, send_chat_request};
use super::utils::{CHAT_COMPLETIONS_SUFFIX, DEFAULT_OPENAI_BASE, complete_endpoint};
use crate::config::{AiConfig, NetworkConfig, ProviderConfig};
use crate::error::{AicError, Result};
use crate::llm::{Completion, LLMProvider};

/// OpenAI chat completions backend
///
/// Also works with OpenAI-compatible services through `OPENAI_API_URL`.
///
/// # Configuration example
/// ```toml
/// [ai]
/// model = "gpt-4o-mini"
///
/// [providers.openai]
/// endpoint = "https://api.openai.com/v1" # optional
/// api_key = "sk-..."
/// ```
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OpenAIProvider {
    /// Builds the provider; fails when no API key is configured.
    pub fn new(
        config: &ProviderConfig,
        model: &str,
        ai: &AiConfig,
        network: &NetworkConfig,
    ) -> Result<Self> {
        let api_key = config.plain_api_key()?.ok_or_else(|| {
            AicError::Config(
                rust_i18n::t!(
                    "provider.api_key_missing",
                    provider = "OpenAI",
                    var = "OPENAI_API_KEY"
                )
                .to_string(),
            )
        })?;
        let base = config
            .endpoint
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or(DEFAULT_OPENAI_BASE);

        Ok(Self {
            client: super::create_http_client(network)?,
            api_key,
            endpoint: complete_endpoint(base, CHAT_COMPLETIONS_SUFFIX),
            model: model.to_string(),
            temperature: ai.temperature,
            max_tokens: ai.max_tokens,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<Completion> {
        let mut request = ChatRequest::new(&self.model, system_prompt, user_prompt);
        request.temperature = self.temperature;
        request.max_tokens = self.max_tokens;

        tracing::debug!(
            "OpenAI API request: model={}, system_len={}, user_len={}",
            self.model,
            system_prompt.len(),
            user_prompt.len()
        );

        let auth_header = format!("Bearer {}", self.api_key);
        send_chat_request(
            &self.client,
            &self.endpoint,
            &[("Authorization", auth_header.as_str())],
            &request,
            "OpenAI",
        )
        .await
    }

    fn name(&self) -> &str {
        "openai"
    }
}
