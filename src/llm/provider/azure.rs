use async_trait::async_trait;
use reqwest::Client;

use super::http::{ChatRequest, send_chat_request};
use super::utils::{CHAT_COMPLETIONS_SUFFIX, complete_endpoint, with_query_param};
use crate::config::{AiConfig, NetworkConfig, ProviderConfig};
use crate::constants::llm::AZURE_API_VERSION;
use crate::error::{AicError, Result};
use crate::llm::{Completion, LLMProvider};

/// Azure AI inference backend (Llama family models)
///
/// The endpoint has no default and must point at the deployment, for example
/// `https://<resource>.services.ai.azure.com/models`.
///
/// # Configuration example
/// ```toml
/// [ai]
/// model = "llama-3.3-70b-instruct"
///
/// [providers.llama]
/// endpoint = "https://my-resource.services.ai.azure.com/models"
/// api_key = "..."
/// ```
pub struct AzureInferenceProvider {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl AzureInferenceProvider {
    pub fn new(
        config: &ProviderConfig,
        model: &str,
        ai: &AiConfig,
        network: &NetworkConfig,
    ) -> Result<Self> {
        let base = config
            .endpoint
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| {
                AicError::Config(
                    rust_i18n::t!(
                        "provider.endpoint_missing",
                        provider = "Azure AI inference",
                        var = "LLAMA_API_URL"
                    )
                    .to_string(),
                )
            })?;
        let api_key = config.plain_api_key()?.ok_or_else(|| {
            AicError::Config(
                rust_i18n::t!(
                    "provider.api_key_missing",
                    provider = "Azure AI inference",
                    var = "LLAMA_API_KEY"
                )
                .to_string(),
            )
        })?;

        let endpoint = with_query_param(
            &complete_endpoint(base, CHAT_COMPLETIONS_SUFFIX),
            "api-version",
            AZURE_API_VERSION,
        );

        Ok(Self {
            client: super::create_http_client(network)?,
            api_key,
            endpoint,
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
impl LLMProvider for AzureInferenceProvider {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<Completion> {
        let mut request = ChatRequest::new(&self.model, system_prompt, user_prompt);
        request.temperature = self.temperature;
        request.max_tokens = self.max_tokens;

        tracing::debug!(
            "Azure inference request: model={}, system_len={}, user_len={}",
            self.model,
            system_prompt.len(),
            user_prompt.len()
        );

        send_chat_request(
            &self.client,
            &self.endpoint,
            &[("api-key", self.api_key.as_str())],
            &request,
            "Azure AI inference",
        )
        .await
    }

    fn name(&self) -> &str {
        "azure-inference"
    }
}
