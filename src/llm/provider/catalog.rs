//! Model id → backend family lookup table.

use std::sync::Arc;

use super::azure::AzureInferenceProvider;
use super::openai::OpenAIProvider;
use crate::config::AppConfig;
use crate::error::{AicError, Result};
use crate::llm::LLMProvider;

/// Backend families a model can be served by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// OpenAI-compatible chat completions, bearer auth.
    OpenAI,
    /// Azure AI inference chat completions, `api-key` header.
    AzureInference,
}

type Constructor = fn(&AppConfig, &'static str) -> Result<Arc<dyn LLMProvider>>;

impl BackendKind {
    /// Variable holding the API key.
    pub fn key_var(self) -> &'static str {
        match self {
            BackendKind::OpenAI => "OPENAI_API_KEY",
            BackendKind::AzureInference => "LLAMA_API_KEY",
        }
    }

    /// Variable holding the endpoint URL.
    pub fn url_var(self) -> &'static str {
        match self {
            BackendKind::OpenAI => "OPENAI_API_URL",
            BackendKind::AzureInference => "LLAMA_API_URL",
        }
    }

    /// Variable marking the API key as base64-encoded.
    pub fn encrypted_var(self) -> &'static str {
        match self {
            BackendKind::OpenAI => "OPENAI_KEY_ENCRYPTED",
            BackendKind::AzureInference => "LLAMA_KEY_ENCRYPTED",
        }
    }

    fn constructor(self) -> Constructor {
        match self {
            BackendKind::OpenAI => build_openai,
            BackendKind::AzureInference => build_azure,
        }
    }
}

fn build_openai(config: &AppConfig, model: &'static str) -> Result<Arc<dyn LLMProvider>> {
    let provider =
        OpenAIProvider::new(&config.providers.openai, model, &config.ai, &config.network)?;
    Ok(Arc::new(provider))
}

fn build_azure(config: &AppConfig, model: &'static str) -> Result<Arc<dyn LLMProvider>> {
    let provider =
        AzureInferenceProvider::new(&config.providers.llama, model, &config.ai, &config.network)?;
    Ok(Arc::new(provider))
}

const MODELS: &[(&str, BackendKind)] = &[
    ("gpt-4o", BackendKind::OpenAI),
    ("gpt-4o-mini", BackendKind::OpenAI),
    ("gpt-4.1", BackendKind::OpenAI),
    ("gpt-4.1-mini", BackendKind::OpenAI),
    ("gpt-4.1-nano", BackendKind::OpenAI),
    ("gpt-5", BackendKind::OpenAI),
    ("gpt-5-mini", BackendKind::OpenAI),
    ("gpt-5.1", BackendKind::OpenAI),
    ("o3-mini", BackendKind::OpenAI),
    ("o4-mini", BackendKind::OpenAI),
    ("llama-3-1-405b-instruct", BackendKind::AzureInference),
    ("llama-3.3-70b-instruct", BackendKind::AzureInference),
    ("meta-llama-3.1-405b-instruct", BackendKind::AzureInference),
    ("meta-llama-3.1-70b-instruct", BackendKind::AzureInference),
];

/// A catalog entry matched by [`ModelCatalog::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedModel {
    /// Canonical id as written in the table; sent to the backend and used in cache keys.
    pub id: &'static str,
    pub kind: BackendKind,
}

/// Closed set of supported model ids.
pub struct ModelCatalog;

impl ModelCatalog {
    /// Catalog entry for `model` (trimmed, case-insensitive).
    ///
    /// # Errors
    /// [`AicError::UnsupportedModel`] for ids outside the table.
    pub fn resolve(model: &str) -> Result<ResolvedModel> {
        let wanted = model.trim();
        MODELS
            .iter()
            .find(|(id, _)| id.eq_ignore_ascii_case(wanted))
            .map(|&(id, kind)| ResolvedModel { id, kind })
            .ok_or_else(|| AicError::UnsupportedModel(model.to_string()))
    }

    /// Every supported model id, in table order.
    pub fn models() -> impl Iterator<Item = &'static str> {
        MODELS.iter().map(|(id, _)| *id)
    }

    /// Builds the provider for `config.ai.model`.
    pub fn create(config: &AppConfig) -> Result<Arc<dyn LLMProvider>> {
        let resolved = Self::resolve(&config.ai.model)?;
        tracing::debug!("Model {} served by {:?}", resolved.id, resolved.kind);
        (resolved.kind.constructor())(config, resolved.id)
    }
}
