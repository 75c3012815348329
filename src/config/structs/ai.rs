//! AI backend configuration structures.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::constants::llm::DEFAULT_MODEL;
use crate::error::{AicError, Result};

/// Generation behavior.
///
/// # Fields
/// - `model`: model id, resolved through the model catalog (default: `gpt-4o-mini`)
/// - `disable_api`: never call the backend, post-process the draft instead
/// - `ignore_api_errors`: fall back to the draft when the backend call fails
/// - `use_emoji`: ask the backend to start the description with an emoji
///
/// # Example
/// ```toml
/// [ai]
/// model = "gpt-4o-mini"
/// disable_api = false
/// ignore_api_errors = false
/// use_emoji = false
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AiConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub disable_api: bool,

    #[serde(default)]
    pub ignore_api_errors: bool,

    #[serde(default)]
    pub use_emoji: bool,

    /// Sampling temperature in `0.0..=2.0`.
    #[serde(default)]
    pub temperature: Option<f32>,

    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            disable_api: false,
            ignore_api_errors: false,
            use_emoji: false,
            temperature: None,
            max_tokens: None,
        }
    }
}

impl AiConfig {
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(AicError::Config("ai.model cannot be empty".into()));
        }
        if let Some(temp) = self.temperature
            && !(0.0..=2.0).contains(&temp)
        {
            return Err(AicError::Config(format!(
                "ai.temperature {} out of range [0.0, 2.0]",
                temp
            )));
        }
        Ok(())
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

/// Connection settings of one backend family.
///
/// # Example
/// ```toml
/// [providers.openai]
/// endpoint = "https://api.openai.com/v1"
/// api_key = "c2stLi4u"
/// key_encrypted = true
/// ```
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default)]
    pub api_key: Option<String>,

    /// `api_key` is stored base64-encoded. This is obfuscation, not encryption.
    #[serde(default)]
    pub key_encrypted: bool,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use crate::llm::provider::utils::mask_api_key;
        let masked_key = self.api_key.as_deref().map(mask_api_key);
        f.debug_struct("ProviderConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &masked_key)
            .field("key_encrypted", &self.key_encrypted)
            .finish()
    }
}

impl ProviderConfig {
    /// Returns the usable API key, decoding it when `key_encrypted` is set.
    ///
    /// Blank keys count as absent.
    pub fn plain_api_key(&self) -> Result<Option<String>> {
        let Some(key) = self.api_key.as_deref().map(str::trim) else {
            return Ok(None);
        };
        if key.is_empty() {
            return Ok(None);
        }
        if !self.key_encrypted {
            return Ok(Some(key.to_string()));
        }

        let bytes = STANDARD
            .decode(key)
            .map_err(|e| AicError::Config(format!("Failed to decode encrypted API key: {}", e)))?;
        let decoded = String::from_utf8(bytes)
            .map_err(|_| AicError::Config("Encrypted API key is not valid UTF-8".into()))?;
        Ok(Some(decoded))
    }
}

/// Backend families.
///
/// `openai` serves the OpenAI-compatible chat completions models,
/// `llama` the Azure AI inference models.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProvidersConfig {
    #[serde(default = "default_openai")]
    pub openai: ProviderConfig,

    #[serde(default)]
    pub llama: ProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            openai: default_openai(),
            llama: ProviderConfig::default(),
        }
    }
}

fn default_openai() -> ProviderConfig {
    ProviderConfig {
        endpoint: Some(crate::llm::provider::utils::DEFAULT_OPENAI_BASE.to_string()),
        ..Default::default()
    }
}
