//! AI backend abstraction.
//!
//! The pipeline only sees [`LLMProvider`]; concrete HTTP clients live in
//! [`provider`] and are selected by model id through
//! [`ModelCatalog`](provider::ModelCatalog).

/// Prompt construction.
pub mod prompt;
/// Built-in backends and the model lookup table.
pub mod provider;

use async_trait::async_trait;

use crate::error::Result;

/// Text returned by one backend call.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// First choice's message content, unmodified.
    pub text: String,
    /// Full response body, written to `debug.json` when requested.
    pub raw: serde_json::Value,
}

/// Capability implemented by every text-generation backend.
///
/// One call per invocation. Implementations must not retry: transient
/// failures surface as [`AicError::BackendUnavailable`](crate::error::AicError::BackendUnavailable).
///
/// # Custom Provider Example
/// ```no_run
/// use async_trait::async_trait;
/// use aicommit_rs::error::Result;
/// use aicommit_rs::llm::{Completion, LLMProvider};
///
/// struct Canned;
///
/// #[async_trait]
/// impl LLMProvider for Canned {
///     async fn complete(&self, _system: &str, _user: &str) -> Result<Completion> {
///         Ok(Completion {
///             text: "chore - update".to_string(),
///             raw: serde_json::Value::Null,
///         })
///     }
///
///     fn name(&self) -> &str {
///         "canned"
///     }
/// }
/// ```
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Sends a `(system, user)` prompt pair and returns the generated text.
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<Completion>;

    /// Provider name (used for logs and error messages).
    fn name(&self) -> &str;
}
