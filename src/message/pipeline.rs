//! 生成 commit message 的完整决策流程

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::json;

use super::directive::{has_skip_directive, is_merge_conflict_resolution, strip_skip_directive};
use super::postprocess::post_process;
use super::provider::RepositoryProvider;
use crate::cache::{self, ResponseCache, cache_key};
use crate::config::AppConfig;
use crate::constants::DEBUG_FILE;
use crate::constants::commit::FALLBACK_MESSAGE;
use crate::error::{AicError, Result};
use crate::git::GitOperations;
use crate::git::diff::filter_lockfile_hunks;
use crate::llm::LLMProvider;
use crate::llm::prompt::{build_system_prompt, build_user_prompt};
use crate::llm::provider::{ModelCatalog, create_provider};

/// Input of one invocation.
///
/// `branch` and `diff` are looked up through git when absent or empty;
/// the draft message is always supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    pub branch: Option<String>,
    pub message: String,
    pub diff: Option<String>,
    pub debug: bool,
}

/// Which path a draft message takes through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// Auto-generated merge message, returned verbatim.
    Passthrough,
    /// Post-process this text without calling the backend.
    Draft(&'a str),
    /// Ask the backend.
    Generate,
}

/// Decides the path for `message`; first match wins.
///
/// 1. merge message → [`Route::Passthrough`]
/// 2. trailing skip directive → [`Route::Draft`] with the directive removed
/// 3. API disabled → [`Route::Draft`] with the draft (or a fixed fallback)
/// 4. otherwise → [`Route::Generate`]
pub fn route(message: &str, disable_api: bool) -> Route<'_> {
    if is_merge_conflict_resolution(message) {
        return Route::Passthrough;
    }
    if has_skip_directive(message) {
        return Route::Draft(strip_skip_directive(message).trim());
    }
    if disable_api {
        return Route::Draft(draft_or_fallback(message));
    }
    Route::Generate
}

fn draft_or_fallback(message: &str) -> &str {
    let draft = message.trim();
    if draft.is_empty() {
        FALLBACK_MESSAGE
    } else {
        draft
    }
}

/// Orchestrates detectors, diff filtering, the cached backend call and
/// post-processing.
///
/// The backend is only constructed on a cache miss, so the skip and
/// API-disabled paths need no API key.
///
/// # Example
/// ```no_run
/// use aicommit_rs::config::load_config;
/// use aicommit_rs::git::repository::GitRepository;
/// use aicommit_rs::message::{CommitMessagePipeline, GenerationRequest};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = load_config()?;
/// let repo = GitRepository::open()?;
/// let pipeline = CommitMessagePipeline::new(&repo, &config);
///
/// let request = GenerationRequest {
///     message: "wip".to_string(),
///     ..Default::default()
/// };
/// println!("{}", pipeline.run(&request).await?);
/// # Ok(())
/// # }
/// ```
pub struct CommitMessagePipeline<'a, G: GitOperations> {
    git: &'a G,
    config: &'a AppConfig,
    cache: Box<dyn ResponseCache + 'a>,
    provider: Option<Arc<dyn LLMProvider>>,
    debug_path: PathBuf,
}

impl<'a, G: GitOperations> CommitMessagePipeline<'a, G> {
    pub fn new(git: &'a G, config: &'a AppConfig) -> Self {
        Self {
            git,
            config,
            cache: cache::from_config(&config.cache),
            provider: None,
            debug_path: PathBuf::from(DEBUG_FILE),
        }
    }

    /// Uses `provider` instead of building one from the model catalog.
    pub fn with_provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_cache(mut self, cache: Box<dyn ResponseCache + 'a>) -> Self {
        self.cache = cache;
        self
    }

    /// Where `--debug` writes the raw response (default `./debug.json`).
    pub fn with_debug_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.debug_path = path.into();
        self
    }

    /// Produces the final commit message.
    ///
    /// # Errors
    /// - [`AicError::DiffTooLarge`] when the filtered diff exceeds `commit.max_diff_size`
    /// - [`AicError::InsufficientInput`] when branch and filtered diff are both empty
    /// - [`AicError::UnsupportedModel`] for a model outside the catalog
    /// - backend errors, unless `ai.ignore_api_errors` is set
    pub async fn run(&self, request: &GenerationRequest) -> Result<String> {
        let message = request.message.as_str();

        let draft = match route(message, self.config.ai.disable_api) {
            Route::Passthrough => {
                tracing::debug!("Merge message detected, leaving it untouched");
                return Ok(message.to_string());
            }
            Route::Draft(text) => Some(text),
            Route::Generate => None,
        };

        let branch = self.resolve_branch(request)?;

        if let Some(text) = draft {
            tracing::debug!("Skipping AI backend, post-processing the draft");
            return Ok(self.finish(text, &branch, message));
        }

        let diff = filter_lockfile_hunks(&self.resolve_diff(request)?);

        let max = self.config.commit.max_diff_size;
        if diff.len() > max {
            return Err(AicError::DiffTooLarge {
                size: diff.len(),
                max,
            });
        }

        if branch.is_empty() && diff.is_empty() {
            return Err(AicError::InsufficientInput);
        }

        let generated = match self.generate(&branch, message, &diff, request.debug).await {
            Ok(text) => text,
            Err(e) if self.config.ai.ignore_api_errors && e.is_backend_failure() => {
                tracing::warn!("AI backend failed, falling back to the draft: {}", e);
                draft_or_fallback(message).to_string()
            }
            Err(e) => return Err(e),
        };

        Ok(self.finish(&generated, &branch, message))
    }

    async fn generate(&self, branch: &str, message: &str, diff: &str, debug: bool) -> Result<String> {
        let model = ModelCatalog::resolve(&self.config.ai.model)?.id;

        let key = cache_key(model, branch, message, diff);
        match self.cache.load(&key, model) {
            Ok(Some(cached)) => {
                if debug {
                    self.write_debug(&json!({
                        "cached": true,
                        "model": model,
                        "response": cached,
                    }));
                }
                return Ok(cached);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Cache lookup failed, calling backend: {}", e),
        }

        let provider = match &self.provider {
            Some(provider) => Arc::clone(provider),
            None => create_provider(self.config)?,
        };

        let system = build_system_prompt(self.config.ai.use_emoji);
        let user = build_user_prompt(branch, message, diff);
        tracing::debug!(
            "Calling {} ({}), prompt {} + {} bytes",
            provider.name(),
            model,
            system.len(),
            user.len()
        );

        let completion = provider.complete(&system, &user).await?;
        let text = completion.text.trim().to_string();

        if let Err(e) = self.cache.store(&key, model, &text) {
            tracing::warn!("Failed to cache response: {}", e);
        }
        if debug {
            self.write_debug(&completion.raw);
        }

        Ok(text)
    }

    fn finish(&self, text: &str, branch: &str, original_message: &str) -> String {
        post_process(text, branch, original_message, self.repository_provider())
    }

    fn resolve_branch(&self, request: &GenerationRequest) -> Result<String> {
        if let Some(branch) = non_empty(&request.branch) {
            return Ok(branch.to_string());
        }
        Ok(self.git.current_branch()?.unwrap_or_default())
    }

    fn resolve_diff(&self, request: &GenerationRequest) -> Result<String> {
        if let Some(diff) = non_empty(&request.diff) {
            return Ok(diff.to_string());
        }
        self.git.staged_diff()
    }

    /// 远程地址查询失败时按未识别处理（只影响前缀规则）
    fn repository_provider(&self) -> RepositoryProvider {
        match self.git.remote_origin_url() {
            Ok(Some(url)) => RepositoryProvider::from_remote_url(&url),
            Ok(None) => RepositoryProvider::Unidentified,
            Err(e) => {
                tracing::debug!("Could not read remote.origin.url: {}", e);
                RepositoryProvider::Unidentified
            }
        }
    }

    fn write_debug(&self, value: &serde_json::Value) {
        let result = serde_json::to_string_pretty(value)
            .map_err(AicError::from)
            .and_then(|json| std::fs::write(&self.debug_path, json).map_err(AicError::from));
        match result {
            Ok(()) => tracing::debug!("Wrote {}", self.debug_path.display()),
            Err(e) => tracing::warn!("Failed to write {}: {}", self.debug_path.display(), e),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
