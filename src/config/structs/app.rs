//! Top-level application configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::ai::{AiConfig, ProvidersConfig};
use super::cache::CacheConfig;
use super::commit::CommitConfig;
use super::network::NetworkConfig;

/// Application configuration.
///
/// Built once at startup and passed explicitly to every command.
///
/// Effective configuration is merged from multiple sources (low to high):
/// 1. Rust defaults (`Default` + `serde(default)`)
/// 2. User-level config file (platform-specific config directory)
/// 3. Well-known variables (`AI_MODEL`, `OPENAI_API_KEY`, ...) persisted in the
///    `[env]` table, user scope over machine scope
/// 4. `AICOMMIT__*` environment variables
/// 5. Well-known variables in the process environment
/// 6. Command-line flags
///
/// # Configuration File Locations
/// - Linux: `~/.config/aicommit/config.toml`
/// - macOS: `~/Library/Application Support/aicommit/config.toml`
/// - Windows: `%APPDATA%\aicommit\config\config.toml`
///
/// # Example
/// ```toml
/// [ai]
/// model = "gpt-4o-mini"
///
/// [providers.openai]
/// api_key = "sk-..."
///
/// [cache]
/// max_age_days = 30
///
/// [env]
/// DOTNET_AICOMMITMESSAGE_USE_EMOJI = "true"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub providers: ProvidersConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub commit: CommitConfig,

    #[serde(default)]
    pub ui: UIConfig,
}

impl AppConfig {
    /// Validates configuration consistency.
    pub fn validate(&self) -> Result<()> {
        self.ai.validate()?;
        self.network.validate()?;
        self.cache.validate()?;
        self.commit.validate()?;
        Ok(())
    }
}

/// UI configuration.
///
/// # Example
/// ```toml
/// [ui]
/// colored = true
/// language = "en"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UIConfig {
    /// Whether to enable color output.
    #[serde(default = "default_true")]
    pub colored: bool,

    /// UI language in BCP 47 format. `None` means auto-detect from system locale.
    #[serde(default)]
    pub language: Option<String>,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            colored: true,
            language: None,
        }
    }
}

fn default_true() -> bool {
    true
}
