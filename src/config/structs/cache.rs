//! Response cache configuration.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::constants::APP_NAME;
use crate::constants::cache::{CACHE_SUBDIR, DEFAULT_MAX_AGE_DAYS};
use crate::error::{AicError, Result};

/// Response cache configuration.
///
/// # Fields
/// - `enabled`: whether backend responses are cached (default: `true`)
/// - `path`: cache root, also settable through `COMMIT_CACHE_PATH`
/// - `max_age_days`: entries older than this are discarded (default: `30`)
///
/// # Example
/// ```toml
/// [cache]
/// enabled = true
/// path = "/tmp/aicommit"
/// max_age_days = 7
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default = "default_max_age_days")]
    pub max_age_days: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
            max_age_days: default_max_age_days(),
        }
    }
}

impl CacheConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_age_days <= 0 {
            return Err(AicError::Config(
                "cache.max_age_days must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Directory holding the `<hash>.json` entries.
    ///
    /// `<path>/aicommit/commit-cache` when a root is configured, otherwise the
    /// platform cache directory.
    pub fn resolve_dir(&self) -> Option<PathBuf> {
        match &self.path {
            Some(root) => Some(root.join(APP_NAME).join(CACHE_SUBDIR)),
            None => ProjectDirs::from("", "", APP_NAME)
                .map(|dirs| dirs.cache_dir().join(CACHE_SUBDIR)),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_age_days() -> i64 {
    DEFAULT_MAX_AGE_DAYS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_dir_with_custom_root() {
        let config = CacheConfig {
            path: Some(PathBuf::from("/tmp/custom")),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_dir(),
            Some(PathBuf::from("/tmp/custom/aicommit/commit-cache"))
        );
    }

    #[test]
    fn test_validate_rejects_non_positive_age() {
        let config = CacheConfig {
            max_age_days: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
