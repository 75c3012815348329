//! Commit message pipeline limits.

use serde::{Deserialize, Serialize};

use crate::constants::commit::MAX_DIFF_SIZE;
use crate::error::{AicError, Result};

/// Commit message pipeline configuration.
///
/// # Example
/// ```toml
/// [commit]
/// max_diff_size = 102400
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommitConfig {
    /// Largest filtered diff (in UTF-8 bytes) that may be sent to the backend.
    /// A diff of exactly this size is accepted.
    #[serde(default = "default_max_diff_size")]
    pub max_diff_size: usize,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            max_diff_size: default_max_diff_size(),
        }
    }
}

impl CommitConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_diff_size == 0 {
            return Err(AicError::Config("commit.max_diff_size cannot be 0".into()));
        }
        Ok(())
    }
}

fn default_max_diff_size() -> usize {
    MAX_DIFF_SIZE
}
