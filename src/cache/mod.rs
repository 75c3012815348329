//! Hash-keyed response cache.
//!
//! Entries are addressed by a SHA-256 of `model|branch|message|diff`, so the
//! same request never reaches the backend twice while its entry is fresh.

mod file;

pub use file::FileResponseCache;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::CacheConfig;
use crate::error::Result;

/// 单个缓存条目（磁盘上的 JSON 格式）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub model: String,
    pub response: String,
    /// `sha256_hex("<model>|<response>")`，用于发现损坏而不是防篡改
    pub checksum: String,
    pub timestamp: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(model: &str, response: &str) -> Self {
        Self {
            model: model.to_string(),
            response: response.to_string(),
            checksum: entry_checksum(model, response),
            timestamp: Utc::now(),
        }
    }

    pub fn is_intact(&self) -> bool {
        self.checksum == entry_checksum(&self.model, &self.response)
    }
}

/// Cache contract consumed by the pipeline.
pub trait ResponseCache {
    /// Fresh response stored under `key` for `model`, if any.
    ///
    /// Expired or corrupted entries are removed and reported as a miss.
    fn load(&self, key: &str, model: &str) -> Result<Option<String>>;

    /// Stores `response` under `key`, replacing any previous entry.
    fn store(&self, key: &str, model: &str, response: &str) -> Result<()>;
}

/// Cache used when `cache.enabled = false`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

impl ResponseCache for NoopCache {
    fn load(&self, _key: &str, _model: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn store(&self, _key: &str, _model: &str, _response: &str) -> Result<()> {
        Ok(())
    }
}

/// Builds the cache described by the configuration.
pub fn from_config(config: &CacheConfig) -> Box<dyn ResponseCache> {
    if !config.enabled {
        return Box::new(NoopCache);
    }
    match config.resolve_dir() {
        Some(dir) => Box::new(FileResponseCache::new(dir, config.max_age_days)),
        None => {
            tracing::warn!("No cache directory available, caching disabled");
            Box::new(NoopCache)
        }
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Cache key of one request.
///
/// Fields are joined with `|`; a `|` or `\` inside a field is backslash-escaped
/// so distinct tuples never produce the same hashed text.
pub fn cache_key(model: &str, branch: &str, message: &str, diff: &str) -> String {
    let joined = [model, branch, message, diff]
        .iter()
        .map(|field| escape_field(field))
        .collect::<Vec<_>>()
        .join("|");
    sha256_hex(joined.as_bytes())
}

fn entry_checksum(model: &str, response: &str) -> String {
    sha256_hex(format!("{}|{}", model, response).as_bytes())
}

fn escape_field(field: &str) -> std::borrow::Cow<'_, str> {
    if field.contains(['|', '\\']) {
        field.replace('\\', "\\\\").replace('|', "\\|").into()
    } else {
        field.into()
    }
}
