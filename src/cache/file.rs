use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{Duration, Utc};

use super::{CacheEntry, ResponseCache};
use crate::error::{AicError, Result};

/// One `<key>.json` file per entry under a cache directory.
///
/// Writes go through a temp file in the same directory followed by a rename,
/// so concurrent readers never see a partial entry. Last writer wins.
#[derive(Debug, Clone)]
pub struct FileResponseCache {
    dir: PathBuf,
    max_age: Duration,
}

impl FileResponseCache {
    pub fn new(dir: impl Into<PathBuf>, max_age_days: i64) -> Self {
        Self {
            dir: dir.into(),
            max_age: Duration::days(max_age_days),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn discard(&self, path: &Path, reason: &str) {
        tracing::info!("Discarding cache entry {} ({})", path.display(), reason);
        if let Err(e) = fs::remove_file(path)
            && e.kind() != ErrorKind::NotFound
        {
            tracing::warn!("Failed to remove cache entry {}: {}", path.display(), e);
        }
    }
}

impl ResponseCache for FileResponseCache {
    fn load(&self, key: &str, model: &str) -> Result<Option<String>> {
        let path = self.entry_path(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let entry: CacheEntry = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(_) => {
                self.discard(&path, "malformed");
                return Ok(None);
            }
        };

        if !entry.is_intact() {
            self.discard(&path, "checksum mismatch");
            return Ok(None);
        }

        if entry.model != model {
            tracing::debug!(
                "Cache entry {} belongs to model {}, wanted {}",
                key,
                entry.model,
                model
            );
            return Ok(None);
        }

        if Utc::now() - entry.timestamp > self.max_age {
            self.discard(&path, "expired");
            return Ok(None);
        }

        tracing::info!("Cache hit: {}", key);
        Ok(Some(entry.response))
    }

    fn store(&self, key: &str, model: &str, response: &str) -> Result<()> {
        let entry = CacheEntry::new(model, response);
        let data = serde_json::to_vec_pretty(&entry)?;

        fs::create_dir_all(&self.dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&data)?;
        tmp.flush()?;

        let path = self.entry_path(key);
        tmp.persist(&path).map_err(|e| {
            AicError::Cache(format!("Failed to persist {}: {}", path.display(), e.error))
        })?;

        tracing::info!("Cached response: {}", key);
        Ok(())
    }
}
