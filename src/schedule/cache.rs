/// JSON file cache for fetched snapshots
///
/// Persists the last fetched payload with an update stamp so a
/// restart within the TTL serves from disk instead of refetching.
/// A missing or corrupt file just starts the cache empty.

use crate::error::Result;
use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Serialize, Deserialize)]
struct CacheBody<T> {
    updated: DateTime<Utc>,
    body: Option<T>,
}

impl<T> CacheBody<T> {
    fn empty() -> Self {
        Self {
            // Far enough in the past that any TTL sees it as expired.
            updated: DateTime::<Utc>::MIN_UTC,
            body: None,
        }
    }
}

/// One cached payload backed by `<dir>/<name>.json`.
pub struct FileCache<T> {
    path: PathBuf,
    body: CacheBody<T>,
}

impl<T: Serialize + DeserializeOwned + Clone> FileCache<T> {
    /// Open the cache, restoring any previously persisted body.
    ///
    /// # Arguments
    /// * `dir` - Directory the cache file lives in
    /// * `name` - File name without the .json extension
    pub fn new<P: AsRef<Path>>(dir: P, name: &str) -> Self {
        let path = dir.as_ref().join(format!("{}.json", name));
        let body = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(body) => body,
                Err(err) => {
                    warn!(path = %path.display(), %err, "cache file unreadable, starting empty");
                    CacheBody::empty()
                }
            },
            Err(_) => CacheBody::empty(),
        };
        Self { path, body }
    }

    /// Store a fresh payload.
    ///
    /// The in-memory body is updated first; a persistence failure is
    /// returned for logging but the caller keeps the fresh data.
    pub fn put(&mut self, data: T) -> Result<()> {
        self.body.updated = Utc::now();
        self.body.body = Some(data);

        let bytes = serde_json::to_vec(&self.body)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, bytes)?;
        Ok(())
    }

    /// The cached body regardless of age.
    pub fn get(&self) -> Option<T> {
        self.body.body.clone()
    }

    /// The cached body, only while it is still fresh.
    pub fn maybe_get(&self, ttl: Duration) -> Option<T> {
        if self.is_expired(ttl) {
            None
        } else {
            self.get()
        }
    }

    pub fn is_expired(&self, ttl: Duration) -> bool {
        match self.body.updated.checked_add_signed(ttl) {
            Some(deadline) => Utc::now() > deadline,
            // Overflow means the far-past sentinel or an extreme TTL.
            None => true,
        }
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.body.updated
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_then_restore() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache: FileCache<Vec<String>> = FileCache::new(dir.path(), "slots");
        assert_eq!(cache.get(), None);

        cache.put(vec!["area".to_string()]).unwrap();
        assert!(cache.path().exists());

        // A second instance over the same file sees the data and the
        // original stamp.
        let restored: FileCache<Vec<String>> = FileCache::new(dir.path(), "slots");
        assert_eq!(
            restored.maybe_get(Duration::minutes(5)),
            Some(vec!["area".to_string()])
        );
        assert_eq!(restored.last_updated(), cache.last_updated());
    }

    #[test]
    fn test_expired_body_is_withheld() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache: FileCache<String> = FileCache::new(dir.path(), "slots");
        cache.put("loft".to_string()).unwrap();

        assert!(cache.is_expired(Duration::seconds(-1)));
        assert_eq!(cache.maybe_get(Duration::seconds(-1)), None);
        // The body itself is still there for stale reads.
        assert_eq!(cache.get(), Some("loft".to_string()));
    }

    #[test]
    fn test_never_filled_cache_is_expired() {
        let dir = tempfile::tempdir().unwrap();
        let cache: FileCache<String> = FileCache::new(dir.path(), "slots");
        assert!(cache.is_expired(Duration::days(365)));
        assert_eq!(cache.maybe_get(Duration::days(365)), None);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("slots.json"), b"not json at all").unwrap();

        let cache: FileCache<String> = FileCache::new(dir.path(), "slots");
        assert_eq!(cache.get(), None);
    }

    #[test]
    fn test_memory_keeps_data_when_persist_fails() {
        let dir = tempfile::tempdir().unwrap();
        // Use a regular file where a directory is required so the
        // write must fail.
        let blocker = dir.path().join("blocked");
        fs::write(&blocker, b"").unwrap();

        let mut cache: FileCache<String> = FileCache::new(&blocker, "slots");
        assert!(cache.put("clam".to_string()).is_err());
        assert_eq!(cache.get(), Some("clam".to_string()));
    }
}
