//! JSON file store.
//!
//! All keys live in one JSON object on disk. Every write rewrites the file
//! through a temporary sibling and a rename, so a crash never leaves a
//! half-written file behind.

use super::KeyValueStore;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A store backed by a single JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`.
    ///
    /// A missing file starts empty. A file that cannot be parsed is logged and
    /// treated as empty; it is overwritten on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Discarding unreadable storage file: {}", e);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "Opened storage file");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut json_bytes = serde_json::to_vec_pretty(entries)?;
        json_bytes.push(b'\n');

        let tmp_path = temp_path(&self.path);
        std::fs::write(&tmp_path, &json_bytes)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| Error::storage("file store lock poisoned"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.lock()?;
        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.flush(&next)?;
        *entries = next;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut entries = self.lock()?;
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.flush(&next)?;
        *entries = next;
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut os_string = path.as_os_str().to_os_string();
    os_string.push(".tmp");
    os_string.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file() -> PathBuf {
        std::env::temp_dir().join(format!("gingermarket-store-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_values_survive_reopen() {
        let path = temp_file();
        {
            let store = FileStore::open(&path).unwrap();
            store.set("gingermarket_first_login", "true").unwrap();
            store.set("gingermarket_default_amount", "\"0.25\"").unwrap();
        }

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("gingermarket_first_login").unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(
            reopened.get("gingermarket_default_amount").unwrap().as_deref(),
            Some("\"0.25\"")
        );

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_delete_removes_key_on_disk() {
        let path = temp_file();
        let store = FileStore::open(&path).unwrap();
        store.set("k", "1").unwrap();
        store.delete("k").unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("\"k\""));
        assert_eq!(FileStore::open(&path).unwrap().get("k").unwrap(), None);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let path = temp_file();
        std::fs::write(&path, "this is not json").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("anything").unwrap(), None);

        store.set("fresh", "1").unwrap();
        assert_eq!(
            FileStore::open(&path).unwrap().get("fresh").unwrap().as_deref(),
            Some("1")
        );

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        // A regular file where the parent directory should be makes every flush fail.
        let blocker = temp_file();
        std::fs::write(&blocker, "").unwrap();
        let store = FileStore::open(blocker.join("store.json")).unwrap();

        assert!(store.set("k", "1").is_err());
        assert_eq!(store.get("k").unwrap(), None);

        let _ = std::fs::remove_file(blocker);
    }

    #[test]
    fn test_failed_delete_keeps_value() {
        let path = temp_file();
        let store = FileStore::open(&path).unwrap();
        store.set("k", "1").unwrap();

        // Replace the file with a directory so the rename fails.
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        std::fs::create_dir(path.join("child")).unwrap();

        assert!(store.delete("k").is_err());
        assert_eq!(store.get("k").unwrap().as_deref(), Some("1"));

        let _ = std::fs::remove_dir_all(&path);
        let _ = std::fs::remove_file(temp_path(&path));
    }
}
