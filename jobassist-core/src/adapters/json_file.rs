//! JSON file storage adapter

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::ports::KeyValueStore;

/// File-backed key-value store
///
/// Each key maps to `<dir>/<key>.json` and every write replaces the whole
/// file. There is no file locking: concurrent writers race and the last
/// write wins.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`, creating the directory if needed
    pub fn new(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Directory the store persists into
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(Some(content))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_set_get_remove() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        assert_eq!(store.get("missing").await.unwrap(), None);

        store.set("some-key", r#"{"a":1}"#).await.unwrap();
        assert_eq!(
            store.get("some-key").await.unwrap(),
            Some(r#"{"a":1}"#.to_string())
        );
        assert!(dir.path().join("some-key.json").exists());

        store.remove("some-key").await.unwrap();
        assert_eq!(store.get("some-key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_missing_key_is_ok() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();
        store.remove("never-set").await.unwrap();
    }

    #[tokio::test]
    async fn test_set_replaces_whole_value() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        store.set("k", "first value, quite long").await.unwrap();
        store.set("k", "short").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("short".to_string()));
    }
}
