//! File-backed cache store

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::domain::{CacheStore, DomainError};

/// Durable store writing one JSON file per key.
///
/// File names are a sanitized slug of the key plus a hash suffix, so keys
/// containing service names with spaces or slashes stay collision-free on
/// disk. Writes go to a temp file in the same directory and are renamed
/// into place, so a concurrent reader sees either the old value or the new
/// one, never a partial write.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_name(key: &str) -> String {
        let digest = Sha256::digest(key.as_bytes());
        let slug: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '-'
                }
            })
            .take(48)
            .collect();
        format!("{}-{}.json", slug, hex::encode(&digest[..8]))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(Self::file_name(key))
    }
}

#[async_trait]
impl CacheStore for FileStore {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(DomainError::cache(format!(
                "Failed to read cache entry: {}",
                err
            ))),
        }
    }

    async fn set_raw(&self, key: &str, value: &str) -> Result<(), DomainError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| DomainError::cache(format!("Failed to create cache dir: {}", e)))?;

        let path = self.path_for(key);
        let tmp = self
            .dir
            .join(format!(".{}.{}.tmp", Self::file_name(key), uuid::Uuid::new_v4()));

        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| DomainError::cache(format!("Failed to write cache entry: {}", e)))?;

        if let Err(err) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(DomainError::cache(format!(
                "Failed to publish cache entry: {}",
                err
            )));
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(DomainError::cache(format!(
                "Failed to delete cache entry: {}",
                err
            ))),
        }
    }

    async fn clear(&self) -> Result<(), DomainError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(()),
            Err(err) => {
                return Err(DomainError::cache(format!(
                    "Failed to list cache dir: {}",
                    err
                )));
            }
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DomainError::cache(format!("Failed to list cache dir: {}", e)))?
        {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                tokio::fs::remove_file(&path).await.map_err(|e| {
                    DomainError::cache(format!("Failed to delete cache entry: {}", e))
                })?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CacheStoreExt;

    #[tokio::test]
    async fn test_set_and_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store
            .set("regions:abcd", &vec!["us-east-1".to_string()])
            .await
            .unwrap();

        let result: Option<Vec<String>> = store.get("regions:abcd").await.unwrap();
        assert_eq!(result, Some(vec!["us-east-1".to_string()]));
    }

    #[tokio::test]
    async fn test_missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let result: Option<Vec<String>> = store.get("missing").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_overwrite_replaces_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("key", &"first").await.unwrap();
        store.set("key", &"second").await.unwrap();

        let result: Option<String> = store.get("key").await.unwrap();
        assert_eq!(result, Some("second".to_string()));
    }

    #[tokio::test]
    async fn test_delete_reports_prior_existence() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("key", &"value").await.unwrap();

        assert!(store.delete("key").await.unwrap());
        assert!(!store.delete("key").await.unwrap());
    }

    #[tokio::test]
    async fn test_clear_removes_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("key1", &"a").await.unwrap();
        store.set("key2", &"b").await.unwrap();

        store.clear().await.unwrap();

        let result: Option<String> = store.get("key1").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_clear_on_missing_dir_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("never-created"));

        store.clear().await.unwrap();
    }

    #[test]
    fn test_awkward_keys_map_to_distinct_files() {
        let a = FileStore::file_name("costs:p:Amazon Elastic Compute Cloud - Compute:123");
        let b = FileStore::file_name("costs:p:Amazon Elastic Block Store:123");

        assert_ne!(a, b);
        assert!(a.ends_with(".json"));
        assert!(!a.contains(' '));
        assert!(!a.contains(':'));
    }

    #[test]
    fn test_file_name_is_deterministic() {
        assert_eq!(FileStore::file_name("regions:x"), FileStore::file_name("regions:x"));
    }
}
