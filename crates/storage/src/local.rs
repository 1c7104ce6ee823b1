//! Filesystem-backed [`FileStore`].

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::{validate_key, FileStore, StorageError};

/// Stores objects as plain files under a root directory.
///
/// The default backend for development and tests. Keys map directly to
/// paths below the root; [`validate_key`] keeps them inside it.
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl FileStore for LocalStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, bytes).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_get_delete_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        store
            .put("assets/x1/look.png", b"png bytes".to_vec(), "image/png")
            .await
            .unwrap();
        let bytes = store.get("assets/x1/look.png").await.unwrap();
        assert_eq!(bytes, b"png bytes");

        store.delete("assets/x1/look.png").await.unwrap();
        let err = store.get("assets/x1/look.png").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_missing_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        store.delete("assets/never/was.txt").await.unwrap();
    }

    #[tokio::test]
    async fn traversal_key_is_rejected_before_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let err = store.get("../outside").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn put_overwrites_existing_object() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        store.put("a/b.txt", b"one".to_vec(), "text/plain").await.unwrap();
        store.put("a/b.txt", b"two".to_vec(), "text/plain").await.unwrap();
        assert_eq!(store.get("a/b.txt").await.unwrap(), b"two");
    }
}
