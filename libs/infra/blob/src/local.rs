// [libs/infra/blob/src/local.rs]
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::instrument;

use crate::errors::BlobError;
use crate::BlobStore;

/// Carpeta local (`B_PATH`) usada como almacen caliente durante `load`.
/// Las claves son nombres de archivo planos, sin subdirectorios.
pub struct LocalFolderStore {
    root: PathBuf,
}

impl LocalFolderStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl BlobStore for LocalFolderStore {
    #[instrument(skip(self, bytes))]
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), BlobError> {
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.path_for(key), bytes).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Vec<u8>, BlobError> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(BlobError::NotFound(key.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn roundtrips_bytes_through_a_flat_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFolderStore::new(dir.path());

        store.put("000032019323000106.htm", b"<html></html>").await.unwrap();
        let bytes = store.get("000032019323000106.htm").await.unwrap();

        assert_eq!(bytes, b"<html></html>");
    }

    #[tokio::test]
    async fn missing_key_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFolderStore::new(dir.path());

        let err = store.get("absent.htm").await.unwrap_err();
        assert!(matches!(err, BlobError::NotFound(_)));
    }
}
