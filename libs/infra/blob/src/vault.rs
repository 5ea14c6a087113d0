// [libs/infra/blob/src/vault.rs]
use std::sync::Arc;

use async_trait::async_trait;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path as ObjectPath;
use object_store::{ObjectStore, PutPayload};
use tracing::instrument;

use crate::errors::BlobError;
use crate::BlobStore;

/// Boveda de archivo frio (`REGION`, `ARCHIVE`) respaldada por un bucket
/// compatible con S3; destino permanente una vez que Archive confirma
/// la escritura en la carpeta local.
pub struct ColdArchiveVault {
    store: Arc<dyn ObjectStore>,
}

impl ColdArchiveVault {
    pub fn new(region: &str, bucket: &str) -> Result<Self, BlobError> {
        let store = AmazonS3Builder::from_env()
            .with_region(region)
            .with_bucket_name(bucket)
            .build()?;
        Ok(Self { store: Arc::new(store) })
    }
}

#[async_trait]
impl BlobStore for ColdArchiveVault {
    #[instrument(skip(self, bytes))]
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), BlobError> {
        let path = ObjectPath::from(key);
        self.store.put(&path, PutPayload::from(bytes.to_vec())).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Vec<u8>, BlobError> {
        let path = ObjectPath::from(key);
        match self.store.get(&path).await {
            Ok(result) => Ok(result.bytes().await?.to_vec()),
            Err(object_store::Error::NotFound { .. }) => Err(BlobError::NotFound(key.to_string())),
            Err(err) => Err(err.into()),
        }
    }
}
