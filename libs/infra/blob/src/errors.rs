// [libs/infra/blob/src/errors.rs]
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("[L4_BLOB_LOOKUP_FAULT]: KEY_NOT_FOUND -> {0}")]
    NotFound(String),

    #[error("[L4_BLOB_IO_FAULT]: LOCAL_DISK_REJECTED -> {0}")]
    Io(#[from] std::io::Error),

    #[error("[L4_BLOB_VAULT_FAULT]: COLD_ARCHIVE_REJECTED -> {0}")]
    Vault(#[from] object_store::Error),
}
