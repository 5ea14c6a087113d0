// [libs/infra/blob/src/lib.rs]
/*!
 * =================================================================
 * APARATO: CAPACIDAD DE ALMACENAMIENTO DE BLOBS (ESTRATO L4)
 * CLASIFICACION: INFRASTRUCTURE ADAPTER
 * RESPONSABILIDAD: UN UNICO PUNTO DE LLAMADA PARA EL DOCUMENTO PRIMARIO
 *
 * Archive escribe aqui, Slice lee de aqui; ninguno de los dos sabe si
 * el backend detras del trait es la carpeta local o la boveda fria.
 * =================================================================
 */

mod errors;
mod local;
mod vault;

pub use errors::BlobError;
pub use local::LocalFolderStore;
pub use vault::ColdArchiveVault;

use async_trait::async_trait;

/// Capacidad de lectura/escritura de documentos primarios, clave plana
/// (`<filing-id>.htm`). Dos implementaciones conviven detras de `dyn`:
/// la carpeta local usada durante `load` y la boveda de archivo frio.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), BlobError>;
    async fn get(&self, key: &str) -> Result<Vec<u8>, BlobError>;
}
