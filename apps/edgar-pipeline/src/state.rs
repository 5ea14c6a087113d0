// [apps/edgar-pipeline/src/state.rs]
/*!
 * APARATO: ESTADO COMPARTIDO DEL PIPELINE (ESTRATO L6)
 * RESPONSABILIDAD: HANDLES CLONABLES HACIA LAS CAPACIDADES DE INFRAESTRUCTURA
 *
 * Ningun stage posee estado mutable propio fuera de las colas; todo lo
 * que necesita vive aqui detras de `Arc`/`Clone` barato.
 */

use std::sync::Arc;

use pipeline_blob::BlobStore;
use pipeline_db::PgClient;
use pipeline_edgar_client::EdgarClient;

use crate::config::Config;

/// Estado compartido entre todos los workers del pipeline. Clonar es barato:
/// `PgClient` envuelve un `sqlx::PgPool`, el resto son `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub db: PgClient,
    pub edgar: Arc<EdgarClient>,
    /// Almacen caliente local (`B_PATH`): escrito por Extract, leido por Slice y Archive.
    pub hot_blob: Arc<dyn BlobStore>,
    /// Boveda de archivo frio (`REGION`/`ARCHIVE`): escrita por Archive, destino permanente.
    pub cold_blob: Arc<dyn BlobStore>,
    /// Umbrales de C3/C5 configurables al arranque (spec.md S9b).
    pub config: Config,
}

impl AppState {
    pub async fn bootstrap(config: &Config) -> anyhow::Result<Self> {
        let db = PgClient::connect(
            &config.db_host,
            config.db_port,
            &config.db_name,
            &config.db_user,
            &config.db_pass,
        )
        .await?;

        let edgar = Arc::new(EdgarClient::new(config.sec_user_agent.clone()));
        let hot_blob: Arc<dyn BlobStore> =
            Arc::new(pipeline_blob::LocalFolderStore::new(config.b_path.clone()));
        let cold_blob: Arc<dyn BlobStore> =
            Arc::new(pipeline_blob::ColdArchiveVault::new(&config.region, &config.archive)?);

        Ok(Self { db, edgar, hot_blob, cold_blob, config: config.clone() })
    }
}
