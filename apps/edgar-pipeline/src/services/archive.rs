// [apps/edgar-pipeline/src/services/archive.rs]
/*!
 * APARATO: ARCHIVE STAGE (C8, ESTRATO L6)
 * RESPONSABILIDAD: TRASLADO AL ALMACEN FRIO Y EL UNICO FLIP DE `fully_stored`
 *
 * `fully_stored=true` es irreversible y es la unica fuente de verdad de
 * resumption: por eso solo se marca DESPUES de que el blob este a salvo
 * en la boveda fria, nunca antes.
 */

use std::sync::Arc;

use pipeline_db::FilingRepository;
use pipeline_queue::{Closed, Queue};
use tracing::{instrument, warn};

use crate::messages::{decode, FilingMsg};
use crate::state::AppState;

/// Un worker del pool de Archive: consume `q_in` hasta `Closed`. Es una
/// rama terminal, la otra mitad de lo que Slice reenvia en paralelo es el
/// emparejamiento (`services::pairing`), que escucha su propia copia del
/// mensaje y no depende de que Archive termine.
#[instrument(skip(state, q_in))]
pub async fn worker(worker_id: usize, state: AppState, q_in: Arc<Queue>) {
    loop {
        let bytes = match q_in.recv().await {
            Ok(bytes) => bytes,
            Err(Closed) => break,
        };

        let msg: FilingMsg = match decode(&bytes) {
            Ok(msg) => msg,
            Err(err) => {
                warn!("⚠️ [ARCHIVE:{}]: undecodable message: {}", worker_id, err);
                continue;
            }
        };

        if let Err(err) = archive_one(&state, &msg).await {
            warn!("⚠️ [ARCHIVE:{}]: filing {} dropped: {}", worker_id, msg.id, err);
        }
    }
}

async fn archive_one(state: &AppState, msg: &FilingMsg) -> anyhow::Result<()> {
    let key = format!("{}.htm", msg.id);
    let bytes = state.hot_blob.get(&key).await?;
    state.cold_blob.put(&key, &bytes).await?;

    let filing_repo = FilingRepository::new(&state.db);
    filing_repo.mark_fully_stored(&msg.id).await?;
    Ok(())
}
