// [apps/edgar-pipeline/src/services/extract.rs]
/*!
 * APARATO: EXTRACT STAGE (C6, ESTRATO L6)
 * RESPONSABILIDAD: DIFF DEL CATALOGO REMOTO CONTRA LO YA ARCHIVADO
 *
 * No hay cola de entrada real: el "trabajo" es la lista de companias
 * sembradas por `init`. `n_extract` workers compiten por esa lista en
 * lugar de por un `pipeline_queue::Queue`, pero el contrato de cierre es
 * el mismo: cuando todos terminan, Q1 se cierra exactamente una vez.
 */

use std::collections::VecDeque;
use std::sync::Arc;

use pipeline_db::{CompanyRepository, DbError, FilingRepository};
use pipeline_models::Filing;
use pipeline_queue::Queue;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::messages::{encode, FilingMsg};
use crate::state::AppState;

/// Corre Extract hasta agotar la lista de companias y cierra `q1`.
#[instrument(skip(state, q1))]
pub async fn run(state: AppState, n_extract: usize, q1: Arc<Queue>) -> anyhow::Result<()> {
    let company_repo = CompanyRepository::new(&state.db);
    let ciks = company_repo.list_ciks().await?;
    info!("🛰️  [EXTRACT]: scanning {} companies with {} workers", ciks.len(), n_extract);

    let worklist = Arc::new(Mutex::new(VecDeque::from(ciks)));

    let mut handles = Vec::with_capacity(n_extract.max(1));
    for worker_id in 0..n_extract.max(1) {
        let state = state.clone();
        let worklist = worklist.clone();
        let q1 = q1.clone();
        handles.push(tokio::spawn(async move {
            extract_worker(worker_id, state, worklist, q1).await;
        }));
    }

    for handle in handles {
        handle.await?;
    }

    q1.close().await;
    Ok(())
}

#[instrument(skip(state, worklist, q1))]
async fn extract_worker(worker_id: usize, state: AppState, worklist: Arc<Mutex<VecDeque<String>>>, q1: Arc<Queue>) {
    let filing_repo = FilingRepository::new(&state.db);

    loop {
        let cik = {
            let mut guard = worklist.lock().await;
            guard.pop_front()
        };
        let Some(cik) = cik else {
            debug!("extract worker {} found the worklist empty, exiting", worker_id);
            break;
        };

        if let Err(err) = extract_company(&state, &filing_repo, &cik, &q1).await {
            warn!("⚠️ [EXTRACT]: company {} failed: {}", cik, err);
        }
    }
}

async fn extract_company(
    state: &AppState,
    filing_repo: &FilingRepository<'_>,
    cik: &str,
    q1: &Arc<Queue>,
) -> anyhow::Result<()> {
    let already_stored = filing_repo.fully_stored_ids(cik).await?;
    let live_filings = state.edgar.get_filings(cik).await?;

    for filing in live_filings {
        if already_stored.contains(&filing.id) {
            continue;
        }
        process_new_filing(state, filing_repo, filing, q1).await;
    }
    Ok(())
}

async fn process_new_filing(
    state: &AppState,
    filing_repo: &FilingRepository<'_>,
    filing: Filing,
    q1: &Arc<Queue>,
) {
    let key = filing.primary_document_key.clone();
    let bytes = match state.edgar.get_file(&filing.cik, &filing.id, &key).await {
        Ok(file) => file.bytes,
        Err(err) => {
            warn!("⚠️ [EXTRACT]: failed to fetch primary document for {}: {}", filing.id, err);
            return;
        }
    };

    if let Err(err) = state.hot_blob.put(&format!("{}.htm", filing.id), &bytes).await {
        warn!("⚠️ [EXTRACT]: failed to stage blob for {}: {}", filing.id, err);
        return;
    }

    // Una reanudacion tras un crash entre el insert y el archive de un
    // mismo filing vuelve a pasar por aqui: el insert duplicado se traga
    // y el mensaje se reencola igual, para que Slice/Archive completen
    // lo que quedo a medias.
    match filing_repo.insert(&filing).await {
        Ok(()) => {}
        Err(DbError::Duplicate(_)) => {
            debug!("filing {} already recorded, re-queuing for resumption", filing.id);
        }
        Err(err) => {
            warn!("⚠️ [EXTRACT]: failed to insert filing {}: {}", filing.id, err);
            return;
        }
    }

    let msg = FilingMsg { cik: filing.cik.clone(), id: filing.id.clone() };
    let _ = q1.send(encode(&msg)).await;
}
