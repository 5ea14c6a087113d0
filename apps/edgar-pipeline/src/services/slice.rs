// [apps/edgar-pipeline/src/services/slice.rs]
/*!
 * APARATO: SLICE STAGE (C7, ESTRATO L6)
 * RESPONSABILIDAD: EXTRACCION (C3) + COMPRESION (C4) POR FILING
 *
 * Una tabla `Ragged` no aborta el filing entero: se conserva la cruda
 * y se continua con la siguiente tabla del mismo documento.
 */

use std::sync::Arc;

use pipeline_db::TableRepository;
use pipeline_matrix_compressor::compress;
use pipeline_models::{CompressedTable, Table};
use pipeline_queue::{Closed, Queue};
use pipeline_table_extractor::extract_tables_with_factor_window;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::messages::{decode, encode, FilingMsg};
use crate::state::AppState;

/// Un worker del pool de Slice: consume `q_in` hasta `Closed`, corre C3+C4
/// sobre cada filing y reenvia el mensaje intacto a las dos ramas que
/// salen de Q2 en paralelo: Archive (`q_archive`) y el emparejamiento
/// (`q_pairing`).
#[instrument(skip(state, q_in, q_archive, q_pairing))]
pub async fn worker(
    worker_id: usize,
    state: AppState,
    q_in: Arc<Queue>,
    q_archive: Arc<Queue>,
    q_pairing: Arc<Queue>,
) {
    loop {
        let bytes = match q_in.recv().await {
            Ok(bytes) => bytes,
            Err(Closed) => break,
        };

        let msg: FilingMsg = match decode(&bytes) {
            Ok(msg) => msg,
            Err(err) => {
                warn!("⚠️ [SLICE:{}]: undecodable message: {}", worker_id, err);
                continue;
            }
        };

        if let Err(err) = slice_one(&state, &msg).await {
            warn!("⚠️ [SLICE:{}]: filing {} failed: {}", worker_id, msg.id, err);
            continue;
        }

        let _ = q_archive.send(encode(&msg)).await;
        let _ = q_pairing.send(encode(&msg)).await;
    }
}

async fn slice_one(state: &AppState, msg: &FilingMsg) -> anyhow::Result<()> {
    let key = format!("{}.htm", msg.id);
    let html = state.hot_blob.get(&key).await?;

    let table_repo = TableRepository::new(&state.db);
    let extracted = extract_tables_with_factor_window(
        &html,
        state.config.factor_walk_steps,
        state.config.factor_max_text_len,
    );

    for (index, extracted_table) in extracted.into_iter().enumerate() {
        let table_id = Uuid::now_v7();
        let table = Table {
            id: table_id,
            filing_id: msg.id.clone(),
            index: index as i32,
            header_index: extracted_table.header_index,
            factor: extracted_table.factor.clone(),
            raw_matrix: extracted_table.raw_matrix.clone(),
        };

        if let Err(err) = table_repo.insert_raw(&table).await {
            warn!("⚠️ [SLICE]: could not persist raw table {} of {}: {}", index, msg.id, err);
            continue;
        }

        match compress(&extracted_table.raw_matrix, extracted_table.header_index, &extracted_table.factor) {
            Ok(output) => {
                let compressed = CompressedTable {
                    id: Uuid::now_v7(),
                    original_id: table_id,
                    factor: output.factor,
                    header_index: output.header_index,
                    matrix: output.matrix,
                };
                if let Err(err) = table_repo.insert_compressed(&compressed).await {
                    warn!(
                        "⚠️ [SLICE]: could not persist compressed table {} of {}: {}",
                        index, msg.id, err
                    );
                }
            }
            Err(_ragged) => {
                info!("ℹ️ [SLICE]: table {} of {} is ragged, keeping raw only", index, msg.id);
            }
        }
    }

    Ok(())
}
