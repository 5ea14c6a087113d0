// [apps/edgar-pipeline/src/services/graph.rs]
/*!
 * APARATO: GRAPH STAGE (C9, ESTRATO L6)
 * RESPONSABILIDAD: PESO DE SOLAPAMIENTO (C5) ENTRE LOS DOS FILINGS DE UN PAR
 */

use std::sync::Arc;

use pipeline_db::{DbError, EdgeRepository, TableRepository};
use pipeline_edge_builder::connect_with_min_weight;
use pipeline_queue::{Closed, Queue};
use tracing::{instrument, warn};

use crate::messages::{decode, PairMsg};
use crate::state::AppState;

/// Un worker del pool de Graph: consume Q3 hasta `Closed`.
#[instrument(skip(state, q_in))]
pub async fn worker(worker_id: usize, state: AppState, q_in: Arc<Queue>) {
    loop {
        let bytes = match q_in.recv().await {
            Ok(bytes) => bytes,
            Err(Closed) => break,
        };

        let pair: PairMsg = match decode(&bytes) {
            Ok(pair) => pair,
            Err(err) => {
                warn!("⚠️ [GRAPH:{}]: undecodable message: {}", worker_id, err);
                continue;
            }
        };

        if let Err(err) = graph_one(&state, &pair).await {
            warn!("⚠️ [GRAPH:{}]: pair {}/{} failed: {}", worker_id, pair.from, pair.to, err);
        }
    }
}

async fn graph_one(state: &AppState, pair: &PairMsg) -> anyhow::Result<()> {
    let table_repo = TableRepository::new(&state.db);
    let edge_repo = EdgeRepository::new(&state.db);

    let from_tables = table_repo.compressed_for_filing(&pair.from).await?;
    let to_tables = table_repo.compressed_for_filing(&pair.to).await?;

    for edge in connect_with_min_weight(&from_tables, &to_tables, state.config.min_edge_weight) {
        match edge_repo.insert(&edge).await {
            Ok(()) | Err(DbError::Duplicate(_)) => {}
            Err(err) => warn!("⚠️ [GRAPH]: could not insert edge {:?}: {}", edge, err),
        }
    }

    Ok(())
}
