// [apps/edgar-pipeline/src/orchestrator.rs]
/*!
 * APARATO: ORQUESTADOR DEL PIPELINE (C10, ESTRATO L6)
 * RESPONSABILIDAD: CABLEADO DE ETAPAS, POOLS DE WORKERS Y CIERRE ORDENADO
 *
 * Q2 no es una sola cola: Slice reenvia cada filing a dos colas
 * gemelas, `q_archive` y `q_pairing`, que alimentan en paralelo a
 * Archive (C8) y al emparejamiento respectivamente (spec.md S2: "Q2 →
 * C8" y, en paralelo, "Q2 → pair-by-company → Q3 → C9"). El cierre
 * sigue el mismo orden secuencial drain-then-join del original: Extract
 * hasta agotarse, luego Slice, luego Archive+Pairing, luego Graph.
 */

use pipeline_queue::Queue;
use tracing::{info, instrument};

use crate::services::{archive, extract, graph, pairing, slice};
use crate::state::AppState;

pub struct PoolSizes {
    pub n_extract: usize,
    pub n_slice: usize,
    pub n_archive: usize,
    pub n_graph: usize,
}

impl Default for PoolSizes {
    fn default() -> Self {
        Self { n_extract: 1, n_slice: 5, n_archive: 1, n_graph: 5 }
    }
}

/// Corre Extract -> Slice -> Archive (y, en paralelo, el emparejamiento
/// -> Graph) hasta completarse, y retorna una vez que cada worker de
/// cada etapa ha salido limpiamente.
#[instrument(skip(state, pools))]
pub async fn run_load(state: AppState, pools: PoolSizes) -> anyhow::Result<()> {
    let q1 = Queue::new();
    let q_archive = Queue::new();
    let q_pairing = Queue::new();
    let q3 = Queue::new();

    info!(
        "🚦 [ORCHESTRATOR]: igniting pipeline (extract={}, slice={}, archive={}, graph={})",
        pools.n_extract, pools.n_slice, pools.n_archive, pools.n_graph
    );

    let mut slice_handles = Vec::with_capacity(pools.n_slice.max(1));
    for worker_id in 0..pools.n_slice.max(1) {
        let state = state.clone();
        let q1 = q1.clone();
        let q_archive = q_archive.clone();
        let q_pairing = q_pairing.clone();
        slice_handles.push(tokio::spawn(async move {
            slice::worker(worker_id, state, q1, q_archive, q_pairing).await;
        }));
    }

    let mut archive_handles = Vec::with_capacity(pools.n_archive.max(1));
    for worker_id in 0..pools.n_archive.max(1) {
        let state = state.clone();
        let q_archive = q_archive.clone();
        archive_handles.push(tokio::spawn(async move {
            archive::worker(worker_id, state, q_archive).await;
        }));
    }

    let pairing_handle = {
        let q_pairing = q_pairing.clone();
        let q3 = q3.clone();
        tokio::spawn(async move { pairing::run(q_pairing, q3).await })
    };

    let mut graph_handles = Vec::with_capacity(pools.n_graph.max(1));
    for worker_id in 0..pools.n_graph.max(1) {
        let state = state.clone();
        let q3 = q3.clone();
        graph_handles.push(tokio::spawn(async move {
            graph::worker(worker_id, state, q3).await;
        }));
    }

    // Extract cierra Q1 ella misma en cuanto agota la lista de companias.
    extract::run(state.clone(), pools.n_extract, q1).await?;

    for handle in slice_handles {
        handle.await?;
    }
    // Ningun worker de Slice sigue vivo para producir mas mensajes en
    // ninguna de las dos ramas de Q2: ambas se cierran juntas.
    q_archive.close().await;
    q_pairing.close().await;

    for handle in archive_handles {
        handle.await?;
    }
    pairing_handle.await?;

    for handle in graph_handles {
        handle.await?;
    }

    info!("✅ [ORCHESTRATOR]: pipeline drained, every stage exited cleanly");
    Ok(())
}
