// [apps/edgar-pipeline/src/services/pairing.rs]
/*!
 * APARATO: PAIRING (DENTRO DEL ORQUESTADOR, ESTRATO L6)
 * RESPONSABILIDAD: EMPAREJAR FILINGS DE LA MISMA COMPANIA PARA GRAPH
 *
 * Tarea unica, no un pool: el mapa `cik -> ids vistos` vive en un unico
 * lugar sin necesidad de candado (spec.md S5, "locking discipline"). Se
 * reconstruye en cada corrida desde Q2 y nunca se persiste.
 */

use std::collections::HashMap;
use std::sync::Arc;

use pipeline_queue::{Closed, Queue};
use tracing::{info, instrument, warn};

use crate::messages::{decode, encode, FilingMsg, PairMsg};

/// Consume Q2 (la misma rama que alimenta a Archive, en paralelo) hasta
/// `Closed`, emite un `PairMsg` por cada par nuevo bajo la misma compania
/// y cierra Q3 al terminar.
#[instrument(skip(q2, q3))]
pub async fn run(q2: Arc<Queue>, q3: Arc<Queue>) {
    let mut seen_by_cik: HashMap<String, Vec<String>> = HashMap::new();

    loop {
        let bytes = match q2.recv().await {
            Ok(bytes) => bytes,
            Err(Closed) => break,
        };

        let msg: FilingMsg = match decode(&bytes) {
            Ok(msg) => msg,
            Err(err) => {
                warn!("⚠️ [PAIR]: undecodable message: {}", err);
                continue;
            }
        };

        emit_pairs(&mut seen_by_cik, &msg, &q3).await;
    }

    info!("🔗 [PAIR]: Q2 exhausted, closing Q3");
    q3.close().await;
}

async fn emit_pairs(seen_by_cik: &mut HashMap<String, Vec<String>>, msg: &FilingMsg, q3: &Arc<Queue>) {
    let prior = seen_by_cik.entry(msg.cik.clone()).or_default();

    for other_id in prior.iter() {
        // la relacion es simetrica; el orden lexicografico evita insertar
        // la misma arista dos veces bajo direcciones opuestas.
        let pair = if msg.id < *other_id {
            PairMsg { from: msg.id.clone(), to: other_id.clone() }
        } else {
            PairMsg { from: other_id.clone(), to: msg.id.clone() }
        };
        let _ = q3.send(encode(&pair)).await;
    }

    prior.push(msg.id.clone());
}
