// [apps/edgar-pipeline/tests/pairing_spec.rs]
//! Cubre spec.md S5 (pair fan-out) y la propiedad de cierre en cascada de
//! la etapa de emparejamiento (Q2 cerrada -> Q3 se cierra tras drenar).

use std::collections::HashSet;

use edgar_pipeline::messages::{decode, encode, FilingMsg, PairMsg};
use edgar_pipeline::services::pairing;
use pipeline_queue::Queue;

#[tokio::test]
async fn three_filings_on_one_cik_yield_exactly_three_pairs() {
    let q2 = Queue::new();
    let q3 = Queue::new();

    for id in ["A", "B", "C"] {
        let msg = FilingMsg { cik: "0000320193".to_string(), id: id.to_string() };
        q2.send(encode(&msg)).await.unwrap();
    }
    q2.close().await;

    pairing::run(q2, q3.clone()).await;

    let mut pairs = HashSet::new();
    loop {
        match q3.recv().await {
            Ok(bytes) => {
                let pair: PairMsg = decode(&bytes).unwrap();
                pairs.insert((pair.from, pair.to));
            }
            Err(_closed) => break,
        }
    }

    let expected: HashSet<(String, String)> = [
        ("A".to_string(), "B".to_string()),
        ("A".to_string(), "C".to_string()),
        ("B".to_string(), "C".to_string()),
    ]
    .into_iter()
    .collect();

    assert_eq!(pairs, expected);
}

#[tokio::test]
async fn filings_under_different_ciks_never_pair() {
    let q2 = Queue::new();
    let q3 = Queue::new();

    q2.send(encode(&FilingMsg { cik: "0000320193".to_string(), id: "A".to_string() })).await.unwrap();
    q2.send(encode(&FilingMsg { cik: "0000789019".to_string(), id: "B".to_string() })).await.unwrap();
    q2.close().await;

    pairing::run(q2, q3.clone()).await;

    assert_eq!(q3.recv().await, Err(pipeline_queue::Closed));
}
