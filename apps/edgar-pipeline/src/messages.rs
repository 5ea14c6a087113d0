// [apps/edgar-pipeline/src/messages.rs]
//! Formas de mensaje que viajan por las colas como JSON. Cada stage decodifica
//! solo el mensaje que le corresponde; un fallo de decodificacion es un
//! `Serialization` no fatal (spec.md S7): se registra y el mensaje se descarta.

use serde::{Deserialize, Serialize};

/// Viaja por Q1 (Extract -> Slice) y Q2 (Slice -> Archive / pairing).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilingMsg {
    pub cik: String,
    pub id: String,
}

/// Viaja por Q3 (pairing -> Graph).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairMsg {
    pub from: String,
    pub to: String,
}

pub fn encode<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).expect("message types are always serializable")
}

pub fn decode<T: for<'de> Deserialize<'de>>(bytes: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(bytes)
}
