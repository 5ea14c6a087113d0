// [libs/domain/models/src/table.rs]
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::matrix::{CompressedMatrix, Factor, RawMatrix};

/// Una tabla HTML tal como fue extraida, antes de compresion.
///
/// `(filing_id, index)` es unico; las filas solo se insertan, nunca se
/// actualizan en su lugar salvo para anadir su hijo comprimido.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub id: Uuid,
    pub filing_id: String,
    /// Ordinal posicional de la tabla dentro de su filing.
    pub index: i32,
    /// Numero de filas que componen la banda de encabezado (>= 0).
    pub header_index: i32,
    /// Texto libre capturado cerca de la tabla (p.ej. "in thousands").
    pub factor: String,
    pub raw_matrix: RawMatrix,
}

/// Hijo 1:1 de una `Table`, conteniendo la matriz comprimida.
///
/// Existe como fila separada (no como columna nullable en `table`) para
/// que `compress` pueda re-ejecutar la normalizacion sin mutar el historial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressedTable {
    pub id: Uuid,
    pub original_id: Uuid,
    pub factor: Factor,
    pub header_index: i32,
    pub matrix: CompressedMatrix,
}

/// Arista ponderada entre dos tablas comprimidas de dos filings distintos
/// de la misma compania. `(from, to)` es unico.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Edge {
    pub from: Uuid,
    pub to: Uuid,
    pub weight: i64,
}

/// Umbral de dominio: por debajo de este peso, dos tablas no comparten
/// suficiente estructura para considerarse relacionadas.
pub const MIN_EDGE_WEIGHT: i64 = 2;
