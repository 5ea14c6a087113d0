// [libs/core/matrix-compressor/src/lib.rs]
/*!
 * =================================================================
 * APARATO: COMPRESOR DE MATRICES (ESTRATO L3)
 * CLASIFICACION: CORE ALGORITHM (C4)
 * RESPONSABILIDAD: NORMALIZACION TOTAL SOBRE ENTRADA RECTANGULAR
 *
 * Cinco pasadas deterministas. Una matriz no rectangular no es un
 * bug del llamador: es una tabla del mundo real mal formada, y se
 * reporta como tal (`Ragged`) en vez de entrar en panico.
 * =================================================================
 */

use pipeline_models::{CompressedMatrix, Factor, RawMatrix};
use thiserror::Error;
use tracing::instrument;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompressError {
    #[error("matrix is not rectangular")]
    Ragged,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompressedOutput {
    pub matrix: CompressedMatrix,
    pub header_index: i32,
    pub factor: Factor,
}

#[instrument(skip_all, fields(rows = raw.len(), header_index))]
pub fn compress(
    raw: &RawMatrix,
    header_index: i32,
    raw_factor: &str,
) -> Result<CompressedOutput, CompressError> {
    let summed = sum_cells(raw);
    let stripped = strip_cells(summed);
    let (dropped, header_index) = drop_empty_rows(stripped, header_index);
    let deduped = drop_duplicate_columns(dropped)?;
    let merged = merge_header_columns(deduped, header_index)?;

    Ok(CompressedOutput {
        matrix: merged,
        header_index,
        factor: Factor::normalize(raw_factor),
    })
}

/// Paso 1: une los fragmentos de cada celda con un espacio final por
/// fragmento (el espacio sobrante lo limpia `strip_cells`).
fn sum_cells(raw: &RawMatrix) -> CompressedMatrix {
    raw.iter()
        .map(|row| {
            row.iter()
                .map(|fragments| {
                    let mut joined = String::new();
                    for fragment in fragments {
                        joined.push_str(fragment);
                        joined.push(' ');
                    }
                    joined
                })
                .collect()
        })
        .collect()
}

/// Paso 2: colapsa toda corrida de puntos de codigo fuera de `[33, 126]`
/// a un unico espacio ASCII; descarta espacios al inicio/final.
fn strip_cells(matrix: CompressedMatrix) -> CompressedMatrix {
    matrix.into_iter().map(|row| row.into_iter().map(|cell| strip_cell(&cell)).collect()).collect()
}

fn strip_cell(cell: &str) -> String {
    let chars: Vec<char> = cell.chars().collect();
    let last_idx = chars.len().saturating_sub(1);
    let mut out = String::new();

    for (j, &ch) in chars.iter().enumerate() {
        let is_separator = (ch as u32) < 33 || (ch as u32) > 126;
        if is_separator {
            if j == last_idx {
                break;
            }
            if out.is_empty() || out.ends_with(' ') {
                continue;
            }
            out.push(' ');
            continue;
        }
        out.push(ch);
    }

    if out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Paso 3: una fila vacia es aquella cuyas celdas son todas la cadena
/// vacia. `header_index` se compara contra su valor ORIGINAL en cada
/// iteracion, no contra el valor ya decrementado.
fn drop_empty_rows(matrix: CompressedMatrix, header_index: i32) -> (CompressedMatrix, i32) {
    let mut kept = Vec::with_capacity(matrix.len());
    let mut adjusted_header_index = header_index;

    for (i, row) in matrix.into_iter().enumerate() {
        let empty = row.iter().all(|cell| cell.is_empty());
        if empty {
            if (i as i32) <= header_index {
                adjusted_header_index -= 1;
            }
        } else {
            kept.push(row);
        }
    }

    (kept, adjusted_header_index)
}

fn transpose(matrix: &CompressedMatrix) -> Result<CompressedMatrix, CompressError> {
    if matrix.is_empty() {
        return Ok(Vec::new());
    }
    let width = matrix[0].len();
    let mut out = vec![Vec::with_capacity(matrix.len()); width];
    for row in matrix {
        if row.len() != width {
            return Err(CompressError::Ragged);
        }
        for (i, cell) in row.iter().enumerate() {
            out[i].push(cell.clone());
        }
    }
    Ok(out)
}

/// Paso 4: transpone, conserva la primera columna-como-fila y cada
/// subsiguiente que difiera de la ultima conservada, transpone de vuelta.
fn drop_duplicate_columns(matrix: CompressedMatrix) -> Result<CompressedMatrix, CompressError> {
    let transposed = transpose(&matrix)?;
    if transposed.is_empty() {
        return Ok(matrix);
    }

    let mut kept = Vec::with_capacity(transposed.len());
    let mut prev = &transposed[0];
    kept.push(transposed[0].clone());

    for row in transposed.iter().skip(1) {
        if row != prev {
            kept.push(row.clone());
        }
        prev = row;
    }

    transpose(&kept)
}

/// Paso 5: fusiona la columna `i` en `i-1` cuando ambas coinciden (o la
/// celda de `i` esta vacia) en toda la banda de encabezado.
fn merge_header_columns(
    matrix: CompressedMatrix,
    header_index: i32,
) -> Result<CompressedMatrix, CompressError> {
    if header_index < 1 || matrix.is_empty() {
        return Ok(matrix);
    }

    let head = header_index as usize;
    let width = matrix[0].len();
    let mut out: CompressedMatrix = matrix.iter().map(|row| vec![row[0].clone()]).collect();

    for i in 1..width {
        let mut merge = true;
        for row in matrix.iter().take(head) {
            if row.len() <= i {
                return Err(CompressError::Ragged);
            }
            if row[i] != row[i - 1] && !row[i].is_empty() {
                merge = false;
                break;
            }
        }

        if merge {
            for (j, row) in matrix.iter().enumerate() {
                if row.len() <= i {
                    return Err(CompressError::Ragged);
                }
                if row[i] == row[i - 1] {
                    continue;
                }
                let last = out[j].len() - 1;
                out[j][last].push_str(&row[i]);
            }
        } else {
            for (j, row) in matrix.iter().enumerate() {
                out[j].push(row[i].clone());
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(s: &str) -> Vec<String> {
        vec![s.to_string()]
    }

    #[test]
    fn joins_and_strips_whitespace() {
        let raw: RawMatrix = vec![vec![frag("Revenue"), frag("  100\u{a0}")]];
        let out = compress(&raw, 0, "").unwrap();
        assert_eq!(out.matrix, vec![vec!["Revenue".to_string(), "100".to_string()]]);
    }

    #[test]
    fn drops_fully_empty_rows_and_adjusts_header_index() {
        let raw: RawMatrix = vec![vec![frag("Header")], vec![frag("")], vec![frag("Row1")]];
        let out = compress(&raw, 0, "").unwrap();
        assert_eq!(out.matrix.len(), 2);
        assert_eq!(out.header_index, 0);
    }

    #[test]
    fn ragged_matrix_reports_error() {
        let raw: RawMatrix = vec![vec![frag("a"), frag("b")], vec![frag("c")]];
        assert_eq!(compress(&raw, 0, "").unwrap_err(), CompressError::Ragged);
    }

    #[test]
    fn duplicate_adjacent_columns_are_dropped() {
        let raw: RawMatrix = vec![
            vec![frag("x"), frag("x"), frag("y")],
            vec![frag("1"), frag("1"), frag("2")],
        ];
        let out = compress(&raw, 0, "").unwrap();
        assert_eq!(out.matrix[0].len(), 2);
    }

    #[test]
    fn factor_is_normalized_with_thousand_priority() {
        let raw: RawMatrix = vec![vec![frag("a")]];
        let out = compress(&raw, 0, "in thousands, except millions").unwrap();
        assert_eq!(out.factor, Factor::Thousand);
    }

    #[test]
    fn header_columns_merge_when_equal_across_header_band() {
        let raw: RawMatrix = vec![
            vec![frag("label"), frag("2023"), frag("2023")],
            vec![frag("cash"), frag("10"), frag("20")],
        ];
        let out = compress(&raw, 1, "").unwrap();
        assert_eq!(out.matrix[0], vec!["label".to_string(), "2023".to_string()]);
        assert_eq!(out.matrix[1], vec!["cash".to_string(), "1020".to_string()]);
    }
}
