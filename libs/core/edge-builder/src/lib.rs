// [libs/core/edge-builder/src/lib.rs]
/*!
 * =================================================================
 * APARATO: CONSTRUCTOR DE ARISTAS (ESTRATO L3)
 * CLASIFICACION: CORE ALGORITHM (C5)
 * RESPONSABILIDAD: PESO DE SOLAPAMIENTO ESTRUCTURAL ENTRE TABLAS
 *
 * Una arista de peso 1 es ruido: dos tablas cualesquiera comparten
 * alguna etiqueta por azar. `MIN_EDGE_WEIGHT` es el filtro.
 * =================================================================
 */

use pipeline_models::{CompressedMatrix, CompressedTable, Edge, MIN_EDGE_WEIGHT};
use tracing::instrument;

/// Peso total de relacion entre dos tablas comprimidas: solapamiento de
/// filas de datos mas solapamiento de celdas de encabezado.
#[instrument(skip_all)]
pub fn weight(
    a: &CompressedMatrix,
    header_index_a: i32,
    b: &CompressedMatrix,
    header_index_b: i32,
) -> i64 {
    row_overlap(a, header_index_a, b) + header_overlap(a, header_index_a, b, header_index_b)
}

/// Todas las aristas entre dos conjuntos de tablas comprimidas
/// pertenecientes a dos filings de la misma compania, con peso >= `MIN_EDGE_WEIGHT`.
pub fn connect(from_tables: &[CompressedTable], to_tables: &[CompressedTable]) -> Vec<Edge> {
    connect_with_min_weight(from_tables, to_tables, MIN_EDGE_WEIGHT)
}

/// Igual que [`connect`], con el umbral de peso minimo configurable
/// (spec.md S9b: expuesto desde `Config`, no forzado al default).
pub fn connect_with_min_weight(
    from_tables: &[CompressedTable],
    to_tables: &[CompressedTable],
    min_weight: i64,
) -> Vec<Edge> {
    let mut edges = Vec::new();
    for t_from in from_tables {
        for t_to in to_tables {
            let w = weight(&t_from.matrix, t_from.header_index, &t_to.matrix, t_to.header_index);
            if w >= min_weight {
                edges.push(Edge { from: t_from.id, to: t_to.id, weight: w });
            }
        }
    }
    edges
}

fn row_overlap(a: &CompressedMatrix, header_index_a: i32, b: &CompressedMatrix) -> i64 {
    let start = header_index_a.max(0) as usize;

    let mut labels: Vec<&str> = Vec::new();
    for row in a.iter().skip(start) {
        if let Some(first) = row.first() {
            if !first.is_empty() {
                labels.push(first.as_str());
            }
        }
    }

    let mut matched = 0i64;
    for row in b {
        let Some(first) = row.first() else { continue };
        if let Some(pos) = labels.iter().position(|label| *label == first.as_str()) {
            labels.remove(pos);
            matched += 1;
        }
    }
    matched
}

fn header_overlap(
    a: &CompressedMatrix,
    header_index_a: i32,
    b: &CompressedMatrix,
    header_index_b: i32,
) -> i64 {
    let head_a = header_index_a.max(0) as usize;
    let head_b = header_index_b.max(0) as usize;
    if a.len() < head_a || b.len() < head_b {
        return 0;
    }

    let mut remaining: Vec<&str> = Vec::new();
    for row in a.iter().take(head_a) {
        if row.len() > 1 {
            remaining.extend(row[1..].iter().map(String::as_str));
        }
    }

    let mut matched = 0i64;
    'rows: for row in b.iter().take(head_b) {
        if row.len() <= 1 {
            continue;
        }
        for cell in &row[1..] {
            if remaining.is_empty() {
                break 'rows;
            }
            if let Some(pos) = remaining.iter().position(|label| *label == cell.as_str()) {
                remaining.remove(pos);
                matched += 1;
            }
        }
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn row_overlap_counts_each_label_once_per_occurrence_in_b() {
        let a: CompressedMatrix = vec![row(&["header"]), row(&["cash"]), row(&["debt"])];
        let b: CompressedMatrix = vec![row(&["header"]), row(&["cash"]), row(&["cash"])];
        assert_eq!(row_overlap(&a, 1, &b), 1);
    }

    #[test]
    fn header_overlap_counts_shared_column_labels() {
        let a: CompressedMatrix = vec![row(&["label", "2022", "2023"]), row(&["cash", "1", "2"])];
        let b: CompressedMatrix = vec![row(&["label", "2023", "2024"]), row(&["cash", "2", "3"])];
        assert_eq!(header_overlap(&a, 1, &b, 1), 1);
    }

    #[test]
    fn header_overlap_guards_against_undersized_tables() {
        let a: CompressedMatrix = vec![row(&["only_row"])];
        let b: CompressedMatrix = vec![row(&["label", "x"]), row(&["data", "y"])];
        assert_eq!(header_overlap(&a, 2, &b, 1), 0);
    }

    #[test]
    fn combined_weight_below_threshold_is_not_an_edge() {
        let a: CompressedMatrix = vec![row(&["label", "x"]), row(&["unique_a", "1"])];
        let b: CompressedMatrix = vec![row(&["label", "y"]), row(&["unique_b", "2"])];
        assert!(weight(&a, 1, &b, 1) < MIN_EDGE_WEIGHT);
    }
}
