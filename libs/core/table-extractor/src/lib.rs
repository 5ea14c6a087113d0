// [libs/core/table-extractor/src/lib.rs]
/*!
 * =================================================================
 * APARATO: EXTRACTOR DE TABLAS HTML (ESTRATO L3)
 * CLASIFICACION: CORE ALGORITHM (C3)
 * RESPONSABILIDAD: RECORRIDO DE ARBOL PURO, SIN ESTADO COMPARTIDO
 *
 * Cada tabla se extrae de forma independiente; nada se acumula entre
 * invocaciones. La compresion (pegado de celdas, factor normalizado)
 * vive aguas abajo en `pipeline-matrix-compressor`.
 * =================================================================
 */

use ego_tree::NodeRef;
use pipeline_models::RawMatrix;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::instrument;

/// Una tabla tal como sale del arbol, antes de cualquier compresion.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedTable {
    pub raw_matrix: RawMatrix,
    pub header_index: i32,
    pub factor: String,
}

/// Defaults de spec.md S9b; `Config` puede sobreescribirlos en tiempo de arranque.
pub const DEFAULT_FACTOR_WALK_STEPS: usize = 8;
pub const DEFAULT_FACTOR_MAX_TEXT_LEN: usize = 300;

/// Extrae cada `<table>` del documento, en orden de aparicion, usando la
/// ventana de busqueda de factor por default.
#[instrument(skip_all, fields(byte_len = html_bytes.len()))]
pub fn extract_tables(html_bytes: &[u8]) -> Vec<ExtractedTable> {
    extract_tables_with_factor_window(html_bytes, DEFAULT_FACTOR_WALK_STEPS, DEFAULT_FACTOR_MAX_TEXT_LEN)
}

/// Igual que [`extract_tables`], con la ventana de busqueda de factor
/// (pasos hacia atras, longitud maxima de texto candidato) configurable.
#[instrument(skip_all, fields(byte_len = html_bytes.len()))]
pub fn extract_tables_with_factor_window(
    html_bytes: &[u8],
    factor_walk_steps: usize,
    factor_max_text_len: usize,
) -> Vec<ExtractedTable> {
    let text = String::from_utf8_lossy(html_bytes);
    let document = Html::parse_document(&text);
    let table_selector = Selector::parse("table").expect("static selector is valid");

    document
        .select(&table_selector)
        .map(|table_el| extract_one(table_el, factor_walk_steps, factor_max_text_len))
        .collect()
}

fn extract_one(table_el: ElementRef, factor_walk_steps: usize, factor_max_text_len: usize) -> ExtractedTable {
    let rows = collect_matches(*table_el, "tr");

    let mut raw_matrix = Vec::with_capacity(rows.len());
    let mut header_index: i32 = 0;
    let mut counting = true;

    for row_el in &rows {
        if counting {
            if row_is_header_band(*row_el) {
                counting = false;
            } else {
                header_index += 1;
            }
        }
        raw_matrix.push(collect_row_cells(*row_el));
    }

    ExtractedTable {
        raw_matrix,
        header_index,
        factor: capture_factor(table_el, factor_walk_steps, factor_max_text_len),
    }
}

/// Recorrido en profundidad que se detiene al primer nodo cuyo nombre
/// de etiqueta coincide; no desciende mas alla de una coincidencia, lo
/// que excluye naturalmente filas de tablas anidadas dentro de una celda.
fn collect_matches<'a>(node: NodeRef<'a, Node>, tag: &str) -> Vec<ElementRef<'a>> {
    let mut out = Vec::new();
    walk_for_matches(node, tag, &mut out);
    out
}

fn walk_for_matches<'a>(node: NodeRef<'a, Node>, tag: &str, out: &mut Vec<ElementRef<'a>>) {
    if let Some(el) = ElementRef::wrap(node) {
        if el.value().name() == tag {
            out.push(el);
            return;
        }
    }
    for child in node.children() {
        walk_for_matches(child, tag, out);
    }
}

fn collect_row_cells(row: ElementRef) -> Vec<Vec<String>> {
    let mut cells = Vec::new();
    for td in collect_matches(*row, "td") {
        let fragments: Vec<String> = td.text().map(|s| s.to_string()).collect();
        let colspan = td
            .value()
            .attr("colspan")
            .and_then(|raw| raw.parse::<usize>().ok())
            .unwrap_or(1);
        for _ in 0..colspan {
            cells.push(fragments.clone());
        }
    }
    cells
}

fn row_is_header_band(row: ElementRef) -> bool {
    if element_has_band_marker(row) {
        return true;
    }
    collect_matches(*row, "td")
        .into_iter()
        .any(element_has_band_marker)
}

fn element_has_band_marker(el: ElementRef) -> bool {
    let value = el.value();
    if value.attr("bgcolor").is_some()
        || value.attr("background-color").is_some()
        || value.attr("background").is_some()
    {
        return true;
    }
    value.attr("style").is_some_and(|style| {
        let lower = style.to_lowercase();
        lower.contains("bgcolor:")
            || lower.contains("background-color:")
            || lower.contains("background:")
    })
}

fn capture_factor(table_el: ElementRef, factor_walk_steps: usize, factor_max_text_len: usize) -> String {
    let exclude = table_el.id();
    let mut current: NodeRef<Node> = *table_el;

    for _ in 0..factor_walk_steps {
        let next = match current.prev_sibling() {
            Some(sibling) => sibling,
            None => match current.parent() {
                Some(parent) => parent,
                None => break,
            },
        };
        current = next;

        let mut text = String::new();
        collect_text_excluding(current, exclude, &mut text);

        if text.chars().count() > factor_max_text_len {
            break;
        }

        let stripped: String = text.to_lowercase().chars().filter(|c| c.is_alphabetic()).collect();
        if stripped.contains("thousand") || stripped.contains("million") {
            return text;
        }
    }

    String::new()
}

fn collect_text_excluding(node: NodeRef<Node>, exclude: ego_tree::NodeId, out: &mut String) {
    if node.id() == exclude {
        return;
    }
    if let Node::Text(text) = node.value() {
        out.push_str(text);
    }
    for child in node.children() {
        collect_text_excluding(child, exclude, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colspan_repeats_cell_text_in_row() {
        let html = br#"<table><tr><td colspan="3">x</td></tr></table>"#;
        let tables = extract_tables(html);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].raw_matrix[0].len(), 3);
    }

    #[test]
    fn colspan_zero_drops_the_cell_entirely() {
        let html = br#"<table><tr><td colspan="0">x</td><td>y</td></tr></table>"#;
        let tables = extract_tables(html);
        assert_eq!(tables[0].raw_matrix[0].len(), 1);
        assert_eq!(tables[0].raw_matrix[0][0], vec!["y".to_string()]);
    }

    #[test]
    fn malformed_colspan_defaults_to_one() {
        let html = br#"<table><tr><td colspan="nope">x</td></tr></table>"#;
        let tables = extract_tables(html);
        assert_eq!(tables[0].raw_matrix[0].len(), 1);
    }

    #[test]
    fn bgcolor_on_row_closes_header_band() {
        let html = br#"
            <table>
                <tr><td>Revenue</td><td>2023</td></tr>
                <tr bgcolor="#ffffff"><td>cash</td><td>10</td></tr>
                <tr><td>debt</td><td>20</td></tr>
            </table>"#;
        let tables = extract_tables(html);
        assert_eq!(tables[0].header_index, 1);
    }

    #[test]
    fn style_background_color_on_cell_closes_header_band() {
        let html = br#"
            <table>
                <tr><td>Revenue</td></tr>
                <tr><td style="background-color: #eee">cash</td></tr>
            </table>"#;
        let tables = extract_tables(html);
        assert_eq!(tables[0].header_index, 1);
    }

    #[test]
    fn no_header_markers_counts_every_row() {
        let html = br#"
            <table><tr><td>a</td></tr><tr><td>b</td></tr></table>"#;
        let tables = extract_tables(html);
        assert_eq!(tables[0].header_index, 2);
    }

    #[test]
    fn factor_text_is_captured_from_preceding_sibling() {
        let html = br#"
            <div>
                <p>(in thousands, except per share amounts)</p>
                <table><tr><td>x</td></tr></table>
            </div>"#;
        let tables = extract_tables(html);
        assert!(tables[0].factor.to_lowercase().contains("thousand"));
    }

    #[test]
    fn nested_table_rows_are_not_pulled_into_outer_table() {
        let html = br#"
            <table>
                <tr><td><table><tr><td>inner</td></tr></table></td></tr>
            </table>"#;
        let tables = extract_tables(html);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].raw_matrix.len(), 1);
    }
}
