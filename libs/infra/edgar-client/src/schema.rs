// [libs/infra/edgar-client/src/schema.rs]
//! Forma cruda de la respuesta JSON de `data.sec.gov/submissions`. Los
//! cuatro arreglos paralelos de `FilingColumns` llegan sin garantia de
//! tipo mas alla de su longitud compartida.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct SubmissionsResponse {
    pub name: String,
    #[serde(default)]
    pub tickers: Vec<String>,
    #[serde(default)]
    pub exchanges: Vec<String>,
    pub filings: FilingsSection,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FilingsSection {
    pub recent: FilingColumns,
    #[serde(default)]
    pub files: Vec<OldFileRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OldFileRef {
    pub name: String,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct FilingColumns {
    #[serde(rename = "accessionNumber", default)]
    pub accession_number: Vec<String>,
    #[serde(rename = "filingDate", default)]
    pub filing_date: Vec<String>,
    #[serde(default)]
    pub form: Vec<String>,
    #[serde(rename = "primaryDocument", default)]
    pub primary_document: Vec<String>,
}

/// Listado de directorio de `/Archives/edgar/data/<cik>/<id>/index.json`.
#[derive(Debug, Deserialize)]
pub(crate) struct DirectoryResponse {
    pub directory: Directory,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Directory {
    pub item: Vec<DirectoryItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DirectoryItem {
    pub name: String,
    #[serde(rename = "last-modified")]
    pub last_modified: String,
}

/// Una fila de `FilingColumns` desplegada a sus cuatro campos con nombre.
pub(crate) struct FilingEntry {
    pub accession_number: String,
    pub filing_date: String,
    pub form: String,
    pub primary_document: String,
}

/// Zipea los cuatro arreglos paralelos en filas; una pagina con arreglos
/// de longitud dispar simplemente se trunca al mas corto.
pub(crate) fn expand(columns: &FilingColumns) -> Vec<FilingEntry> {
    columns
        .accession_number
        .iter()
        .zip(columns.filing_date.iter())
        .zip(columns.form.iter())
        .zip(columns.primary_document.iter())
        .map(|(((accession_number, filing_date), form), primary_document)| FilingEntry {
            accession_number: accession_number.clone(),
            filing_date: filing_date.clone(),
            form: form.clone(),
            primary_document: primary_document.clone(),
        })
        .collect()
}
