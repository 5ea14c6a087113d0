// [libs/domain/models/src/filing.rs]
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Forma regulatoria reconocida por el pipeline. Cualquier otra forma
/// es filtrada en el cliente de catalogo (C2) antes de llegar aqui.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FormType {
    #[serde(rename = "10-K")]
    TenK,
    #[serde(rename = "10-Q")]
    TenQ,
}

impl FormType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "10-K" => Some(Self::TenK),
            "10-Q" => Some(Self::TenQ),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TenK => "10-K",
            Self::TenQ => "10-Q",
        }
    }
}

/// Una presentacion regulatoria individual.
///
/// `fully_stored` es la unica fuente de verdad para la resumption
/// idempotente: Extract solo vuelve a encolar filings donde es `false`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Filing {
    /// Numero de accession sin guiones (20 caracteres).
    pub id: String,
    pub cik: String,
    pub form: FormType,
    pub filing_date: Option<NaiveDate>,
    pub last_modified: Option<DateTime<Utc>>,
    pub primary_document_key: String,
    pub fully_stored: bool,
}

impl Filing {
    /// Quita los guiones de un numero de accession source (`NNNNNNNNNN-NN-NNNNNN`).
    pub fn canonicalize_id(accession_number: &str) -> String {
        accession_number.chars().filter(|c| *c != '-').collect()
    }
}

/// El documento primario: payload de bytes opacos mas su clave y timestamp.
/// Nunca se persiste en el almacen relacional, solo en el blob store.
#[derive(Debug, Clone)]
pub struct File {
    pub key: String,
    pub last_modified: DateTime<Utc>,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalizes_accession_number() {
        assert_eq!(
            Filing::canonicalize_id("0000320193-23-000106"),
            "000032019323000106"
        );
    }

    #[test]
    fn parses_recognised_forms_only() {
        assert_eq!(FormType::parse("10-K"), Some(FormType::TenK));
        assert_eq!(FormType::parse("10-Q"), Some(FormType::TenQ));
        assert_eq!(FormType::parse("8-K"), None);
    }
}
