// [libs/domain/models/src/company.rs]
use serde::{Deserialize, Serialize};

/// Un emisor regulado, identificado por su Central Index Key (CIK).
///
/// Insertada una unica vez desde la lista semilla (`ciks.json`); el
/// pipeline nunca la muta despues de `init`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Company {
    /// CIK de 10 caracteres, rellenado con ceros a la izquierda.
    pub cik: String,
    pub name: String,
    pub tickers: Vec<Ticker>,
}

impl Company {
    pub fn new(cik: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            cik: Self::pad_cik(&cik.into()),
            name: name.into(),
            tickers: Vec::new(),
        }
    }

    /// Normaliza un CIK crudo (con o sin ceros) a la forma canonica de 10 digitos.
    pub fn pad_cik(raw: &str) -> String {
        format!("{:0>10}", raw.trim_start_matches('0'))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ticker {
    pub value: String,
    pub exchange: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_short_cik() {
        assert_eq!(Company::pad_cik("320193"), "0000320193");
    }

    #[test]
    fn leaves_full_length_cik_untouched() {
        assert_eq!(Company::pad_cik("0000320193"), "0000320193");
    }
}
