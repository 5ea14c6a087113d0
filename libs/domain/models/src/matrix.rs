// [libs/domain/models/src/matrix.rs]
use serde::{Deserialize, Serialize};

/// Salida cruda del extractor (C3): cada celda conserva sus fragmentos de
/// texto originales; C4 decide como unirlos.
pub type RawMatrix = Vec<Vec<Vec<String>>>;

/// Salida normalizada de C4: una celda, una cadena.
pub type CompressedMatrix = Vec<Vec<String>>;

/// Unidad numerica normalizada capturada cerca de una tabla.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Factor {
    #[default]
    None,
    Thousand,
    Million,
}

impl Factor {
    /// Normaliza un texto de factor crudo segun la regla de C4 paso 6:
    /// `thousand` tiene prioridad sobre `million`; cualquier otra cosa es `None`.
    pub fn normalize(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        if lower.contains("thousand") {
            Self::Thousand
        } else if lower.contains("million") {
            Self::Million
        } else {
            Self::None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Thousand => "thousand",
            Self::Million => "million",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousand_wins_over_million_when_both_present() {
        assert_eq!(Factor::normalize("in thousands (except millions)"), Factor::Thousand);
    }

    #[test]
    fn unrecognised_text_normalizes_to_none() {
        assert_eq!(Factor::normalize("per share amounts"), Factor::None);
    }
}
