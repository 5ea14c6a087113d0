// [libs/infra/edgar-client/src/errors.rs]
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EdgarClientError {
    #[error("[L4_EDGAR_NET_FAULT]: UPLINK_UNREACHABLE -> {0}")]
    Transport(#[from] reqwest::Error),

    #[error("[L4_EDGAR_HTTP_FAULT]: REJECTED_STATUS -> {0}")]
    Status(reqwest::StatusCode),

    /// El documento principal no aparece en el listado de directorio del
    /// filing; puede significar que la SEC aun no termino de indexarlo.
    #[error("[L4_EDGAR_LOOKUP_FAULT]: DOCUMENT_NOT_IN_DIRECTORY -> cik={cik} id={filing_id} key={key}")]
    NotFound {
        cik: String,
        filing_id: String,
        key: String,
    },
}
