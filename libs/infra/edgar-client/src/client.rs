// [libs/infra/edgar-client/src/client.rs]
/*!
 * =================================================================
 * APARATO: CLIENTE DEL CATALOGO DE FILINGS (ESTRATO L4)
 * CLASIFICACION: INFRASTRUCTURE ADAPTER
 * RESPONSABILIDAD: UNICO PUNTO DE CONTACTO CON LA API DE SUBMISSIONS
 *
 * El piso de 200ms entre llamadas es deliberadamente conservador frente
 * al limite publico de 10rps de la SEC: el pipeline nunca necesita el
 * techo completo y un vecino ruidoso no debe poder tumbar la cuenta.
 * =================================================================
 */

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime, Utc};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use pipeline_models::{Company, File, Filing, FormType, Ticker};
use reqwest::{Client, Response};
use tracing::{info, instrument, warn};

use crate::errors::EdgarClientError;
use crate::schema::{expand, DirectoryResponse, FilingColumns, SubmissionsResponse};

const SUBMISSIONS_BASE: &str = "https://data.sec.gov/submissions";
const ARCHIVES_BASE: &str = "https://www.sec.gov/Archives/edgar/data";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Cliente del catalogo de presentaciones (C2). Sin estado de dominio
/// propio: cada llamada es autonoma y puede repetirse sin coordinacion.
pub struct EdgarClient {
    http: Client,
    rate_limiter: SharedRateLimiter,
}

impl EdgarClient {
    pub fn new(user_agent: impl Into<String>) -> Self {
        let quota =
            Quota::with_period(Duration::from_millis(200)).expect("200ms is a non-zero duration");
        Self {
            http: Client::builder()
                .timeout(Duration::from_secs(30))
                .user_agent(user_agent.into())
                .build()
                .expect("CRITICAL: failed to initialize EDGAR HTTP session"),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_company(&self, cik: &str) -> Result<Company, EdgarClientError> {
        let padded = Company::pad_cik(cik);
        let submissions = self.fetch_submissions(&padded).await?;
        let tickers = submissions
            .tickers
            .iter()
            .zip(submissions.exchanges.iter())
            .map(|(value, exchange)| Ticker {
                value: value.clone(),
                exchange: if exchange.is_empty() { None } else { Some(exchange.clone()) },
            })
            .collect();
        Ok(Company { cik: padded, name: submissions.name, tickers })
    }

    /// Recupera todos los filings 10-K/10-Q de un emisor, fusionando la
    /// pagina `recent` con cada sub-documento historico referenciado en
    /// `filings.files`. Deduplica por id, favoreciendo la primera
    /// ocurrencia (`recent` siempre se procesa primero).
    #[instrument(skip(self))]
    pub async fn get_filings(&self, cik: &str) -> Result<Vec<Filing>, EdgarClientError> {
        let padded = Company::pad_cik(cik);
        let submissions = self.fetch_submissions(&padded).await?;

        let mut pages: Vec<FilingColumns> = vec![submissions.filings.recent];
        for old in &submissions.filings.files {
            let url = format!("{SUBMISSIONS_BASE}/{}", old.name);
            pages.push(self.get_json(&url).await?);
        }

        let mut seen = HashSet::new();
        let mut filings = Vec::new();
        for page in &pages {
            for entry in expand(page) {
                let Some(form) = FormType::parse(&entry.form) else { continue };
                if !entry.primary_document.ends_with(".htm") {
                    continue;
                }
                let id = Filing::canonicalize_id(&entry.accession_number);
                if !seen.insert(id.clone()) {
                    continue;
                }
                let filing_date = NaiveDate::parse_from_str(&entry.filing_date, "%Y-%m-%d").ok();
                if filing_date.is_none() {
                    warn!("⚠️ [EDGAR_CLIENT]: unparseable filing date '{}' on {}, keeping filing with no date", entry.filing_date, id);
                }
                filings.push(Filing {
                    id,
                    cik: padded.clone(),
                    form,
                    filing_date,
                    last_modified: None,
                    primary_document_key: entry.primary_document,
                    fully_stored: false,
                });
            }
        }
        info!("📑 [EDGAR_CLIENT]: resolved {} filings for cik {}", filings.len(), padded);
        Ok(filings)
    }

    /// Recupera el documento primario de un filing: lista el directorio
    /// del accession number y descarga exactamente el blob nombrado `key`.
    #[instrument(skip(self))]
    pub async fn get_file(&self, cik: &str, filing_id: &str, key: &str) -> Result<File, EdgarClientError> {
        let unpadded = cik.trim_start_matches('0');
        let index_url = format!("{ARCHIVES_BASE}/{unpadded}/{filing_id}/index.json");
        let listing: DirectoryResponse = self.get_json(&index_url).await?;

        let item = listing
            .directory
            .item
            .into_iter()
            .find(|item| item.name == key)
            .ok_or_else(|| EdgarClientError::NotFound {
                cik: cik.to_string(),
                filing_id: filing_id.to_string(),
                key: key.to_string(),
            })?;

        let last_modified = NaiveDateTime::parse_from_str(&item.last_modified, "%Y-%m-%d %H:%M:%S")
            .map(|naive| naive.and_utc())
            .unwrap_or_else(|_| Utc::now());

        let file_url = format!("{ARCHIVES_BASE}/{unpadded}/{filing_id}/{key}");
        let bytes = self.get_bytes(&file_url).await?;

        Ok(File { key: key.to_string(), last_modified, bytes })
    }

    async fn fetch_submissions(&self, padded_cik: &str) -> Result<SubmissionsResponse, EdgarClientError> {
        let url = format!("{SUBMISSIONS_BASE}/CIK{padded_cik}.json");
        self.get_json(&url).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, EdgarClientError> {
        let response = self.send(url).await?;
        Ok(response.json::<T>().await?)
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, EdgarClientError> {
        let response = self.send(url).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn send(&self, url: &str) -> Result<Response, EdgarClientError> {
        self.rate_limiter.until_ready().await;
        let response = self
            .http
            .get(url)
            .header("Accept", "*/*")
            .header("Connection", "keep-alive")
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(EdgarClientError::Status(response.status()));
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpadded_cik_strips_only_leading_zeros() {
        assert_eq!("0000320193".trim_start_matches('0'), "320193");
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limiter_spaces_requests_by_the_conservative_floor() {
        let quota = Quota::with_period(Duration::from_millis(200)).unwrap();
        let limiter: SharedRateLimiter = Arc::new(RateLimiter::direct(quota));

        limiter.until_ready().await;
        let started = tokio::time::Instant::now();
        limiter.until_ready().await;
        assert!(started.elapsed() >= Duration::from_millis(200));
    }
}
