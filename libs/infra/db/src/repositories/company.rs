// [libs/infra/db/src/repositories/company.rs]
/*!
 * APARATO: REPOSITORIO DE COMPANIAS (ESTRATO L3)
 * RESPONSABILIDAD: SEMILLA DE ISSUERS Y SUS TICKERS, NUNCA MUTADOS
 */

use crate::client::PgClient;
use crate::errors::DbError;
use pipeline_models::{Company, Ticker};
use sqlx::Row;
use tracing::instrument;

pub struct CompanyRepository<'a> {
    client: &'a PgClient,
}

impl<'a> CompanyRepository<'a> {
    pub fn new(client: &'a PgClient) -> Self {
        Self { client }
    }

    /// Inserta la compania y sus tickers en una unica transaccion. Un
    /// ticker duplicado no aborta la semilla completa: se registra y se
    /// continua con el resto (la re-ejecucion de `init` es idempotente
    /// a nivel de compania mediante la PK de `cik`, no a nivel de ticker).
    #[instrument(skip(self, company))]
    pub async fn insert_company(&self, company: &Company) -> Result<(), DbError> {
        let mut tx = self.client.pool().begin().await?;

        sqlx::query("INSERT INTO company (cik, name) VALUES ($1, $2)")
            .bind(&company.cik)
            .bind(&company.name)
            .execute(&mut *tx)
            .await?;

        for ticker in &company.tickers {
            sqlx::query(
                "INSERT INTO ticker (id, company_cik, value, exchange) VALUES ($1, $2, $3, $4)",
            )
            .bind(uuid::Uuid::now_v7())
            .bind(&company.cik)
            .bind(&ticker.value)
            .bind(&ticker.exchange)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_ciks(&self) -> Result<Vec<String>, DbError> {
        let rows = sqlx::query("SELECT cik FROM company").fetch_all(self.client.pool()).await?;
        Ok(rows.into_iter().map(|row| row.get("cik")).collect())
    }

    #[instrument(skip(self))]
    pub async fn company_by_cik(&self, cik: &str) -> Result<Company, DbError> {
        let company_row = sqlx::query("SELECT cik, name FROM company WHERE cik = $1")
            .bind(cik)
            .fetch_optional(self.client.pool())
            .await?
            .ok_or(DbError::NotFound)?;

        let ticker_rows =
            sqlx::query("SELECT value, exchange FROM ticker WHERE company_cik = $1")
                .bind(cik)
                .fetch_all(self.client.pool())
                .await?;

        let tickers = ticker_rows
            .into_iter()
            .map(|row| Ticker { value: row.get("value"), exchange: row.get("exchange") })
            .collect();

        Ok(Company { cik: company_row.get("cik"), name: company_row.get("name"), tickers })
    }
}
