// [libs/infra/db/src/repositories/filing.rs]
/*!
 * APARATO: REPOSITORIO DE FILINGS (ESTRATO L3)
 * RESPONSABILIDAD: `fully_stored` COMO UNICA FUENTE DE VERDAD PARA RESUMPTION
 */

use crate::client::PgClient;
use crate::errors::DbError;
use pipeline_models::{Filing, FormType};
use sqlx::Row;
use std::collections::HashSet;
use tracing::instrument;

pub struct FilingRepository<'a> {
    client: &'a PgClient,
}

impl<'a> FilingRepository<'a> {
    pub fn new(client: &'a PgClient) -> Self {
        Self { client }
    }

    /// Ids ya marcados `fully_stored=true` para una compania; Extract los
    /// usa para no volver a encolar un filing ya archivado.
    #[instrument(skip(self))]
    pub async fn fully_stored_ids(&self, cik: &str) -> Result<HashSet<String>, DbError> {
        let rows = sqlx::query("SELECT id FROM filing WHERE company_cik = $1 AND fully_stored = TRUE")
            .bind(cik)
            .fetch_all(self.client.pool())
            .await?;
        Ok(rows.into_iter().map(|row| row.get("id")).collect())
    }

    /// Inserta con `fully_stored=false`. Una violacion de unicidad sobre
    /// la PK se propaga como `DbError::Duplicate`; el llamador (Extract)
    /// decide tragarla.
    #[instrument(skip(self, filing))]
    pub async fn insert(&self, filing: &Filing) -> Result<(), DbError> {
        sqlx::query(
            "INSERT INTO filing (id, company_cik, form, filing_date, last_modified, original_file, fully_stored)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&filing.id)
        .bind(&filing.cik)
        .bind(filing.form.as_str())
        .bind(filing.filing_date)
        .bind(filing.last_modified)
        .bind(&filing.primary_document_key)
        .bind(filing.fully_stored)
        .execute(self.client.pool())
        .await?;
        Ok(())
    }

    /// Flip irreversible hacia `true`, invocado solo por Archive tras
    /// persistir el blob primario con exito.
    #[instrument(skip(self))]
    pub async fn mark_fully_stored(&self, filing_id: &str) -> Result<(), DbError> {
        sqlx::query("UPDATE filing SET fully_stored = TRUE WHERE id = $1")
            .bind(filing_id)
            .execute(self.client.pool())
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn by_id(&self, filing_id: &str) -> Result<Filing, DbError> {
        let row = sqlx::query(
            "SELECT id, company_cik, form, filing_date, last_modified, original_file, fully_stored
             FROM filing WHERE id = $1",
        )
        .bind(filing_id)
        .fetch_optional(self.client.pool())
        .await?
        .ok_or(DbError::NotFound)?;

        let form_raw: String = row.get("form");
        let form = FormType::parse(&form_raw).ok_or(DbError::NotFound)?;

        Ok(Filing {
            id: row.get("id"),
            cik: row.get("company_cik"),
            form,
            filing_date: row.get("filing_date"),
            last_modified: row.get("last_modified"),
            primary_document_key: row.get("original_file"),
            fully_stored: row.get("fully_stored"),
        })
    }
}
