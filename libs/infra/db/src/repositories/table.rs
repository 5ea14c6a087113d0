// [libs/infra/db/src/repositories/table.rs]
/*!
 * APARATO: REPOSITORIO DE TABLAS (ESTRATO L3)
 * RESPONSABILIDAD: HISTORIAL CRUDO/COMPRIMIDO COMO DOS FILAS SEPARADAS
 *
 * `filing_table` conserva la matriz cruda para siempre; `compressed_table`
 * es su hijo 1:1 y puede re-derivarse sin tocar la historia.
 * =================================================================
 */

use crate::client::PgClient;
use crate::errors::DbError;
use pipeline_models::{CompressedTable, Factor, Table};
use sqlx::Row;
use tracing::instrument;

pub struct TableRepository<'a> {
    client: &'a PgClient,
}

impl<'a> TableRepository<'a> {
    pub fn new(client: &'a PgClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, table))]
    pub async fn insert_raw(&self, table: &Table) -> Result<(), DbError> {
        let raw_matrix_json = serde_json::to_value(&table.raw_matrix)?;
        sqlx::query(
            "INSERT INTO filing_table (id, filing_id, index, header_index, factor, raw_matrix)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(table.id)
        .bind(&table.filing_id)
        .bind(table.index)
        .bind(table.header_index)
        .bind(&table.factor)
        .bind(raw_matrix_json)
        .execute(self.client.pool())
        .await?;
        Ok(())
    }

    #[instrument(skip(self, compressed))]
    pub async fn insert_compressed(&self, compressed: &CompressedTable) -> Result<(), DbError> {
        let matrix_json = serde_json::to_value(&compressed.matrix)?;
        sqlx::query(
            "INSERT INTO compressed_table (id, original_id, factor, header_index, matrix)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(compressed.id)
        .bind(compressed.original_id)
        .bind(compressed.factor.as_str())
        .bind(compressed.header_index)
        .bind(matrix_json)
        .execute(self.client.pool())
        .await?;
        Ok(())
    }

    /// Pagina de tablas crudas que aun no tienen hijo comprimido; usada
    /// por el comando `compress` para re-ejecutar C4 sobre el historico.
    #[instrument(skip(self))]
    pub async fn raw_missing_compressed(
        &self,
        page_size: i64,
        offset: i64,
    ) -> Result<Vec<Table>, DbError> {
        let rows = sqlx::query(
            "SELECT t.id, t.filing_id, t.index, t.header_index, t.factor, t.raw_matrix
             FROM filing_table t
             LEFT JOIN compressed_table c ON c.original_id = t.id
             WHERE c.id IS NULL
             ORDER BY t.id
             LIMIT $1 OFFSET $2",
        )
        .bind(page_size)
        .bind(offset)
        .fetch_all(self.client.pool())
        .await?;

        rows.into_iter()
            .map(|row| {
                let raw_matrix_json: serde_json::Value = row.get("raw_matrix");
                Ok(Table {
                    id: row.get("id"),
                    filing_id: row.get("filing_id"),
                    index: row.get("index"),
                    header_index: row.get("header_index"),
                    factor: row.get("factor"),
                    raw_matrix: serde_json::from_value(raw_matrix_json)?,
                })
            })
            .collect()
    }

    /// Todas las tablas comprimidas que pertenecen a un filing, usadas
    /// por la etapa Graph para calcular las aristas de un par.
    #[instrument(skip(self))]
    pub async fn compressed_for_filing(&self, filing_id: &str) -> Result<Vec<CompressedTable>, DbError> {
        let rows = sqlx::query(
            "SELECT c.id, c.original_id, c.factor, c.header_index, c.matrix
             FROM compressed_table c
             JOIN filing_table t ON t.id = c.original_id
             WHERE t.filing_id = $1
             ORDER BY t.index",
        )
        .bind(filing_id)
        .fetch_all(self.client.pool())
        .await?;

        rows.into_iter()
            .map(|row| {
                let matrix_json: serde_json::Value = row.get("matrix");
                let factor_raw: String = row.get("factor");
                Ok(CompressedTable {
                    id: row.get("id"),
                    original_id: row.get("original_id"),
                    factor: Factor::normalize(&factor_raw),
                    header_index: row.get("header_index"),
                    matrix: serde_json::from_value(matrix_json)?,
                })
            })
            .collect()
    }

    /// Reasigna el id del registro comprimido a un id nuevo al re-derivar
    /// (`compress`): borra la fila previa si existe y escribe la nueva.
    #[instrument(skip(self, compressed))]
    pub async fn upsert_compressed(&self, compressed: &CompressedTable) -> Result<(), DbError> {
        sqlx::query("DELETE FROM compressed_table WHERE original_id = $1")
            .bind(compressed.original_id)
            .execute(self.client.pool())
            .await?;
        self.insert_compressed(compressed).await
    }
}
