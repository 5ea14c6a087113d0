// [libs/infra/db/src/repositories/edge.rs]
/*!
 * APARATO: REPOSITORIO DE ARISTAS (ESTRATO L3)
 * RESPONSABILIDAD: PERSISTENCIA DE RELACIONES ENTRE TABLAS COMPRIMIDAS
 */

use crate::client::PgClient;
use crate::errors::DbError;
use pipeline_models::Edge;
use tracing::instrument;

pub struct EdgeRepository<'a> {
    client: &'a PgClient,
}

impl<'a> EdgeRepository<'a> {
    pub fn new(client: &'a PgClient) -> Self {
        Self { client }
    }

    /// Inserta una arista. `(from, to)` duplicado se propaga como
    /// `DbError::Duplicate`; la etapa Graph la traga.
    #[instrument(skip(self))]
    pub async fn insert(&self, edge: &Edge) -> Result<(), DbError> {
        sqlx::query(
            "INSERT INTO edge (from_table, to_table, weight) VALUES ($1, $2, $3)",
        )
        .bind(edge.from)
        .bind(edge.to)
        .bind(edge.weight)
        .execute(self.client.pool())
        .await?;
        Ok(())
    }
}
