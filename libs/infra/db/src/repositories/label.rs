// [libs/infra/db/src/repositories/label.rs]
/*!
 * APARATO: REPOSITORIO DE ETIQUETADO (ESTRATO L3)
 * RESPONSABILIDAD: USUARIOS Y CLASIFICACIONES DE LA SUPERFICIE DE LABELLING
 */

use crate::client::PgClient;
use crate::errors::DbError;
use pipeline_models::{Classification, LabelUser};
use sqlx::Row;
use tracing::instrument;
use uuid::Uuid;

pub struct LabelRepository<'a> {
    client: &'a PgClient,
}

impl<'a> LabelRepository<'a> {
    pub fn new(client: &'a PgClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn create_user(&self, username: &str) -> Result<LabelUser, DbError> {
        let user = LabelUser { id: Uuid::now_v7(), username: username.to_string() };
        sqlx::query("INSERT INTO label_user (id, username) VALUES ($1, $2)")
            .bind(user.id)
            .bind(&user.username)
            .execute(self.client.pool())
            .await?;
        Ok(user)
    }

    /// Resuelve un usuario por nombre; respalda el stub de autenticacion
    /// bearer de la superficie de etiquetado (el token ES el username).
    #[instrument(skip(self))]
    pub async fn user_by_username(&self, username: &str) -> Result<LabelUser, DbError> {
        let row = sqlx::query("SELECT id, username FROM label_user WHERE username = $1")
            .bind(username)
            .fetch_optional(self.client.pool())
            .await?
            .ok_or(DbError::NotFound)?;
        Ok(LabelUser { id: row.get("id"), username: row.get("username") })
    }

    /// Tabla comprimida aleatoria aun no clasificada por nadie; respalda
    /// `GET /tables/random` de la API de etiquetado.
    #[instrument(skip(self))]
    pub async fn random_unlabelled_table(&self) -> Result<Uuid, DbError> {
        let row = sqlx::query(
            "SELECT c.id FROM compressed_table c
             LEFT JOIN classification l ON l.compressed_table_id = c.id
             WHERE l.id IS NULL
             ORDER BY random()
             LIMIT 1",
        )
        .fetch_optional(self.client.pool())
        .await?
        .ok_or(DbError::NotFound)?;
        Ok(row.get("id"))
    }

    #[instrument(skip(self, label))]
    pub async fn classify(
        &self,
        compressed_table_id: Uuid,
        user_id: Uuid,
        label: &str,
    ) -> Result<Classification, DbError> {
        let classification = Classification {
            id: Uuid::now_v7(),
            compressed_table_id,
            user_id,
            label: label.to_string(),
            created_at: chrono::Utc::now(),
        };

        sqlx::query(
            "INSERT INTO classification (id, compressed_table_id, user_id, label, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(classification.id)
        .bind(classification.compressed_table_id)
        .bind(classification.user_id)
        .bind(&classification.label)
        .bind(classification.created_at)
        .execute(self.client.pool())
        .await?;

        Ok(classification)
    }
}
