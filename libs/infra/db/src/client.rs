// [libs/infra/db/src/client.rs]
/*!
 * =================================================================
 * APARATO: CLIENTE DE CONEXION POSTGRES (ESTRATO L3)
 * CLASIFICACION: INFRASTRUCTURE LAYER
 * RESPONSABILIDAD: POOL UNICO, BOOTSTRAP DE ESQUEMA EN EL PRIMER ENLACE
 * =================================================================
 */

use crate::errors::DbError;
use crate::schema::apply_schema;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, instrument};

#[derive(Clone)]
pub struct PgClient {
    pool: PgPool,
}

impl PgClient {
    #[instrument(skip(password))]
    pub async fn connect(
        host: &str,
        port: u16,
        database: &str,
        user: &str,
        password: &str,
    ) -> Result<Self, DbError> {
        let connection_url = format!("postgres://{user}:{password}@{host}:{port}/{database}");
        info!("🔌 [DATABASE]: dialing catalogue store at {}:{}/{}", host, port, database);

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(&connection_url)
            .await
            .map_err(|e| DbError::Connection(e.to_string()))?;

        apply_schema(&pool).await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
