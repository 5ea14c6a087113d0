// [libs/infra/db/src/errors.rs]
/*!
 * =================================================================
 * APARATO: DATABASE ERROR CATALOG (ESTRATO L3)
 * CLASIFICACION: INFRASTRUCTURE CORE
 * RESPONSABILIDAD: MAPEO SQLSTATE -> SEMANTICA DE DOMINIO
 *
 * `23505` (unique_violation) y `23503` (foreign_key_violation) son los
 * unicos codigos que el resto del pipeline necesita distinguir; todo
 * lo demas es un fallo de transporte opaco.
 * =================================================================
 */

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("[L3_DB_NET_FAULT]: DATABASE_UPLINK_SEVERED -> {0}")]
    Connection(String),

    /// Violacion de restriccion unica (SQLSTATE 23505). El llamador en
    /// Extract/Graph la trata como una re-ejecucion idempotente.
    #[error("[L3_DB_CONSTRAINT_FAULT]: DUPLICATE_KEY -> {0}")]
    Duplicate(String),

    /// Violacion de llave foranea (SQLSTATE 23503). Siempre un bug de
    /// orden de ejecucion; nunca se traga.
    #[error("[L3_DB_CONSTRAINT_FAULT]: MISSING_REFERENCE -> {0}")]
    InvalidRef(String),

    #[error("[L3_DB_LOOKUP_FAULT]: ROW_NOT_FOUND")]
    NotFound,

    #[error("[L3_DB_QUERY_FAULT]: SQL_QUERY_REJECTED -> {0}")]
    Query(sqlx::Error),

    #[error("[L3_DB_MAPPING_FAULT]: SERIALIZATION_VIOLATION -> {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            match db_err.code().as_deref() {
                Some("23505") => return DbError::Duplicate(db_err.message().to_string()),
                Some("23503") => return DbError::InvalidRef(db_err.message().to_string()),
                _ => {}
            }
        }
        if matches!(err, sqlx::Error::RowNotFound) {
            return DbError::NotFound;
        }
        DbError::Query(err)
    }
}
