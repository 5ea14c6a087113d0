// [libs/infra/db/src/schema.rs]
/*!
 * =================================================================
 * APARATO: ESQUEMA SOBERANO DEL CATALOGO DE FILINGS (ESTRATO L3)
 * CLASIFICACION: INFRASTRUCTURE BOOTSTRAP
 * RESPONSABILIDAD: CREACION IDEMPOTENTE DEL ARBOL RELACIONAL
 *
 * `table` es palabra reservada ambigua en algunos contextos SQL; la
 * tabla de tablas crudas se nombra `filing_table` para no requerir
 * comillas en cada consulta.
 * =================================================================
 */

use crate::errors::DbError;
use sqlx::PgPool;
use tracing::{info, instrument};

const SCHEMA_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS company (
    cik  TEXT PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS ticker (
    id          UUID PRIMARY KEY,
    company_cik TEXT NOT NULL REFERENCES company(cik),
    value       TEXT NOT NULL UNIQUE,
    exchange    TEXT
);

CREATE TABLE IF NOT EXISTS filing (
    id            TEXT PRIMARY KEY,
    company_cik   TEXT NOT NULL REFERENCES company(cik),
    form          TEXT NOT NULL,
    filing_date   TIMESTAMPTZ,
    last_modified TIMESTAMPTZ,
    original_file TEXT NOT NULL,
    fully_stored  BOOLEAN NOT NULL DEFAULT FALSE
);

CREATE TABLE IF NOT EXISTS filing_table (
    id            UUID PRIMARY KEY,
    filing_id     TEXT NOT NULL REFERENCES filing(id),
    index         INT NOT NULL,
    header_index  INT NOT NULL,
    factor        TEXT NOT NULL DEFAULT '',
    raw_matrix    JSONB NOT NULL,
    UNIQUE (filing_id, index)
);

CREATE TABLE IF NOT EXISTS compressed_table (
    id            UUID PRIMARY KEY,
    original_id   UUID NOT NULL UNIQUE REFERENCES filing_table(id),
    factor        TEXT NOT NULL DEFAULT '',
    header_index  INT NOT NULL,
    matrix        JSONB NOT NULL
);

CREATE TABLE IF NOT EXISTS edge (
    from_table UUID NOT NULL REFERENCES compressed_table(id),
    to_table   UUID NOT NULL REFERENCES compressed_table(id),
    weight     BIGINT NOT NULL,
    UNIQUE (from_table, to_table)
);

CREATE TABLE IF NOT EXISTS label_user (
    id       UUID PRIMARY KEY,
    username TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS classification (
    id                  UUID PRIMARY KEY,
    compressed_table_id UUID NOT NULL REFERENCES compressed_table(id),
    user_id             UUID NOT NULL REFERENCES label_user(id),
    label               TEXT NOT NULL,
    created_at          TIMESTAMPTZ NOT NULL DEFAULT now()
);
"#;

#[instrument(skip_all)]
pub async fn apply_schema(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query(SCHEMA_DDL).execute(pool).await?;
    info!("🗄️  [SCHEMA]: filing catalogue schema applied");
    Ok(())
}
