// [libs/infra/db/src/lib.rs]
/*!
 * =================================================================
 * APARATO: ADAPTADOR DE PERSISTENCIA RELACIONAL (ESTRATO L3)
 * CLASIFICACION: INFRASTRUCTURE LAYER
 * RESPONSABILIDAD: UNICA AUTORIDAD SOBRE EL ESQUEMA POSTGRES DEL CATALOGO
 * =================================================================
 */

pub mod client;
pub mod errors;
pub mod repositories;
mod schema;

pub use client::PgClient;
pub use errors::DbError;
pub use repositories::{CompanyRepository, EdgeRepository, FilingRepository, LabelRepository, TableRepository};
