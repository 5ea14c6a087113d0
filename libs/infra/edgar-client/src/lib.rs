// [libs/infra/edgar-client/src/lib.rs]
/*!
 * =================================================================
 * APARATO: ADAPTADOR DEL CATALOGO DE FILINGS (ESTRATO L4)
 * CLASIFICACION: INFRASTRUCTURE LAYER
 * RESPONSABILIDAD: UNICA PUERTA DE ENTRADA A LA API DE SUBMISSIONS DE LA SEC
 * =================================================================
 */

mod client;
mod errors;
mod schema;

pub use client::EdgarClient;
pub use errors::EdgarClientError;
