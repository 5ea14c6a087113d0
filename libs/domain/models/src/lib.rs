// [libs/domain/models/src/lib.rs]
/*!
 * =================================================================
 * APARATO: DOMAIN MODELS (ESTRATO L2)
 * CLASIFICACION: CONTRATOS DE DATOS SOBERANOS
 * RESPONSABILIDAD: DEFINICION UNICA DE LAS ENTIDADES DEL PIPELINE
 *
 * Estas estructuras no realizan I/O. Son el vocabulario compartido
 * entre el extractor (L3), los repositorios (L4) y el orquestador (L6).
 * =================================================================
 */

pub mod company;
pub mod filing;
pub mod label;
pub mod matrix;
pub mod table;

pub use company::{Company, Ticker};
pub use filing::{File, Filing, FormType};
pub use label::{Classification, LabelUser};
pub use matrix::{CompressedMatrix, Factor, RawMatrix};
pub use table::{CompressedTable, Edge, Table};
