// [apps/edgar-pipeline/src/lib.rs]
/*!
 * APARATO: RAIZ DE LA CRATE (ESTRATO L6)
 * RESPONSABILIDAD: REEXPORTAR LOS MODULOS PARA `main.rs` Y PRUEBAS DE INTEGRACION
 */

pub mod cli;
pub mod config;
pub mod messages;
pub mod orchestrator;
pub mod services;
pub mod state;
pub mod web;
