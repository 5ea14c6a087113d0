// [apps/edgar-pipeline/src/web/mod.rs]
/*!
 * APARATO: SUPERFICIE DE ETIQUETADO (ESTRATO L6, FUERA DEL NUCLEO)
 * RESPONSABILIDAD: DOS RUTAS SOBRE `LabelUser`/`Classification`
 *
 * El contrato de autenticacion/sesion completo esta fuera de alcance de
 * la especificacion; este stub resuelve el bearer token como el
 * username de un `LabelUser` ya existente, nada mas.
 */

pub mod routes;
pub mod state;

pub use state::WebState;
