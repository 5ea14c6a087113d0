// [apps/edgar-pipeline/src/cli.rs]
/*!
 * APARATO: SUPERFICIE DE LINEA DE COMANDOS (ESTRATO L6)
 * RESPONSABILIDAD: UN UNICO BINARIO, CINCO COMANDOS (spec.md S6)
 */

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "edgar-pipeline", version, about = "Pipeline de extraccion de tablas financieras EDGAR")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Crea el esquema relacional (idempotente), lee `ciks.json` del
    /// almacen caliente y siembra cada compania.
    Init,
    /// Corre Extract -> Slice -> Archive (y el emparejamiento -> Graph)
    /// hasta completarse.
    Load {
        #[arg(long, default_value_t = 1)]
        n_extract: usize,
        #[arg(long, default_value_t = 5)]
        n_slice: usize,
        #[arg(long, default_value_t = 1)]
        n_archive: usize,
        #[arg(long, default_value_t = 5)]
        n_graph: usize,
    },
    /// Re-ejecuta C4 sobre toda tabla cruda que aun no tenga hijo
    /// comprimido, paginado de a 100 filas.
    Compress,
    /// Inserta un usuario de etiquetado con un UUID ordenable por tiempo.
    Create { username: String },
    /// Levanta la superficie de etiquetado en `:8000`.
    Webserver,
}
