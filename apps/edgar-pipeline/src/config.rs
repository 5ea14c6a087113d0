// [apps/edgar-pipeline/src/config.rs]
/*!
 * =================================================================
 * APARATO: CONFIGURACION DE ARRANQUE (ESTRATO L6)
 * RESPONSABILIDAD: CARGA TIPADA Y EAGER-VALIDADA DE LAS VARIABLES DE ENTORNO
 *
 * Una variable ausente es `ConfigError`, fatal al arranque: coincide con
 * la unica clase de fallo fatal de arranque de la especificacion.
 * =================================================================
 */

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("[L6_CONFIG_FAULT]: MISSING_OR_MALFORMED_ENV -> {0}")]
    Load(#[from] envy::Error),
}

/// Variables de entorno requeridas por el pipeline (spec.md S6).
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    pub db_user: String,
    pub db_pass: String,
    /// Raiz de la carpeta local usada como almacen caliente entre Extract y Slice.
    pub b_path: PathBuf,
    /// Region de la boveda de archivo frio.
    pub region: String,
    /// Nombre del bucket/bucket-like de la boveda de archivo frio.
    pub archive: String,
    /// Identidad enviada en el header `User-Agent` de toda peticion a EDGAR.
    pub sec_user_agent: String,
    /// Peso minimo de solapamiento para que C5 emita una arista (spec.md S9b).
    #[serde(default = "default_min_edge_weight")]
    pub min_edge_weight: i64,
    /// Pasos hacia atras que camina C3 buscando el texto del factor de escala.
    #[serde(default = "default_factor_walk_steps")]
    pub factor_walk_steps: usize,
    /// Longitud maxima de texto considerada candidata a factor de escala.
    #[serde(default = "default_factor_max_text_len")]
    pub factor_max_text_len: usize,
}

fn default_min_edge_weight() -> i64 {
    pipeline_models::MIN_EDGE_WEIGHT
}

fn default_factor_walk_steps() -> usize {
    pipeline_table_extractor::DEFAULT_FACTOR_WALK_STEPS
}

fn default_factor_max_text_len() -> usize {
    pipeline_table_extractor::DEFAULT_FACTOR_MAX_TEXT_LEN
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(envy::from_env::<Config>()?)
    }
}
