// [apps/edgar-pipeline/src/main.rs]
/*!
 * =================================================================
 * APARATO: PUNTO DE ENTRADA DEL PIPELINE EDGAR (ESTRATO L6)
 * RESPONSABILIDAD: ARRANQUE DEL RUNTIME, CARGA DE CONFIGURACION, DESPACHO CLI
 * =================================================================
 */

use clap::Parser;
use edgar_pipeline::cli::{Cli, Command};
use edgar_pipeline::config::Config;
use edgar_pipeline::orchestrator::{self, PoolSizes};
use edgar_pipeline::state::AppState;
use edgar_pipeline::web;
use pipeline_db::{CompanyRepository, LabelRepository, TableRepository};
use pipeline_matrix_compressor::compress;
use pipeline_models::CompressedTable;
use serde::Deserialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

const COMPRESS_PAGE_SIZE: i64 = 100;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pipeline_heimdall::init_tracing("edgar_pipeline");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_stack_size(8 * 1024 * 1024)
        .build()?;

    runtime.block_on(dispatch())
}

#[instrument]
async fn dispatch() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let state = AppState::bootstrap(&config).await?;

    match cli.command {
        Command::Init => run_init(&state).await,
        Command::Load { n_extract, n_slice, n_archive, n_graph } => {
            orchestrator::run_load(state, PoolSizes { n_extract, n_slice, n_archive, n_graph }).await
        }
        Command::Compress => run_compress(&state).await,
        Command::Create { username } => run_create(&state, &username).await,
        Command::Webserver => run_webserver(state).await,
    }
}

#[derive(Debug, Deserialize)]
struct CiksFile {
    ciks: Vec<String>,
}

/// Crea el esquema (ya aplicado dentro de `PgClient::connect`), lee
/// `ciks.json` del almacen caliente y siembra cada compania.
#[instrument(skip(state))]
async fn run_init(state: &AppState) -> anyhow::Result<()> {
    let raw = state.hot_blob.get("ciks.json").await?;
    let ciks_file: CiksFile = serde_json::from_slice(&raw)?;
    info!("🌱 [INIT]: seeding {} companies", ciks_file.ciks.len());

    let company_repo = CompanyRepository::new(&state.db);
    for cik in ciks_file.ciks {
        let company = match state.edgar.get_company(&cik).await {
            Ok(company) => company,
            Err(err) => {
                warn!("⚠️ [INIT]: could not fetch company {}: {}", cik, err);
                continue;
            }
        };
        if let Err(err) = company_repo.insert_company(&company).await {
            warn!("⚠️ [INIT]: could not insert company {}: {}", cik, err);
        }
    }

    Ok(())
}

/// Re-ejecuta C4 sobre todo raw table sin hijo comprimido, 100 filas por pagina.
#[instrument(skip(state))]
async fn run_compress(state: &AppState) -> anyhow::Result<()> {
    let table_repo = TableRepository::new(&state.db);
    let mut offset = 0i64;
    let mut total = 0usize;

    loop {
        let page = table_repo.raw_missing_compressed(COMPRESS_PAGE_SIZE, offset).await?;
        if page.is_empty() {
            break;
        }

        for table in &page {
            match compress(&table.raw_matrix, table.header_index, &table.factor) {
                Ok(output) => {
                    let compressed = CompressedTable {
                        id: Uuid::now_v7(),
                        original_id: table.id,
                        factor: output.factor,
                        header_index: output.header_index,
                        matrix: output.matrix,
                    };
                    if let Err(err) = table_repo.upsert_compressed(&compressed).await {
                        warn!("⚠️ [COMPRESS]: could not upsert table {}: {}", table.id, err);
                    }
                }
                Err(_ragged) => {
                    info!("ℹ️ [COMPRESS]: table {} is ragged, leaving uncompressed", table.id);
                }
            }
        }

        total += page.len();
        offset += COMPRESS_PAGE_SIZE;
    }

    info!("✅ [COMPRESS]: re-derived {} compressed tables", total);
    Ok(())
}

/// Inserta un usuario de etiquetado con un UUID ordenable por tiempo.
#[instrument(skip(state))]
async fn run_create(state: &AppState, username: &str) -> anyhow::Result<()> {
    let label_repo = LabelRepository::new(&state.db);
    let user = label_repo.create_user(username).await?;
    info!("👤 [CREATE]: labelling user {} created with id {}", user.username, user.id);
    Ok(())
}

/// Levanta la superficie de etiquetado en `:8000`.
#[instrument(skip(state))]
async fn run_webserver(state: AppState) -> anyhow::Result<()> {
    let web_state = web::WebState::new(state);
    let app = web::routes::router(web_state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
    info!("🌐 [WEBSERVER]: labelling surface listening on :8000");
    axum::serve(listener, app).await?;
    Ok(())
}
