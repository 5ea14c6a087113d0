// [apps/edgar-pipeline/src/web/routes.rs]
/*!
 * APARATO: RUTAS DE LA SUPERFICIE DE ETIQUETADO (ESTRATO L6)
 * RESPONSABILIDAD: `GET /tables/random`, `POST /tables/:id/classify`
 */

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use pipeline_db::{DbError, LabelRepository};
use pipeline_models::LabelUser;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;
use uuid::Uuid;

use super::state::WebState;

pub fn router(state: WebState) -> Router {
    Router::new()
        .route("/tables/random", get(random_table))
        .route("/tables/:id/classify", post(classify_table))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct RandomTableResponse {
    compressed_table_id: Uuid,
}

#[derive(Debug, Deserialize)]
struct ClassifyRequest {
    label: String,
}

#[derive(Debug, Serialize)]
struct ClassifyResponse {
    classification_id: Uuid,
}

async fn random_table(State(state): State<WebState>, headers: HeaderMap) -> Response {
    let user = match authenticate(&state, &headers).await {
        Ok(user) => user,
        Err(response) => return response,
    };

    match state.next_table_for(user.id).await {
        Ok(Some(compressed_table_id)) => Json(RandomTableResponse { compressed_table_id }).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "NoTablesLeft").into_response(),
        Err(err) => {
            warn!("⚠️ [WEB]: random table lookup failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn classify_table(
    State(state): State<WebState>,
    headers: HeaderMap,
    Path(table_id): Path<Uuid>,
    Json(body): Json<ClassifyRequest>,
) -> Response {
    let user = match authenticate(&state, &headers).await {
        Ok(user) => user,
        Err(response) => return response,
    };

    let label_repo = LabelRepository::new(&state.app.db);
    match label_repo.classify(table_id, user.id, &body.label).await {
        Ok(classification) => Json(ClassifyResponse { classification_id: classification.id }).into_response(),
        Err(DbError::InvalidRef(_)) => (StatusCode::NOT_FOUND, "unknown table or user").into_response(),
        Err(err) => {
            warn!("⚠️ [WEB]: classify failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn authenticate(state: &WebState, headers: &HeaderMap) -> Result<LabelUser, Response> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| StatusCode::UNAUTHORIZED.into_response())?;

    let label_repo = LabelRepository::new(&state.app.db);
    label_repo.user_by_username(token).await.map_err(|_| StatusCode::UNAUTHORIZED.into_response())
}
