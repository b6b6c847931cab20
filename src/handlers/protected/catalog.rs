use axum::extract::State;

use crate::database::models::{Disease, Surgery};
use crate::error::OrRespond;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /surgeries - the shared surgery catalog
pub async fn surgery_list(State(state): State<AppState>) -> ApiResult<Vec<Surgery>> {
    let surgeries = state
        .store
        .list_surgeries()
        .await
        .or_respond("Erro ao listar as cirurgias")?;
    Ok(ApiResponse::success(surgeries))
}

/// GET /diseases
pub async fn disease_list(State(state): State<AppState>) -> ApiResult<Vec<Disease>> {
    let diseases = state
        .store
        .list_diseases()
        .await
        .or_respond("Erro ao listar as doenças")?;
    Ok(ApiResponse::success(diseases))
}
