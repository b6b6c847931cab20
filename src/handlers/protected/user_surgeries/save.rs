use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use super::malformed_body;
use super::schema::SaveUserSurgeryRequest;
use crate::database::models::UserSurgery;
use crate::error::OrRespond;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::user_surgery_service;
use crate::state::AppState;

const SAVE_FAILED: &str = "Erro ao salvar a cirurgia";

/// POST /user-surgeries - records a surgery together with a new hospitalization
pub async fn save(
    State(state): State<AppState>,
    body: Result<Json<SaveUserSurgeryRequest>, JsonRejection>,
) -> ApiResult<UserSurgery> {
    let Json(request) = body.map_err(malformed_body)?;
    let input = request.validate()?;

    let record = user_surgery_service::save(state.store.as_ref(), input)
        .await
        .or_respond(SAVE_FAILED)?;

    Ok(ApiResponse::created(record))
}
