use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    Json,
};

use super::malformed_body;
use super::schema::UpdateUserSurgeryRequest;
use crate::database::models::UserSurgery;
use crate::error::{ApiError, OrRespond};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::user_surgery_service;
use crate::state::AppState;

const UPDATE_FAILED: &str = "Erro ao atualizar a cirurgia";
const UPDATE_DENIED: &str = "Você não possui acesso a essas informações";

/// PUT /user-surgeries - rewrites a join row against a fresh hospitalization
pub async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    body: Result<Json<UpdateUserSurgeryRequest>, JsonRejection>,
) -> ApiResult<UserSurgery> {
    let Json(request) = body.map_err(malformed_body)?;
    let input = request.validate()?;

    if !caller.owns(input.user_id) {
        return Err(ApiError::unauthorized(UPDATE_DENIED));
    }

    let existing = state
        .store
        .find_user_surgery(input.id)
        .await
        .or_respond(UPDATE_FAILED)?;
    if let Some(existing) = existing {
        if !caller.owns(existing.user_id) {
            tracing::warn!("User {} tried to update user surgery {}", caller.user_id, existing.id);
            return Err(ApiError::unauthorized(UPDATE_DENIED));
        }
    }

    let record = user_surgery_service::update(state.store.as_ref(), input)
        .await
        .or_respond(UPDATE_FAILED)?;

    Ok(ApiResponse::success(record))
}
