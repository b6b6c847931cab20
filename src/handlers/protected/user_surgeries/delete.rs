use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    Json,
};

use super::malformed_body;
use super::schema::validate_ids;
use crate::error::OrRespond;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::user_surgery_service::{self, DeleteOutcome};
use crate::state::AppState;

const DELETE_FAILED: &str = "Erro ao excluir as internações do usuário";

/// DELETE /user-surgeries - body is a JSON array of ids; one outcome per id
pub async fn delete(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    body: Result<Json<Vec<String>>, JsonRejection>,
) -> ApiResult<Vec<DeleteOutcome>> {
    let Json(ids) = body.map_err(malformed_body)?;
    let ids = validate_ids(&ids)?;

    let outcomes = user_surgery_service::delete_many(state.store.as_ref(), &ids, caller.user_id)
        .await
        .or_respond(DELETE_FAILED)?;

    let deleted = outcomes.iter().filter(|o| o.deleted).count();
    tracing::info!("User {} deleted {} of {} user surgeries", caller.user_id, deleted, outcomes.len());

    Ok(ApiResponse::success(outcomes))
}
