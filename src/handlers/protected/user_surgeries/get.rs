use axum::extract::{Extension, Path, State};

use crate::database::models::UserSurgery;
use crate::error::{ApiError, OrRespond};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::validation::{self, ValidationErrors};

const GET_FAILED: &str = "Erro ao tentar listar as informações";

/// GET /user-surgeries/:id - a single join row
///
/// Missing and foreign records answer the same 401 so ids cannot be probed.
pub async fn get(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<UserSurgery> {
    let mut errors = ValidationErrors::new();
    let Some(id) = validation::uuid(&mut errors, "id", Some(&id), "Informe o id") else {
        return Err(errors.into());
    };

    match state.store.find_user_surgery(id).await.or_respond(GET_FAILED)? {
        Some(record) if caller.owns(record.user_id) => Ok(ApiResponse::success(record)),
        _ => Err(ApiError::unauthorized("Você não possui acesso a essas informações")),
    }
}
