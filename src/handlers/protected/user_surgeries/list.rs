use axum::extract::{Extension, Path, State};

use crate::api::format::{self, UserSurgeryView};
use crate::error::{ApiError, OrRespond};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::validation::{self, ValidationErrors};

const LIST_FAILED: &str = "Erro ao listar as cirurgias do usuário";

/// GET /user-surgeries/user/:id - the caller's surgeries with hospitalization details
pub async fn list(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Vec<UserSurgeryView>> {
    let mut errors = ValidationErrors::new();
    let Some(user_id) = validation::uuid(&mut errors, "id", Some(&id), "Informe o id do usuario") else {
        return Err(errors.into());
    };

    if !caller.owns(user_id) {
        return Err(ApiError::unauthorized("você não possui acesso a essas informações"));
    }

    let details = state.store.find_user_surgeries(user_id).await.or_respond(LIST_FAILED)?;
    Ok(ApiResponse::success(format::user_surgery_list(details)))
}
