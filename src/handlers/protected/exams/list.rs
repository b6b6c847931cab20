use axum::extract::{Extension, Path, State};

use crate::database::models::Exam;
use crate::error::OrRespond;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::validation::{self, ValidationErrors};

const LIST_FAILED: &str = "Erro ao tentar listar os exames";

/// GET /exams/user/:id - every exam owned by the user in the path
///
/// The path user is not compared with the caller; any authenticated caller
/// can list any user's exams.
pub async fn list(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Exam>> {
    let mut errors = ValidationErrors::new();
    let Some(user_id) = validation::uuid(&mut errors, "id", Some(&id), "Informe o id do usuario") else {
        return Err(errors.into());
    };

    if !caller.owns(user_id) {
        tracing::warn!("User {} listed exams of user {}", caller.user_id, user_id);
    }

    let exams = state.store.find_exams_by_user(user_id).await.or_respond(LIST_FAILED)?;
    Ok(ApiResponse::success(exams))
}
