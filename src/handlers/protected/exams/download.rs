use axum::{
    body::Body,
    extract::{Extension, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tokio_util::io::ReaderStream;

use crate::error::{ApiError, OrRespond};
use crate::middleware::{message, AuthUser};
use crate::state::AppState;
use crate::validation::{self, ValidationErrors};

const DOWNLOAD_FAILED: &str = "Erro ao tentar baixar o exame";
pub const EXAM_NOT_FOUND: &str = "Exame não encontrado";
pub const FILE_ACCESS_DENIED: &str = "você não tem acesso a este arquivo";

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub id: Option<String>,
}

/// GET /exams/download?id=<uuid> - stream the stored file to its owner.
/// A missing exam answers 200 with a message body, not 404.
pub async fn download(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, ApiError> {
    let mut errors = ValidationErrors::new();
    let Some(id) = validation::uuid(&mut errors, "id", query.id.as_deref(), "Informe o id do exame") else {
        return Err(errors.into());
    };

    let Some(exam) = state.store.find_exam(id).await.or_respond(DOWNLOAD_FAILED)? else {
        return Ok(message(StatusCode::OK, EXAM_NOT_FOUND).into_response());
    };

    if !caller.owns(exam.user_id) {
        tracing::warn!("User {} denied download of exam {}", caller.user_id, exam.id);
        return Ok(message(StatusCode::UNAUTHORIZED, FILE_ACCESS_DENIED).into_response());
    }

    let file = state.uploads.open(&exam.path).await.or_respond(DOWNLOAD_FAILED)?;
    let body = Body::from_stream(ReaderStream::new(file));

    let headers = [
        (header::CONTENT_TYPE, "application/octet-stream".to_string()),
        (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", exam.path)),
    ];
    Ok((headers, body).into_response())
}
