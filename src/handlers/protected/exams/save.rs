use axum::extract::{multipart::MultipartRejection, Multipart, State};

use crate::database::models::{Exam, NewExam};
use crate::error::{ApiError, OrRespond};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::{self, ValidationErrors};

const SAVE_FAILED: &str = "Erro ao tentar salvar o exame";

#[derive(Debug)]
struct UploadedFile {
    original_name: String,
    contents: Vec<u8>,
}

/// Multipart fields of an exam upload, all optional until validated
#[derive(Debug, Default)]
struct ExamForm {
    name: Option<String>,
    user_id: Option<String>,
    file: Option<UploadedFile>,
}

impl ExamForm {
    async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?
        {
            let field_name = field.name().map(str::to_string);
            match field_name.as_deref() {
                Some("name") => {
                    form.name = Some(field.text().await.map_err(|e| ApiError::bad_request(e.body_text()))?);
                }
                Some("userId") => {
                    form.user_id = Some(field.text().await.map_err(|e| ApiError::bad_request(e.body_text()))?);
                }
                Some("file") => {
                    let original_name = field.file_name().unwrap_or_default().to_string();
                    let contents = field.bytes().await.map_err(|e| ApiError::bad_request(e.body_text()))?;
                    form.file = Some(UploadedFile {
                        original_name,
                        contents: contents.to_vec(),
                    });
                }
                _ => {}
            }
        }
        Ok(form)
    }
}

/// POST /exams - multipart upload with `name`, `userId` and a `file` part.
/// The file is written only after every field validates.
pub async fn save(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Exam> {
    let multipart = multipart.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let form = ExamForm::read(multipart).await?;

    let mut errors = ValidationErrors::new();
    let name = validation::required(&mut errors, "name", form.name.as_deref(), "Informe um nome para o exame");
    let user_id = validation::uuid(
        &mut errors,
        "userId",
        form.user_id.as_deref(),
        "Informe o ID do usuario para salvar o exame",
    );
    if form.file.is_none() {
        errors.add("path", "Informe o arquivo que deseja salvar");
    }

    let (Some(name), Some(user_id), Some(file)) = (name, user_id, form.file.as_ref()) else {
        return Err(errors.into());
    };

    let path = state
        .uploads
        .save(&file.original_name, &file.contents)
        .await
        .or_respond(SAVE_FAILED)?;

    let exam = state
        .store
        .create_exam(NewExam {
            name: name.to_string(),
            user_id,
            path,
        })
        .await
        .or_respond(SAVE_FAILED)?;

    tracing::info!("Saved exam {} for user {}", exam.id, exam.user_id);
    Ok(ApiResponse::created(exam))
}
