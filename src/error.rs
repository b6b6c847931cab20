// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use thiserror::Error;

use crate::database::StoreError;
use crate::services::uploads::UploadError;
use crate::validation::ValidationErrors;

pub const VALIDATION_MESSAGE: &str = "Validation fails";

/// HTTP API error; every variant renders as `{ "message": ... }`,
/// validation failures add an `errors` map of field → messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    Validation(ValidationErrors),
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-safe message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(_) => VALIDATION_MESSAGE,
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::InternalServerError(msg) => msg,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            ApiError::Validation(errors) => json!({
                "message": VALIDATION_MESSAGE,
                "errors": errors,
            }),
            _ => json!({ "message": self.message() }),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

/// Anything a handler may fail with besides an explicit [`ApiError`]
#[derive(Debug, Error)]
pub enum Failure {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Upload(#[from] UploadError),
}

/// Translates a failure into a response: validation errors keep their field
/// messages (400); anything else is logged and answered with `default_message` (500).
pub fn handle_errors(err: impl Into<Failure>, default_message: &str) -> ApiError {
    match err.into() {
        Failure::Validation(errors) => ApiError::Validation(errors),
        other => {
            tracing::error!("{}: {}", default_message, other);
            ApiError::internal_server_error(default_message)
        }
    }
}

/// `result.or_respond(DEFAULT_MESSAGE)?` in handlers
pub trait OrRespond<T> {
    fn or_respond(self, default_message: &str) -> Result<T, ApiError>;
}

impl<T, E: Into<Failure>> OrRespond<T> for Result<T, E> {
    fn or_respond(self, default_message: &str) -> Result<T, ApiError> {
        self.map_err(|e| handle_errors(e, default_message))
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_400_with_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("userId", "Id informado inválido");
        errors.add("name", "Informe um nome para o exame");

        let api = handle_errors(errors, "Erro ao tentar salvar o exame");
        assert_eq!(api.status_code(), StatusCode::BAD_REQUEST);

        let body = api.to_json();
        assert_eq!(body["message"], VALIDATION_MESSAGE);
        assert_eq!(body["errors"]["userId"][0], "Id informado inválido");
        assert_eq!(body["errors"]["name"][0], "Informe um nome para o exame");
    }

    #[test]
    fn other_failures_hide_detail_behind_default_message() {
        let err = StoreError::MissingReference("surgery 42".to_string());
        let api = handle_errors(err, "Erro ao atualizar a cirurgia");

        assert_eq!(api.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.to_json(), json!({ "message": "Erro ao atualizar a cirurgia" }));
    }

    #[test]
    fn explicit_errors_render_their_own_message() {
        let api = ApiError::unauthorized("Token inválido");
        assert_eq!(api.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(api.to_json(), json!({ "message": "Token inválido" }));

        let api = ApiError::bad_request("Failed to parse the request body as JSON");
        assert_eq!(api.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn or_respond_passes_values_through() {
        let ok: Result<u8, StoreError> = Ok(7);
        assert_eq!(ok.or_respond("unused").unwrap(), 7);
    }
}
