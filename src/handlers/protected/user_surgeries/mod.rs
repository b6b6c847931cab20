pub mod delete;
pub mod get;
pub mod list;
pub mod save;
pub mod schema;
pub mod update;

pub use delete::delete as user_surgery_delete;
pub use get::get as user_surgery_get;
pub use list::list as user_surgery_list;
pub use save::save as user_surgery_save;
pub use update::update as user_surgery_update;

use axum::extract::rejection::JsonRejection;

use crate::error::ApiError;

/// Unparseable JSON bodies answer 400 with the extractor's own message
pub(crate) fn malformed_body(rejection: JsonRejection) -> ApiError {
    tracing::debug!("Rejected request body: {}", rejection);
    ApiError::bad_request(rejection.body_text())
}
