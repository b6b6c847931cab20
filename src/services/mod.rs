pub mod uploads;
pub mod user_surgery_service;

pub use uploads::{UploadDir, UploadError};
