use std::sync::Arc;

use crate::database::RecordStore;
use crate::services::UploadDir;

/// Shared handler state: the record store and the uploads directory
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub uploads: UploadDir,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, uploads: UploadDir) -> Self {
        Self { store, uploads }
    }
}
