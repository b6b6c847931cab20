use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::models::{
    Disease, Exam, Hospitalization, NewExam, NewHospitalization, NewUserSurgery, Surgery,
    UserSurgery, UserSurgeryDetails, UserSurgeryWithName,
};

/// Errors from a [`RecordStore`]
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Referenced record does not exist: {0}")]
    MissingReference(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence boundary for every entity the handlers touch.
///
/// Each call is atomic on its own; callers that chain several calls
/// (hospitalization, then surgery, then join row) get no transaction.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Cheap connectivity probe for `/health`
    async fn ping(&self) -> Result<(), StoreError>;

    async fn find_exams_by_user(&self, user_id: Uuid) -> Result<Vec<Exam>, StoreError>;
    async fn find_exam(&self, id: Uuid) -> Result<Option<Exam>, StoreError>;
    async fn create_exam(&self, exam: NewExam) -> Result<Exam, StoreError>;

    async fn list_surgeries(&self) -> Result<Vec<Surgery>, StoreError>;
    /// Returns the surgery named `name`, inserting it first when absent.
    /// Lookup and insert are one atomic step, so concurrent callers share a row.
    async fn find_or_create_surgery(&self, name: &str) -> Result<Surgery, StoreError>;

    async fn create_hospitalization(
        &self,
        hospitalization: NewHospitalization,
    ) -> Result<Hospitalization, StoreError>;

    async fn find_user_surgeries(&self, user_id: Uuid) -> Result<Vec<UserSurgeryDetails>, StoreError>;
    async fn find_user_surgery(&self, id: Uuid) -> Result<Option<UserSurgery>, StoreError>;
    async fn find_user_surgery_with_name(
        &self,
        id: Uuid,
    ) -> Result<Option<UserSurgeryWithName>, StoreError>;
    async fn create_user_surgery(&self, record: NewUserSurgery) -> Result<UserSurgery, StoreError>;
    /// Insert or overwrite the row with `record.id`
    async fn save_user_surgery(&self, record: UserSurgery) -> Result<UserSurgery, StoreError>;
    /// Returns whether a row was removed
    async fn delete_user_surgery(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn list_diseases(&self) -> Result<Vec<Disease>, StoreError>;
}
