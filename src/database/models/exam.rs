use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An uploaded exam; `path` is the stored file name inside the uploads directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: Uuid,
    pub name: String,
    pub user_id: Uuid,
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct NewExam {
    pub name: String,
    pub user_id: Uuid,
    pub path: String,
}

impl NewExam {
    pub fn into_exam(self, id: Uuid) -> Exam {
        Exam {
            id,
            name: self.name,
            user_id: self.user_id,
            path: self.path,
        }
    }
}
