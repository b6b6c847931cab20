use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Hospitalization {
    pub id: Uuid,
    pub user_id: Uuid,
    pub entrance_date: DateTime<Utc>,
    pub exit_date: Option<DateTime<Utc>>,
    pub location: String,
    pub reason: String,
    /// Linked disease ids, loaded from `hospitalization_diseases`
    #[sqlx(skip)]
    pub diseases: Vec<Uuid>,
}

#[derive(Debug, Clone)]
pub struct NewHospitalization {
    pub user_id: Uuid,
    pub entrance_date: DateTime<Utc>,
    pub exit_date: Option<DateTime<Utc>>,
    pub location: String,
    pub reason: String,
    pub diseases: Vec<Uuid>,
}

impl NewHospitalization {
    pub fn into_hospitalization(self, id: Uuid) -> Hospitalization {
        Hospitalization {
            id,
            user_id: self.user_id,
            entrance_date: self.entrance_date,
            exit_date: self.exit_date,
            location: self.location,
            reason: self.reason,
            diseases: self.diseases,
        }
    }
}
