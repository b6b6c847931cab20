use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{Hospitalization, Surgery};

/// Join row linking a user, a surgery and the hospitalization episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSurgery {
    pub id: Uuid,
    pub user_id: Uuid,
    pub hospitalization_id: Uuid,
    pub surgery_id: Uuid,
    pub after_effects: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewUserSurgery {
    pub user_id: Uuid,
    pub hospitalization_id: Uuid,
    pub surgery_id: Uuid,
    pub after_effects: Option<String>,
}

impl NewUserSurgery {
    pub fn into_user_surgery(self, id: Uuid) -> UserSurgery {
        UserSurgery {
            id,
            user_id: self.user_id,
            hospitalization_id: self.hospitalization_id,
            surgery_id: self.surgery_id,
            after_effects: self.after_effects,
        }
    }
}

/// Join row with its surgery name, used by batch delete
#[derive(Debug, Clone)]
pub struct UserSurgeryWithName {
    pub user_surgery: UserSurgery,
    pub surgery_name: String,
}

/// Join row with both relations loaded, used by the list view
#[derive(Debug, Clone)]
pub struct UserSurgeryDetails {
    pub user_surgery: UserSurgery,
    pub surgery: Surgery,
    pub hospitalization: Hospitalization,
}
