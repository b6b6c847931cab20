use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::database::models::UserSurgeryDetails;

/// List entry for `GET /user-surgeries/user/:userId`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSurgeryView {
    pub id: Uuid,
    pub surgery_id: Uuid,
    pub surgery: String,
    pub after_effects: Option<String>,
    pub hospitalization: HospitalizationView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalizationView {
    pub id: Uuid,
    pub entrance_date: DateTime<Utc>,
    pub exit_date: Option<DateTime<Utc>>,
    pub location: String,
    pub reason: String,
    pub diseases: Vec<Uuid>,
}

impl From<UserSurgeryDetails> for UserSurgeryView {
    fn from(details: UserSurgeryDetails) -> Self {
        let UserSurgeryDetails {
            user_surgery,
            surgery,
            hospitalization,
        } = details;

        Self {
            id: user_surgery.id,
            surgery_id: surgery.id,
            surgery: surgery.name,
            after_effects: user_surgery.after_effects,
            hospitalization: HospitalizationView {
                id: hospitalization.id,
                entrance_date: hospitalization.entrance_date,
                exit_date: hospitalization.exit_date,
                location: hospitalization.location,
                reason: hospitalization.reason,
                diseases: hospitalization.diseases,
            },
        }
    }
}

pub fn user_surgery_list(details: Vec<UserSurgeryDetails>) -> Vec<UserSurgeryView> {
    details.into_iter().map(UserSurgeryView::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{Hospitalization, Surgery, UserSurgery};
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn flattens_surgery_and_drops_owner_fields() {
        let user_id = Uuid::new_v4();
        let surgery = Surgery {
            id: Uuid::new_v4(),
            name: "Apendicectomia".to_string(),
        };
        let hospitalization = Hospitalization {
            id: Uuid::new_v4(),
            user_id,
            entrance_date: Utc.with_ymd_and_hms(2021, 5, 7, 0, 0, 0).unwrap(),
            exit_date: None,
            location: "Santa Casa".to_string(),
            reason: "Apendicite".to_string(),
            diseases: Vec::new(),
        };
        let user_surgery = UserSurgery {
            id: Uuid::new_v4(),
            user_id,
            hospitalization_id: hospitalization.id,
            surgery_id: surgery.id,
            after_effects: Some("Cicatriz".to_string()),
        };

        let views = user_surgery_list(vec![UserSurgeryDetails {
            user_surgery: user_surgery.clone(),
            surgery: surgery.clone(),
            hospitalization: hospitalization.clone(),
        }]);
        let value = serde_json::to_value(&views).unwrap();

        assert_eq!(
            value,
            json!([{
                "id": user_surgery.id,
                "surgeryId": surgery.id,
                "surgery": "Apendicectomia",
                "afterEffects": "Cicatriz",
                "hospitalization": {
                    "id": hospitalization.id,
                    "entranceDate": "2021-05-07T00:00:00Z",
                    "exitDate": null,
                    "location": "Santa Casa",
                    "reason": "Apendicite",
                    "diseases": [],
                }
            }])
        );
    }
}
