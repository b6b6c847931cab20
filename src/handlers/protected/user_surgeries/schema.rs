//! Request bodies for the user-surgery endpoints and their validation.

use serde::Deserialize;
use uuid::Uuid;

use crate::services::user_surgery_service::{HospitalizationData, SaveUserSurgery, UpdateUserSurgery};
use crate::validation::{self, DateFormat, ValidationErrors};

const ID_REQUIRED: &str = "Informe o id";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalizationInput {
    pub entrance_date: Option<String>,
    pub exit_date: Option<String>,
    pub location: Option<String>,
    pub reason: Option<String>,
    pub diseases: Option<Vec<String>>,
}

impl HospitalizationInput {
    /// Field paths are prefixed with `hospitalization.`
    fn validate(&self, errors: &mut ValidationErrors, format: DateFormat) -> Option<HospitalizationData> {
        let entrance_date = validation::date(
            errors,
            "hospitalization.entranceDate",
            self.entrance_date.as_deref(),
            format,
            "Informe a data de entrada",
        );
        let exit_date =
            validation::optional_date(errors, "hospitalization.exitDate", self.exit_date.as_deref(), format);
        let location = validation::required(
            errors,
            "hospitalization.location",
            self.location.as_deref(),
            "Informe aonde aconteceu a internação",
        );
        let reason = validation::required(
            errors,
            "hospitalization.reason",
            self.reason.as_deref(),
            "Informe o motivo da internação",
        );
        Some(HospitalizationData {
            entrance_date: entrance_date?,
            exit_date: exit_date?,
            location: location?.to_string(),
            reason: reason?.to_string(),
        })
    }
}

/// POST /user-surgeries body
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveUserSurgeryRequest {
    pub user_id: Option<String>,
    #[serde(default)]
    pub hospitalization: Option<HospitalizationInput>,
    pub surgery: Option<String>,
    pub after_effects: Option<String>,
}

impl SaveUserSurgeryRequest {
    pub fn validate(self) -> Result<SaveUserSurgery, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let user_id = validation::uuid(&mut errors, "userId", self.user_id.as_deref(), ID_REQUIRED);
        let hospitalization = self
            .hospitalization
            .unwrap_or_default()
            .validate(&mut errors, DateFormat::Lenient);
        let surgery = validation::required(
            &mut errors,
            "surgery",
            self.surgery.as_deref(),
            "Informe a cirurgia realizada",
        )
        .map(str::to_string);

        match (user_id, hospitalization, surgery) {
            (Some(user_id), Some(hospitalization), Some(surgery)) if errors.is_empty() => Ok(SaveUserSurgery {
                user_id,
                hospitalization,
                surgery,
                after_effects: self.after_effects,
            }),
            _ => Err(errors),
        }
    }
}

/// PUT /user-surgeries body; dates must be strict RFC 3339
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserSurgeryRequest {
    pub id: Option<String>,
    pub user_id: Option<String>,
    #[serde(default)]
    pub hospitalization: Option<HospitalizationInput>,
    pub surgery_id: Option<String>,
    pub after_effects: Option<String>,
}

impl UpdateUserSurgeryRequest {
    pub fn validate(self) -> Result<UpdateUserSurgery, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let id = validation::uuid(&mut errors, "id", self.id.as_deref(), ID_REQUIRED);
        let user_id = validation::uuid(&mut errors, "userId", self.user_id.as_deref(), ID_REQUIRED);
        let surgery_id = validation::uuid(&mut errors, "surgeryId", self.surgery_id.as_deref(), ID_REQUIRED);
        let hospitalization = self.hospitalization.unwrap_or_default();
        // Disease ids are checked on update only and never carried forward
        validation::uuid_list(
            &mut errors,
            "hospitalization.diseases",
            hospitalization.diseases.as_deref(),
        );
        let hospitalization = hospitalization.validate(&mut errors, DateFormat::Strict);

        match (id, user_id, surgery_id, hospitalization) {
            (Some(id), Some(user_id), Some(surgery_id), Some(hospitalization)) if errors.is_empty() => {
                Ok(UpdateUserSurgery {
                    id,
                    user_id,
                    hospitalization,
                    surgery_id,
                    after_effects: self.after_effects,
                })
            }
            _ => Err(errors),
        }
    }
}

/// DELETE /user-surgeries body: a non-empty array of ids
pub fn validate_ids(ids: &[String]) -> Result<Vec<Uuid>, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if ids.is_empty() {
        errors.add("ids", "Informe uma lista com os ID's das cirurgias");
    }
    let parsed: Vec<Uuid> = ids
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            validation::uuid(&mut errors, &format!("ids[{index}]"), Some(raw.as_str()), ID_REQUIRED)
        })
        .collect();

    errors.into_result().map(|()| parsed)
}
