//! Multi-table writes behind the user-surgery endpoints.
//!
//! Callers validate input and check ownership first; these functions only
//! sequence store calls. Nothing here is transactional: a failure after the
//! hospitalization insert leaves that row orphaned.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::info;
use uuid::Uuid;

use crate::database::models::{normalize_surgery_name, NewHospitalization, NewUserSurgery, UserSurgery};
use crate::database::{RecordStore, StoreError};

pub const DELETE_DENIED: &str = "Você não pode excluir esse item";
pub const DELETE_DONE: &str = "Cirurgia excluída com sucesso";

#[derive(Debug, Clone)]
pub struct HospitalizationData {
    pub entrance_date: DateTime<Utc>,
    pub exit_date: Option<DateTime<Utc>>,
    pub location: String,
    pub reason: String,
}

impl HospitalizationData {
    /// Disease links are always reset: the association is never populated from input.
    fn into_new(self, user_id: Uuid) -> NewHospitalization {
        NewHospitalization {
            user_id,
            entrance_date: self.entrance_date,
            exit_date: self.exit_date,
            location: self.location,
            reason: self.reason,
            diseases: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SaveUserSurgery {
    pub user_id: Uuid,
    pub hospitalization: HospitalizationData,
    pub surgery: String,
    pub after_effects: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateUserSurgery {
    pub id: Uuid,
    pub user_id: Uuid,
    pub hospitalization: HospitalizationData,
    pub surgery_id: Uuid,
    pub after_effects: Option<String>,
}

/// One entry of a batch delete, serialized as `{ "<surgery name>": "<message>" }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub key: String,
    pub message: &'static str,
    pub deleted: bool,
}

impl Serialize for DeleteOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, self.message)?;
        map.end()
    }
}

/// New hospitalization, surgery looked up (or created) by normalized name, then the join row.
pub async fn save(store: &dyn RecordStore, input: SaveUserSurgery) -> Result<UserSurgery, StoreError> {
    let hospitalization = store
        .create_hospitalization(input.hospitalization.into_new(input.user_id))
        .await?;

    let surgery = store
        .find_or_create_surgery(&normalize_surgery_name(&input.surgery))
        .await?;

    let record = store
        .create_user_surgery(NewUserSurgery {
            user_id: input.user_id,
            hospitalization_id: hospitalization.id,
            surgery_id: surgery.id,
            after_effects: input.after_effects,
        })
        .await?;

    info!("Saved user surgery {} for user {}", record.id, record.user_id);
    Ok(record)
}

/// Inserts a fresh hospitalization and rewires the join row to it; the previous
/// hospitalization row is left untouched.
pub async fn update(store: &dyn RecordStore, input: UpdateUserSurgery) -> Result<UserSurgery, StoreError> {
    let hospitalization = store
        .create_hospitalization(input.hospitalization.into_new(input.user_id))
        .await?;

    let record = store
        .save_user_surgery(UserSurgery {
            id: input.id,
            user_id: input.user_id,
            hospitalization_id: hospitalization.id,
            surgery_id: input.surgery_id,
            after_effects: input.after_effects,
        })
        .await?;

    info!("Updated user surgery {} (hospitalization {})", record.id, hospitalization.id);
    Ok(record)
}

/// Deletes every id the caller owns, concurrently. One outcome per id, in input order.
/// Unknown ids are reported as denied under the id itself.
pub async fn delete_many(
    store: &dyn RecordStore,
    ids: &[Uuid],
    caller_id: Uuid,
) -> Result<Vec<DeleteOutcome>, StoreError> {
    let results = join_all(ids.iter().map(|&id| delete_one(store, id, caller_id))).await;
    results.into_iter().collect()
}

async fn delete_one(store: &dyn RecordStore, id: Uuid, caller_id: Uuid) -> Result<DeleteOutcome, StoreError> {
    let Some(found) = store.find_user_surgery_with_name(id).await? else {
        return Ok(DeleteOutcome {
            key: id.to_string(),
            message: DELETE_DENIED,
            deleted: false,
        });
    };

    if found.user_surgery.user_id != caller_id {
        tracing::warn!("User {} tried to delete user surgery {} owned by someone else", caller_id, id);
        return Ok(DeleteOutcome {
            key: found.surgery_name,
            message: DELETE_DENIED,
            deleted: false,
        });
    }

    store.delete_user_surgery(id).await?;
    info!("Deleted user surgery {}", id);
    Ok(DeleteOutcome {
        key: found.surgery_name,
        message: DELETE_DONE,
        deleted: true,
    })
}
