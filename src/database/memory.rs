use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{
    Disease, Exam, Hospitalization, NewExam, NewHospitalization, NewUserSurgery, Surgery,
    UserSurgery, UserSurgeryDetails, UserSurgeryWithName,
};
use super::store::{RecordStore, StoreError};

#[derive(Debug, Default)]
struct Tables {
    exams: Vec<Exam>,
    surgeries: Vec<Surgery>,
    hospitalizations: Vec<Hospitalization>,
    user_surgeries: Vec<UserSurgery>,
    diseases: Vec<Disease>,
}

impl Tables {
    fn check_references(&self, record: &UserSurgery) -> Result<(), StoreError> {
        if !self.surgeries.iter().any(|s| s.id == record.surgery_id) {
            return Err(StoreError::MissingReference(format!("surgery {}", record.surgery_id)));
        }
        if !self.hospitalizations.iter().any(|h| h.id == record.hospitalization_id) {
            return Err(StoreError::MissingReference(format!(
                "hospitalization {}",
                record.hospitalization_id
            )));
        }
        Ok(())
    }
}

/// In-process store for local development and tests. Rows keep insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the disease catalog
    pub fn with_diseases(diseases: Vec<Disease>) -> Self {
        Self {
            tables: RwLock::new(Tables {
                diseases,
                ..Tables::default()
            }),
        }
    }

    pub async fn hospitalization_count(&self) -> usize {
        self.tables.read().await.hospitalizations.len()
    }

    pub async fn find_hospitalization(&self, id: Uuid) -> Option<Hospitalization> {
        let tables = self.tables.read().await;
        tables.hospitalizations.iter().find(|h| h.id == id).cloned()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn find_exams_by_user(&self, user_id: Uuid) -> Result<Vec<Exam>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.exams.iter().filter(|e| e.user_id == user_id).cloned().collect())
    }

    async fn find_exam(&self, id: Uuid) -> Result<Option<Exam>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.exams.iter().find(|e| e.id == id).cloned())
    }

    async fn create_exam(&self, exam: NewExam) -> Result<Exam, StoreError> {
        let exam = exam.into_exam(Uuid::new_v4());
        self.tables.write().await.exams.push(exam.clone());
        Ok(exam)
    }

    async fn list_surgeries(&self) -> Result<Vec<Surgery>, StoreError> {
        Ok(self.tables.read().await.surgeries.clone())
    }

    async fn find_or_create_surgery(&self, name: &str) -> Result<Surgery, StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(existing) = tables.surgeries.iter().find(|s| s.name == name) {
            return Ok(existing.clone());
        }
        let surgery = Surgery {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        tables.surgeries.push(surgery.clone());
        Ok(surgery)
    }

    async fn create_hospitalization(
        &self,
        hospitalization: NewHospitalization,
    ) -> Result<Hospitalization, StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(missing) = hospitalization
            .diseases
            .iter()
            .find(|id| !tables.diseases.iter().any(|d| d.id == **id))
        {
            return Err(StoreError::MissingReference(format!("disease {}", missing)));
        }
        let hospitalization = hospitalization.into_hospitalization(Uuid::new_v4());
        tables.hospitalizations.push(hospitalization.clone());
        Ok(hospitalization)
    }

    async fn find_user_surgeries(&self, user_id: Uuid) -> Result<Vec<UserSurgeryDetails>, StoreError> {
        let tables = self.tables.read().await;
        let details = tables
            .user_surgeries
            .iter()
            .filter(|us| us.user_id == user_id)
            .filter_map(|us| {
                let surgery = tables.surgeries.iter().find(|s| s.id == us.surgery_id)?;
                let hospitalization = tables
                    .hospitalizations
                    .iter()
                    .find(|h| h.id == us.hospitalization_id)?;
                Some(UserSurgeryDetails {
                    user_surgery: us.clone(),
                    surgery: surgery.clone(),
                    hospitalization: hospitalization.clone(),
                })
            })
            .collect();
        Ok(details)
    }

    async fn find_user_surgery(&self, id: Uuid) -> Result<Option<UserSurgery>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.user_surgeries.iter().find(|us| us.id == id).cloned())
    }

    async fn find_user_surgery_with_name(
        &self,
        id: Uuid,
    ) -> Result<Option<UserSurgeryWithName>, StoreError> {
        let tables = self.tables.read().await;
        let found = tables.user_surgeries.iter().find(|us| us.id == id).and_then(|us| {
            tables
                .surgeries
                .iter()
                .find(|s| s.id == us.surgery_id)
                .map(|s| UserSurgeryWithName {
                    user_surgery: us.clone(),
                    surgery_name: s.name.clone(),
                })
        });
        Ok(found)
    }

    async fn create_user_surgery(&self, record: NewUserSurgery) -> Result<UserSurgery, StoreError> {
        let record = record.into_user_surgery(Uuid::new_v4());
        let mut tables = self.tables.write().await;
        tables.check_references(&record)?;
        tables.user_surgeries.push(record.clone());
        Ok(record)
    }

    async fn save_user_surgery(&self, record: UserSurgery) -> Result<UserSurgery, StoreError> {
        let mut tables = self.tables.write().await;
        tables.check_references(&record)?;
        match tables.user_surgeries.iter().position(|us| us.id == record.id) {
            Some(index) => tables.user_surgeries[index] = record.clone(),
            None => tables.user_surgeries.push(record.clone()),
        }
        Ok(record)
    }

    async fn delete_user_surgery(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.user_surgeries.len();
        tables.user_surgeries.retain(|us| us.id != id);
        Ok(tables.user_surgeries.len() < before)
    }

    async fn list_diseases(&self) -> Result<Vec<Disease>, StoreError> {
        Ok(self.tables.read().await.diseases.clone())
    }
}
