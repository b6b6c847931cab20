use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use super::models::{
    Disease, Exam, Hospitalization, NewExam, NewHospitalization, NewUserSurgery, Surgery,
    UserSurgery, UserSurgeryDetails, UserSurgeryWithName,
};
use super::store::{RecordStore, StoreError};
use crate::config::DatabaseConfig;

/// PostgreSQL-backed store; schema lives in `sql/schema.sql`
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

/// Flat row for the user-surgery list join
#[derive(Debug, FromRow)]
struct UserSurgeryDetailsRow {
    id: Uuid,
    user_id: Uuid,
    hospitalization_id: Uuid,
    surgery_id: Uuid,
    after_effects: Option<String>,
    surgery_name: String,
    entrance_date: DateTime<Utc>,
    exit_date: Option<DateTime<Utc>>,
    location: String,
    reason: String,
    disease_ids: Vec<Uuid>,
}

impl From<UserSurgeryDetailsRow> for UserSurgeryDetails {
    fn from(row: UserSurgeryDetailsRow) -> Self {
        Self {
            user_surgery: UserSurgery {
                id: row.id,
                user_id: row.user_id,
                hospitalization_id: row.hospitalization_id,
                surgery_id: row.surgery_id,
                after_effects: row.after_effects,
            },
            surgery: Surgery {
                id: row.surgery_id,
                name: row.surgery_name,
            },
            hospitalization: Hospitalization {
                id: row.hospitalization_id,
                user_id: row.user_id,
                entrance_date: row.entrance_date,
                exit_date: row.exit_date,
                location: row.location,
                reason: row.reason,
                diseases: row.disease_ids,
            },
        }
    }
}

#[derive(Debug, FromRow)]
struct UserSurgeryNameRow {
    id: Uuid,
    user_id: Uuid,
    hospitalization_id: Uuid,
    surgery_id: Uuid,
    after_effects: Option<String>,
    surgery_name: String,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let url = config
            .url
            .as_deref()
            .ok_or(StoreError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!("Created database pool (max {} connections)", config.max_connections);
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_exams_by_user(&self, user_id: Uuid) -> Result<Vec<Exam>, StoreError> {
        let exams = sqlx::query_as::<_, Exam>(
            "SELECT id, name, user_id, path FROM exams WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(exams)
    }

    async fn find_exam(&self, id: Uuid) -> Result<Option<Exam>, StoreError> {
        let exam = sqlx::query_as::<_, Exam>("SELECT id, name, user_id, path FROM exams WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(exam)
    }

    async fn create_exam(&self, exam: NewExam) -> Result<Exam, StoreError> {
        let exam = sqlx::query_as::<_, Exam>(
            "INSERT INTO exams (id, name, user_id, path) VALUES ($1, $2, $3, $4)
             RETURNING id, name, user_id, path",
        )
        .bind(Uuid::new_v4())
        .bind(&exam.name)
        .bind(exam.user_id)
        .bind(&exam.path)
        .fetch_one(&self.pool)
        .await?;
        Ok(exam)
    }

    async fn list_surgeries(&self) -> Result<Vec<Surgery>, StoreError> {
        let surgeries = sqlx::query_as::<_, Surgery>("SELECT id, name FROM surgeries ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(surgeries)
    }

    async fn find_or_create_surgery(&self, name: &str) -> Result<Surgery, StoreError> {
        // The no-op update makes RETURNING yield the existing row on conflict
        let surgery = sqlx::query_as::<_, Surgery>(
            "INSERT INTO surgeries (id, name) VALUES ($1, $2)
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
             RETURNING id, name",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(surgery)
    }

    async fn create_hospitalization(
        &self,
        hospitalization: NewHospitalization,
    ) -> Result<Hospitalization, StoreError> {
        let mut created = sqlx::query_as::<_, Hospitalization>(
            "INSERT INTO hospitalizations (id, user_id, entrance_date, exit_date, location, reason)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, user_id, entrance_date, exit_date, location, reason",
        )
        .bind(Uuid::new_v4())
        .bind(hospitalization.user_id)
        .bind(hospitalization.entrance_date)
        .bind(hospitalization.exit_date)
        .bind(&hospitalization.location)
        .bind(&hospitalization.reason)
        .fetch_one(&self.pool)
        .await?;

        for disease_id in &hospitalization.diseases {
            sqlx::query(
                "INSERT INTO hospitalization_diseases (hospitalization_id, disease_id) VALUES ($1, $2)",
            )
            .bind(created.id)
            .bind(disease_id)
            .execute(&self.pool)
            .await?;
        }
        created.diseases = hospitalization.diseases;

        Ok(created)
    }

    async fn find_user_surgeries(&self, user_id: Uuid) -> Result<Vec<UserSurgeryDetails>, StoreError> {
        let rows = sqlx::query_as::<_, UserSurgeryDetailsRow>(
            r#"
            SELECT
                us.id, us.user_id, us.hospitalization_id, us.surgery_id, us.after_effects,
                s.name AS surgery_name,
                h.entrance_date, h.exit_date, h.location, h.reason,
                COALESCE(
                    array_agg(hd.disease_id) FILTER (WHERE hd.disease_id IS NOT NULL),
                    '{}'
                ) AS disease_ids
            FROM user_surgeries us
            JOIN surgeries s ON s.id = us.surgery_id
            JOIN hospitalizations h ON h.id = us.hospitalization_id
            LEFT JOIN hospitalization_diseases hd ON hd.hospitalization_id = h.id
            WHERE us.user_id = $1
            GROUP BY us.id, s.id, h.id
            ORDER BY h.entrance_date
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(UserSurgeryDetails::from).collect())
    }

    async fn find_user_surgery(&self, id: Uuid) -> Result<Option<UserSurgery>, StoreError> {
        let record = sqlx::query_as::<_, UserSurgery>(
            "SELECT id, user_id, hospitalization_id, surgery_id, after_effects
             FROM user_surgeries WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn find_user_surgery_with_name(
        &self,
        id: Uuid,
    ) -> Result<Option<UserSurgeryWithName>, StoreError> {
        let row = sqlx::query_as::<_, UserSurgeryNameRow>(
            "SELECT us.id, us.user_id, us.hospitalization_id, us.surgery_id, us.after_effects,
                    s.name AS surgery_name
             FROM user_surgeries us
             JOIN surgeries s ON s.id = us.surgery_id
             WHERE us.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| UserSurgeryWithName {
            user_surgery: UserSurgery {
                id: row.id,
                user_id: row.user_id,
                hospitalization_id: row.hospitalization_id,
                surgery_id: row.surgery_id,
                after_effects: row.after_effects,
            },
            surgery_name: row.surgery_name,
        }))
    }

    async fn create_user_surgery(&self, record: NewUserSurgery) -> Result<UserSurgery, StoreError> {
        self.save_user_surgery(record.into_user_surgery(Uuid::new_v4())).await
    }

    async fn save_user_surgery(&self, record: UserSurgery) -> Result<UserSurgery, StoreError> {
        let saved = sqlx::query_as::<_, UserSurgery>(
            r#"
            INSERT INTO user_surgeries (id, user_id, hospitalization_id, surgery_id, after_effects)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                user_id = EXCLUDED.user_id,
                hospitalization_id = EXCLUDED.hospitalization_id,
                surgery_id = EXCLUDED.surgery_id,
                after_effects = EXCLUDED.after_effects
            RETURNING id, user_id, hospitalization_id, surgery_id, after_effects
            "#,
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(record.hospitalization_id)
        .bind(record.surgery_id)
        .bind(&record.after_effects)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }

    async fn delete_user_surgery(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM user_surgeries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_diseases(&self) -> Result<Vec<Disease>, StoreError> {
        let diseases = sqlx::query_as::<_, Disease>("SELECT id, name FROM diseases ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(diseases)
    }
}
