//! Resume repository for database operations

use super::{PgStore, ResumeRepository};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use resume_manager_shared::{ResumeSort, ResumeStatus};

/// Resume record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ResumeRecord {
    pub resume_id: i64,
    pub user_id: i64,
    pub title: String,
    pub introduce: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResumeRecord {
    pub fn status(&self) -> ResumeStatus {
        self.status.parse().unwrap_or_default()
    }
}

/// Input for creating a resume. Status always starts at its default.
#[derive(Debug, Clone)]
pub struct CreateResume {
    pub user_id: i64,
    pub title: String,
    pub introduce: String,
}

/// Fields to overwrite on update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct ResumeChanges {
    pub title: Option<String>,
    pub introduce: Option<String>,
}

const RESUME_COLUMNS: &str =
    "resume_id, user_id, title, introduce, status, created_at, updated_at";

#[async_trait]
impl ResumeRepository for PgStore {
    async fn create_resume(&self, input: CreateResume) -> Result<ResumeRecord> {
        let record = sqlx::query_as::<_, ResumeRecord>(
            r#"
            INSERT INTO resumes (user_id, title, introduce, status)
            VALUES ($1, $2, $3, $4)
            RETURNING resume_id, user_id, title, introduce, status, created_at, updated_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.title)
        .bind(&input.introduce)
        .bind(ResumeStatus::default().as_str())
        .fetch_one(self.pool())
        .await?;

        Ok(record)
    }

    async fn find_resume_by_id(&self, resume_id: i64) -> Result<Option<ResumeRecord>> {
        let record = sqlx::query_as::<_, ResumeRecord>(
            r#"
            SELECT resume_id, user_id, title, introduce, status, created_at, updated_at
            FROM resumes
            WHERE resume_id = $1
            "#,
        )
        .bind(resume_id)
        .fetch_optional(self.pool())
        .await?;

        Ok(record)
    }

    async fn list_resumes_by_owner(
        &self,
        user_id: i64,
        sort: ResumeSort,
    ) -> Result<Vec<ResumeRecord>> {
        // Sort key and direction come from closed enums, never from the request text.
        let query = format!(
            "SELECT {columns} FROM resumes WHERE user_id = $1 ORDER BY {key} {dir}, resume_id {dir}",
            columns = RESUME_COLUMNS,
            key = sort.field.order_key(),
            dir = sort.direction.as_sql(),
        );

        let records = sqlx::query_as::<_, ResumeRecord>(&query)
            .bind(user_id)
            .fetch_all(self.pool())
            .await?;

        Ok(records)
    }

    async fn update_resume(
        &self,
        resume_id: i64,
        changes: ResumeChanges,
    ) -> Result<Option<ResumeRecord>> {
        let record = sqlx::query_as::<_, ResumeRecord>(
            r#"
            UPDATE resumes SET
                title = COALESCE($2, title),
                introduce = COALESCE($3, introduce),
                updated_at = NOW()
            WHERE resume_id = $1
            RETURNING resume_id, user_id, title, introduce, status, created_at, updated_at
            "#,
        )
        .bind(resume_id)
        .bind(changes.title)
        .bind(changes.introduce)
        .fetch_optional(self.pool())
        .await?;

        Ok(record)
    }

    async fn delete_resume(&self, resume_id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM resumes
            WHERE resume_id = $1
            "#,
        )
        .bind(resume_id)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
