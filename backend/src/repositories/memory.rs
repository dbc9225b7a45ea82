//! In-process store
//!
//! Backs the service when `database.url` uses the `memory:` scheme and
//! stands in for PostgreSQL in tests. Mirrors the table constraints that
//! matter to callers: unique emails and store-assigned ids/timestamps.

use super::{
    CreateResume, CreateUser, DuplicateEmail, ResumeChanges, ResumeRecord, ResumeRepository,
    Store, UserRecord, UserRepository,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use resume_manager_shared::{ResumeSort, ResumeStatus, SortDirection, SortField};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, UserRecord>,
    resumes: BTreeMap<i64, ResumeRecord>,
    next_user_id: i64,
    next_resume_id: i64,
}

/// Store holding all rows in memory
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Byte-wise `String` ordering matches the `"C"` collation `PgStore` sorts
/// text columns under.
fn compare(a: &ResumeRecord, b: &ResumeRecord, field: SortField) -> Ordering {
    let primary = match field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortField::Title => a.title.cmp(&b.title),
        SortField::Status => a.status.cmp(&b.status),
        SortField::ResumeId => Ordering::Equal,
    };
    primary.then(a.resume_id.cmp(&b.resume_id))
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn email_exists(&self, email: &str) -> Result<bool> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().any(|u| u.email == email))
    }

    async fn create_user(&self, input: CreateUser) -> Result<UserRecord> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == input.email) {
            return Err(DuplicateEmail.into());
        }

        tables.next_user_id += 1;
        let now = Utc::now();
        let user = UserRecord {
            user_id: tables.next_user_id,
            email: input.email,
            password_hash: input.password_hash,
            name: input.name,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.user_id, user.clone());

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, user_id: i64) -> Result<Option<UserRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&user_id).cloned())
    }
}

#[async_trait]
impl ResumeRepository for MemoryStore {
    async fn create_resume(&self, input: CreateResume) -> Result<ResumeRecord> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&input.user_id) {
            anyhow::bail!("foreign key violated: resumes.user_id = {}", input.user_id);
        }

        tables.next_resume_id += 1;
        let now = Utc::now();
        let record = ResumeRecord {
            resume_id: tables.next_resume_id,
            user_id: input.user_id,
            title: input.title,
            introduce: input.introduce,
            status: ResumeStatus::default().to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.resumes.insert(record.resume_id, record.clone());

        Ok(record)
    }

    async fn find_resume_by_id(&self, resume_id: i64) -> Result<Option<ResumeRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.resumes.get(&resume_id).cloned())
    }

    async fn list_resumes_by_owner(
        &self,
        user_id: i64,
        sort: ResumeSort,
    ) -> Result<Vec<ResumeRecord>> {
        let tables = self.tables.read().await;
        let mut records: Vec<ResumeRecord> = tables
            .resumes
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();

        records.sort_by(|a, b| {
            let ord = compare(a, b, sort.field);
            match sort.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });

        Ok(records)
    }

    async fn update_resume(
        &self,
        resume_id: i64,
        changes: ResumeChanges,
    ) -> Result<Option<ResumeRecord>> {
        let mut tables = self.tables.write().await;
        let Some(record) = tables.resumes.get_mut(&resume_id) else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            record.title = title;
        }
        if let Some(introduce) = changes.introduce {
            record.introduce = introduce;
        }
        record.updated_at = Utc::now();

        Ok(Some(record.clone()))
    }

    async fn delete_resume(&self, resume_id: i64) -> Result<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.resumes.remove(&resume_id).is_some())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
