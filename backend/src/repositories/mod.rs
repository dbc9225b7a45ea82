//! Database repositories
//!
//! The store interface the services depend on. Services receive an
//! `Arc<dyn Store>` at construction; `PgStore` backs it with PostgreSQL
//! and `MemoryStore` keeps everything in process.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub mod memory;
pub mod postgres;
pub mod resume;
pub mod user;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use resume::{CreateResume, ResumeChanges, ResumeRecord};
pub use user::{CreateUser, UserRecord};

use resume_manager_shared::ResumeSort;

/// Insert rejected by the unique email constraint
#[derive(Debug, thiserror::Error)]
#[error("email already registered")]
pub struct DuplicateEmail;

/// Account lookups and creation
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn email_exists(&self, email: &str) -> Result<bool>;

    /// Fails with [`DuplicateEmail`] when the address is taken.
    async fn create_user(&self, input: CreateUser) -> Result<UserRecord>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>>;

    async fn find_user_by_id(&self, user_id: i64) -> Result<Option<UserRecord>>;
}

/// Resume persistence. Reads by id are unscoped; callers go through the
/// ownership guard. Listing is scoped to one owner inside the query.
#[async_trait]
pub trait ResumeRepository: Send + Sync {
    async fn create_resume(&self, input: CreateResume) -> Result<ResumeRecord>;

    async fn find_resume_by_id(&self, resume_id: i64) -> Result<Option<ResumeRecord>>;

    async fn list_resumes_by_owner(
        &self,
        user_id: i64,
        sort: ResumeSort,
    ) -> Result<Vec<ResumeRecord>>;

    /// Apply the provided fields; `None` when the row no longer exists.
    async fn update_resume(
        &self,
        resume_id: i64,
        changes: ResumeChanges,
    ) -> Result<Option<ResumeRecord>>;

    /// `false` when the row no longer exists.
    async fn delete_resume(&self, resume_id: i64) -> Result<bool>;
}

/// Everything the service layer needs from persistence
#[async_trait]
pub trait Store: UserRepository + ResumeRepository {
    async fn health_check(&self) -> Result<()>;
}

/// Shared handle to the configured store
pub type DynStore = Arc<dyn Store>;
