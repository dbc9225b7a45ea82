//! Resume service
//!
//! CRUD scoped by the verified identity. Single-resume operations are
//! authorized by [`OwnershipGuard`]; listing filters by owner in the store.

use super::ownership::OwnershipGuard;
use crate::auth::AuthIdentity;
use crate::error::ApiError;
use crate::repositories::{CreateResume, DynStore, ResumeChanges, ResumeRecord};
use resume_manager_shared::validation::validate_resume;
use resume_manager_shared::{AuthzError, ResumeListQuery, ResumeRequest, ResumeResponse, ResumeSort};
use tracing::{debug, info};

#[derive(Clone)]
pub struct ResumeService {
    store: DynStore,
    guard: OwnershipGuard,
}

impl ResumeService {
    pub fn new(store: DynStore) -> Self {
        Self {
            guard: OwnershipGuard::new(store.clone()),
            store,
        }
    }

    pub async fn create(
        &self,
        identity: &AuthIdentity,
        req: ResumeRequest,
    ) -> Result<ResumeResponse, ApiError> {
        let fields = validate_resume(req)?;

        let record = self
            .store
            .create_resume(CreateResume {
                user_id: identity.user_id,
                title: fields.title,
                introduce: fields.introduce,
            })
            .await
            .map_err(ApiError::Internal)?;

        info!(resume_id = record.resume_id, user_id = identity.user_id, "Resume created");
        Ok(project(identity, record))
    }

    /// The caller's resumes, ordered by the normalized sort. Empty is not an error.
    pub async fn list(
        &self,
        identity: &AuthIdentity,
        query: ResumeListQuery,
    ) -> Result<Vec<ResumeResponse>, ApiError> {
        let sort = ResumeSort::from_query(query.sort_by.as_deref(), query.sort.as_deref());
        debug!(user_id = identity.user_id, ?sort, "Listing resumes");

        let records = self
            .store
            .list_resumes_by_owner(identity.user_id, sort)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records
            .into_iter()
            .map(|record| project(identity, record))
            .collect())
    }

    pub async fn get(
        &self,
        identity: &AuthIdentity,
        resume_id: i64,
    ) -> Result<ResumeResponse, ApiError> {
        let record = self.guard.authorize(identity, resume_id).await?;
        Ok(project(identity, record))
    }

    /// Both fields are required; ownership is checked before the write.
    pub async fn update(
        &self,
        identity: &AuthIdentity,
        resume_id: i64,
        req: ResumeRequest,
    ) -> Result<ResumeResponse, ApiError> {
        let fields = validate_resume(req)?;
        self.guard.authorize(identity, resume_id).await?;

        // A concurrent delete between the check and the write leaves no row.
        let record = self
            .store
            .update_resume(
                resume_id,
                ResumeChanges {
                    title: Some(fields.title),
                    introduce: Some(fields.introduce),
                },
            )
            .await
            .map_err(ApiError::Internal)?
            .ok_or(AuthzError::ResourceNotFound)?;

        info!(resume_id, user_id = identity.user_id, "Resume updated");
        Ok(project(identity, record))
    }

    /// Returns the deleted resume's id
    pub async fn delete(&self, identity: &AuthIdentity, resume_id: i64) -> Result<i64, ApiError> {
        self.guard.authorize(identity, resume_id).await?;

        let deleted = self
            .store
            .delete_resume(resume_id)
            .await
            .map_err(ApiError::Internal)?;
        if !deleted {
            return Err(AuthzError::ResourceNotFound.into());
        }

        info!(resume_id, user_id = identity.user_id, "Resume deleted");
        Ok(resume_id)
    }
}

/// Owner equals caller after authorization, so the author name comes from
/// the verified identity.
fn project(identity: &AuthIdentity, record: ResumeRecord) -> ResumeResponse {
    let status = record.status();
    ResumeResponse {
        resume_id: record.resume_id,
        name: identity.name.clone(),
        title: record.title,
        introduce: record.introduce,
        status,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}
