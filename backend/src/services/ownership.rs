//! Single-resume access control
//!
//! Every read, update, and delete of one resume goes through
//! [`OwnershipGuard::authorize`] first. Listing never does: it is scoped to
//! the caller inside the store query.

use crate::auth::AuthIdentity;
use crate::error::ApiError;
use crate::repositories::{DynStore, ResumeRecord};
use resume_manager_shared::AuthzError;
use tracing::warn;

#[derive(Clone)]
pub struct OwnershipGuard {
    store: DynStore,
}

impl OwnershipGuard {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    /// Return the resume if it exists and belongs to `identity`
    pub async fn authorize(
        &self,
        identity: &AuthIdentity,
        resume_id: i64,
    ) -> Result<ResumeRecord, ApiError> {
        let resume = self
            .store
            .find_resume_by_id(resume_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or(AuthzError::ResourceNotFound)?;

        if resume.user_id != identity.user_id {
            warn!(
                resume_id,
                caller = identity.user_id,
                "Rejected access to another user's resume"
            );
            return Err(AuthzError::NotOwner.into());
        }

        Ok(resume)
    }
}
