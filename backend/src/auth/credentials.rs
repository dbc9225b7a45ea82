//! Sign-up and sign-in input validation
//!
//! Runs the pure shape checks from the shared crate and slots the single
//! store lookup (duplicate email) into its place in the precedence order:
//! presence, email format, duplicate account, password length, confirmation.

use crate::error::ApiError;
use crate::repositories::DynStore;
use resume_manager_shared::validation::{
    validate_sign_in, validate_sign_up_shape, SignInCredentials, SignUpCredentials,
};
use resume_manager_shared::{SignInRequest, SignUpRequest, ValidationError};

#[derive(Clone)]
pub struct CredentialValidator {
    store: DynStore,
}

impl CredentialValidator {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    /// First failing rule wins. Nothing is written.
    pub async fn validate_sign_up(&self, req: SignUpRequest) -> Result<SignUpCredentials, ApiError> {
        let credentials = validate_sign_up_shape(req)?;

        if self
            .store
            .email_exists(&credentials.email)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ValidationError::DuplicateAccount.into());
        }

        credentials.check_password_rules()?;
        Ok(credentials)
    }

    /// Presence and email format only; account and password are checked by the caller.
    pub fn validate_sign_in(&self, req: SignInRequest) -> Result<SignInCredentials, ApiError> {
        Ok(validate_sign_in(req)?)
    }
}
