//! Account service: sign-up and sign-in
//!
//! Password hashing and verification run on the blocking thread pool.

use crate::auth::{CredentialValidator, JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{CreateUser, DuplicateEmail, DynStore, UserRecord};
use resume_manager_shared::{ProfileResponse, SignInRequest, SignUpRequest, ValidationError};
use tracing::{info, warn};

#[derive(Clone)]
pub struct UserService {
    store: DynStore,
    validator: CredentialValidator,
    passwords: PasswordService,
    jwt: JwtService,
}

impl UserService {
    pub fn new(store: DynStore, passwords: PasswordService, jwt: JwtService) -> Self {
        Self {
            validator: CredentialValidator::new(store.clone()),
            store,
            passwords,
            jwt,
        }
    }

    /// Register a new account and return its profile (never the hash)
    pub async fn sign_up(&self, req: SignUpRequest) -> Result<ProfileResponse, ApiError> {
        let credentials = self.validator.validate_sign_up(req).await?;

        let password_hash = self
            .passwords
            .hash_async(credentials.password)
            .await
            .map_err(ApiError::Internal)?;

        let user = self
            .store
            .create_user(CreateUser {
                email: credentials.email,
                password_hash,
                name: credentials.name,
            })
            .await
            .map_err(|e| {
                // Lost a race with a concurrent sign-up for the same email.
                if e.is::<DuplicateEmail>() {
                    ApiError::from(ValidationError::DuplicateAccount)
                } else {
                    ApiError::Internal(e)
                }
            })?;

        info!(user_id = user.user_id, "Account created");
        Ok(profile(user))
    }

    /// Check credentials and issue a session token
    pub async fn sign_in(&self, req: SignInRequest) -> Result<String, ApiError> {
        let credentials = self.validator.validate_sign_in(req)?;

        let user = self
            .store
            .find_user_by_email(&credentials.email)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Conflict("No account matches this email.".to_string()))?;

        let valid = PasswordService::verify_async(credentials.password, user.password_hash)
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            warn!(user_id = user.user_id, "Sign-in rejected: wrong password");
            return Err(ApiError::InvalidCredentials);
        }

        let token = self.jwt.issue(user.user_id).map_err(ApiError::Internal)?;
        info!(user_id = user.user_id, "Session issued");
        Ok(token)
    }
}

fn profile(user: UserRecord) -> ProfileResponse {
    ProfileResponse {
        user_id: user.user_id,
        email: user.email,
        name: user.name,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}
