//! Application state management
//!
//! Shared resources passed to every handler through axum's state
//! extraction. Built once at startup; every field is cheap to clone.

use crate::auth::{transport, JwtService, PasswordService, SchemePolicy, TokenVerifier};
use crate::config::AppConfig;
use crate::repositories::DynStore;
use crate::services::{ResumeService, UserService};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Persistence handle shared by every component
    pub store: DynStore,
    verifier: TokenVerifier,
    users: UserService,
    resumes: ResumeService,
}

impl AppState {
    /// Wire every component to the one store handle.
    ///
    /// Derives the JWT keys from the configured secret, so call this once at
    /// startup after `AppConfig::validate`.
    pub fn new(store: DynStore, config: AppConfig) -> Self {
        let jwt = JwtService::new(&config.auth.jwt_secret, config.auth.token_ttl_secs);
        let transport = transport::from_config(&config.auth);
        let verifier = TokenVerifier::new(
            jwt.clone(),
            store.clone(),
            transport,
            SchemePolicy {
                scheme: config.auth.scheme.clone(),
                require_scheme: config.auth.require_scheme,
            },
        );

        Self {
            users: UserService::new(store.clone(), PasswordService::new(config.auth.bcrypt_cost), jwt),
            resumes: ResumeService::new(store.clone()),
            verifier,
            store,
            config: Arc::new(config),
        }
    }

    /// Get a reference to the store
    #[inline]
    pub fn store(&self) -> &DynStore {
        &self.store
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    #[inline]
    pub fn users(&self) -> &UserService {
        &self.users
    }

    #[inline]
    pub fn resumes(&self) -> &ResumeService {
        &self.resumes
    }
}
