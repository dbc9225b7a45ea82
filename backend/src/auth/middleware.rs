//! Authentication middleware
//!
//! Per protected request: extract the raw credential from the transport,
//! split scheme and token, verify signature and expiry, resolve the user in
//! the store, and attach the resolved identity to the request. Any
//! authentication failure answers 401 and tells the client to discard its
//! credential.

use super::jwt::JwtService;
use super::transport::{parse_credential, CredentialTransport};
use crate::error::ApiError;
use crate::repositories::DynStore;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use resume_manager_shared::AuthError;
use std::sync::Arc;
use tracing::debug;

/// Identity resolved from a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthIdentity {
    pub user_id: i64,
    pub email: String,
    pub name: String,
}

/// Whether the credential's scheme must match the configured one
#[derive(Debug, Clone)]
pub struct SchemePolicy {
    pub scheme: String,
    pub require_scheme: bool,
}

impl SchemePolicy {
    fn accepts(&self, scheme: &str) -> bool {
        !self.require_scheme || scheme.eq_ignore_ascii_case(&self.scheme)
    }
}

/// Token verification state machine
#[derive(Clone)]
pub struct TokenVerifier {
    jwt: JwtService,
    store: DynStore,
    transport: Arc<dyn CredentialTransport>,
    policy: SchemePolicy,
}

impl TokenVerifier {
    pub fn new(
        jwt: JwtService,
        store: DynStore,
        transport: Arc<dyn CredentialTransport>,
        policy: SchemePolicy,
    ) -> Self {
        Self {
            jwt,
            store,
            transport,
            policy,
        }
    }

    /// Authenticate a request by its headers.
    ///
    /// Rejections come back as `ApiError::Auth`; a failing store lookup is
    /// `ApiError::Internal` and is not retried.
    pub async fn authenticate(&self, headers: &HeaderMap) -> Result<AuthIdentity, ApiError> {
        let raw = self
            .transport
            .extract(headers)
            .ok_or(AuthError::MissingToken)?;

        let (scheme, token) = parse_credential(&raw).ok_or(AuthError::MalformedToken)?;
        if !self.policy.accepts(scheme) {
            return Err(AuthError::MalformedToken.into());
        }

        let claim = self.jwt.verify(token)?;

        let user = self
            .store
            .find_user_by_id(claim.user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or(AuthError::UnknownIdentity)?;

        Ok(AuthIdentity {
            user_id: user.user_id,
            email: user.email,
            name: user.name,
        })
    }

    pub fn transport(&self) -> &dyn CredentialTransport {
        self.transport.as_ref()
    }
}

/// Route layer guarding every protected endpoint
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let verifier = state.verifier();

    match verifier.authenticate(request.headers()).await {
        Ok(identity) => {
            debug!(user_id = identity.user_id, "Request authenticated");
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(ApiError::Auth(kind)) => {
            debug!(reason = kind.code(), path = %request.uri().path(), "Authentication rejected");
            let mut response = ApiError::Auth(kind).into_response();
            verifier.transport().discard(response.headers_mut());
            response
        }
        Err(other) => other.into_response(),
    }
}

/// Handlers behind `require_auth` take the resolved identity as an argument.
#[async_trait]
impl<S> FromRequestParts<S> for AuthIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Fail closed if a route was mounted without the layer.
        parts
            .extensions
            .get::<AuthIdentity>()
            .cloned()
            .ok_or(ApiError::Auth(AuthError::MissingToken))
    }
}
