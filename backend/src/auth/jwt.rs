//! JWT session token issuance and validation
//!
//! Tokens are HS256 JWTs carrying the user id, issue time, expiry, and a
//! random id. Keys are derived once from the configured secret.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use resume_manager_shared::AuthError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Unique per issuance
    pub jti: String,
}

/// Decoded, verified session: who, and for how long
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClaim {
    pub user_id: i64,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Pre-computed JWT keys for efficient token operations
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// Issues and verifies session tokens
///
/// Create once at startup and share through `AppState`; cloning only bumps
/// reference counts.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    token_ttl_secs: i64,
    validation: Arc<Validation>,
}

impl JwtService {
    pub fn new(secret: &str, token_ttl_secs: i64) -> Self {
        // Expiry is checked by hand against a caller-supplied clock so the
        // window is exactly [iat, exp) with no leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp", "iat"]);

        Self {
            keys: JwtKeys::new(secret),
            token_ttl_secs,
            validation: Arc::new(validation),
        }
    }

    /// Issue a token for a user, valid from now for the configured TTL
    #[inline]
    pub fn issue(&self, user_id: i64) -> Result<String> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token as if it were minted at `issued_at`
    pub fn issue_at(&self, user_id: i64, issued_at: DateTime<Utc>) -> Result<String> {
        let exp = Duration::try_seconds(self.token_ttl_secs)
            .and_then(|ttl| issued_at.checked_add_signed(ttl))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Session lifetime of {}s overflows the token expiry",
                    self.token_ttl_secs
                )
            })?;

        let claims = Claims {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
            iat: issued_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to sign session token: {}", e))
    }

    /// Verify signature and expiry against the current time
    #[inline]
    pub fn verify(&self, token: &str) -> Result<SessionClaim, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify signature, claim shape, and that `now` lies in `[iat, exp)`
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaim, AuthError> {
        let claims = decode::<Claims>(token, &self.keys.decoding, &self.validation)
            .map_err(|_| AuthError::InvalidToken)?
            .claims;

        let user_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| AuthError::InvalidToken)?;
        let issued_at =
            DateTime::<Utc>::from_timestamp(claims.iat, 0).ok_or(AuthError::InvalidToken)?;
        let expires_at =
            DateTime::<Utc>::from_timestamp(claims.exp, 0).ok_or(AuthError::InvalidToken)?;

        if now.timestamp() >= claims.exp {
            return Err(AuthError::TokenExpired);
        }
        if now.timestamp() < claims.iat {
            return Err(AuthError::InvalidToken);
        }

        Ok(SessionClaim {
            user_id,
            issued_at,
            expires_at,
        })
    }

    #[inline]
    pub fn token_ttl_secs(&self) -> i64 {
        self.token_ttl_secs
    }
}
