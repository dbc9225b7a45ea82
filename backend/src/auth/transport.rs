//! Credential transport
//!
//! Where the session token lives on the wire. The verifier only asks a
//! transport for the raw `<scheme> <token>` value and, on rejection, tells
//! it to make the client drop the credential.

use crate::config::{AuthConfig, TransportKind};
use anyhow::Result;
use axum::http::{
    header::{AUTHORIZATION, COOKIE, SET_COOKIE, WWW_AUTHENTICATE},
    HeaderMap, HeaderValue,
};
use std::sync::Arc;
use tracing::warn;

pub trait CredentialTransport: Send + Sync {
    /// Raw credential value carried by the request, if any
    fn extract(&self, headers: &HeaderMap) -> Option<String>;

    /// Hand a freshly issued token to the client
    fn attach(&self, headers: &mut HeaderMap, token: &str) -> Result<()>;

    /// Instruct the client to discard its stored credential
    fn discard(&self, headers: &mut HeaderMap);
}

/// Split a raw credential into scheme and token on the first space or `%20`.
pub fn parse_credential(raw: &str) -> Option<(&str, &str)> {
    let raw = raw.trim();
    let (scheme, token) = match (raw.find(' '), raw.find("%20")) {
        (Some(space), Some(encoded)) if encoded < space => (&raw[..encoded], &raw[encoded + 3..]),
        (Some(space), _) => (&raw[..space], &raw[space + 1..]),
        (None, Some(encoded)) => (&raw[..encoded], &raw[encoded + 3..]),
        (None, None) => return None,
    };

    let token = token.trim();
    if scheme.is_empty() || token.is_empty() {
        return None;
    }
    Some((scheme, token))
}

/// Build the transport selected in configuration
pub fn from_config(config: &AuthConfig) -> Arc<dyn CredentialTransport> {
    match config.transport {
        TransportKind::Cookie => Arc::new(CookieTransport::new(
            &config.cookie_name,
            &config.scheme,
            config.token_ttl_secs,
        )),
        TransportKind::Header => Arc::new(HeaderTransport::new(&config.scheme)),
    }
}

/// Token carried in a cookie as `<scheme>%20<token>`
#[derive(Debug, Clone)]
pub struct CookieTransport {
    name: String,
    scheme: String,
    max_age_secs: i64,
}

impl CookieTransport {
    pub fn new(name: &str, scheme: &str, max_age_secs: i64) -> Self {
        Self {
            name: name.to_string(),
            scheme: scheme.to_string(),
            max_age_secs,
        }
    }
}

impl CredentialTransport for CookieTransport {
    fn extract(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|cookies| cookies.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.name)
            .map(|(_, value)| value.trim_matches('"').to_string())
            .filter(|value| !value.is_empty())
    }

    fn attach(&self, headers: &mut HeaderMap, token: &str) -> Result<()> {
        let cookie = format!(
            "{}={}%20{}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.name, self.scheme, token, self.max_age_secs
        );
        headers.append(SET_COOKIE, HeaderValue::from_str(&cookie)?);
        Ok(())
    }

    fn discard(&self, headers: &mut HeaderMap) {
        let cookie = format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", self.name);
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                headers.append(SET_COOKIE, value);
            }
            Err(e) => warn!("Could not build cookie removal header: {}", e),
        }
    }
}

/// Token carried in the `Authorization` header
#[derive(Debug, Clone)]
pub struct HeaderTransport {
    scheme: String,
}

impl HeaderTransport {
    pub fn new(scheme: &str) -> Self {
        Self {
            scheme: scheme.to_string(),
        }
    }
}

impl CredentialTransport for HeaderTransport {
    fn extract(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .filter(|value| !value.trim().is_empty())
    }

    fn attach(&self, headers: &mut HeaderMap, token: &str) -> Result<()> {
        let value = HeaderValue::from_str(&format!("{} {}", self.scheme, token))?;
        headers.insert(AUTHORIZATION, value);
        Ok(())
    }

    fn discard(&self, headers: &mut HeaderMap) {
        match HeaderValue::from_str(&format!("{} error=\"invalid_token\"", self.scheme)) {
            Ok(value) => {
                headers.insert(WWW_AUTHENTICATE, value);
            }
            Err(e) => warn!("Could not build WWW-Authenticate header: {}", e),
        }
    }
}
