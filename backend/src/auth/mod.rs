//! Authentication module
//!
//! Session tokens are HS256 JWTs, passwords are bcrypt hashes, and the token
//! travels through a configurable transport (cookie or header).

mod credentials;
mod jwt;
mod middleware;
mod password;
pub mod transport;

pub use credentials::CredentialValidator;
pub use jwt::{Claims, JwtService, SessionClaim};
pub use middleware::{require_auth, AuthIdentity, SchemePolicy, TokenVerifier};
pub use password::PasswordService;
pub use transport::{CookieTransport, CredentialTransport, HeaderTransport};
