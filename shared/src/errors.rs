//! Error types shared between the backend and its clients
//!
//! Every variant carries the human-readable message that ends up in the
//! `message` field of an error response, plus a stable machine code.

use thiserror::Error;

/// Field-level rejection of sign-up, sign-in, or resume input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter {0}.")]
    MissingField(&'static str),

    #[error("Email format is invalid.")]
    InvalidEmailFormat,

    #[error("This email is already registered.")]
    DuplicateAccount,

    #[error("Password must be at least {0} characters.")]
    PasswordTooShort(usize),

    #[error("The two passwords do not match.")]
    PasswordMismatch,

    #[error("Introduction must be at least {0} characters.")]
    IntroductionTooShort(usize),
}

impl ValidationError {
    /// Wire name of the offending field, if the rejection is about one field.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::MissingField(field) => Some(field),
            ValidationError::InvalidEmailFormat | ValidationError::DuplicateAccount => {
                Some("email")
            }
            ValidationError::PasswordTooShort(_) => Some("password"),
            ValidationError::PasswordMismatch => Some("passwordConfirmation"),
            ValidationError::IntroductionTooShort(_) => Some("introduce"),
        }
    }
}

/// Authentication failures produced while verifying a request's token.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication token is missing.")]
    MissingToken,

    #[error("Authentication format is not supported.")]
    MalformedToken,

    #[error("Authentication token has expired.")]
    TokenExpired,

    #[error("Authentication token is invalid.")]
    InvalidToken,

    #[error("No user matches the authentication token.")]
    UnknownIdentity,
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "MISSING_TOKEN",
            AuthError::MalformedToken => "MALFORMED_TOKEN",
            AuthError::TokenExpired => "TOKEN_EXPIRED",
            AuthError::InvalidToken => "INVALID_TOKEN",
            AuthError::UnknownIdentity => "UNKNOWN_IDENTITY",
        }
    }
}

/// Ownership failures on single-resume operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthzError {
    #[error("Resume does not exist.")]
    ResourceNotFound,

    #[error("You are not the author of this resume.")]
    NotOwner,
}

impl AuthzError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthzError::ResourceNotFound => "RESOURCE_NOT_FOUND",
            AuthzError::NotOwner => "NOT_OWNER",
        }
    }
}
