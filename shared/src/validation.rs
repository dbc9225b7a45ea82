//! Input validation functions
//!
//! Pure shape checks for sign-up, sign-in, and resume bodies. Checks that
//! need the store (duplicate email) live in the backend and are slotted in
//! between these steps.

use crate::errors::ValidationError;
use crate::types::{ResumeRequest, SignInRequest, SignUpRequest};
use once_cell::sync::Lazy;
use regex_lite::Regex;
use secrecy::{ExposeSecret, SecretString};

/// Minimum password length, in characters
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Minimum resume introduction length, in characters
pub const MIN_INTRODUCTION_CHARS: usize = 150;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// Check an address against the general `local@domain.tld` shape
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 255 && EMAIL_REGEX.is_match(email)
}

fn require_text(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn require_secret(
    field: &'static str,
    value: Option<SecretString>,
) -> Result<SecretString, ValidationError> {
    match value {
        Some(v) if !v.expose_secret().is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/// Sign-up input that passed the presence and email-format checks
#[derive(Debug)]
pub struct SignUpCredentials {
    pub email: String,
    pub password: SecretString,
    pub password_confirmation: SecretString,
    pub name: String,
}

impl SignUpCredentials {
    /// Password length, then confirmation match
    pub fn check_password_rules(&self) -> Result<(), ValidationError> {
        let password = self.password.expose_secret();
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_CHARS));
        }
        if password != self.password_confirmation.expose_secret() {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Presence of every field (in wire order), then email format.
pub fn validate_sign_up_shape(req: SignUpRequest) -> Result<SignUpCredentials, ValidationError> {
    let email = require_text("email", req.email)?;
    let password = require_secret("password", req.password)?;
    let password_confirmation = require_secret("passwordConfirmation", req.password_confirmation)?;
    let name = require_text("name", req.name)?;

    let email = email.trim().to_string();
    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmailFormat);
    }

    Ok(SignUpCredentials {
        email,
        password,
        password_confirmation,
        name,
    })
}

/// Sign-in input that passed the presence and email-format checks
#[derive(Debug)]
pub struct SignInCredentials {
    pub email: String,
    pub password: SecretString,
}

pub fn validate_sign_in(req: SignInRequest) -> Result<SignInCredentials, ValidationError> {
    let email = require_text("email", req.email)?;
    let password = require_secret("password", req.password)?;

    let email = email.trim().to_string();
    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmailFormat);
    }

    Ok(SignInCredentials { email, password })
}

/// Resume body with both fields present and a long enough introduction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFields {
    pub title: String,
    pub introduce: String,
}

pub fn validate_resume(req: ResumeRequest) -> Result<ResumeFields, ValidationError> {
    let title = require_text("title", req.title)?;
    let introduce = require_text("introduce", req.introduce)?;

    if introduce.chars().count() < MIN_INTRODUCTION_CHARS {
        return Err(ValidationError::IntroductionTooShort(MIN_INTRODUCTION_CHARS));
    }

    Ok(ResumeFields { title, introduce })
}
