//! Login form.
//!
//! The form collects a role, email and password, but sign-in is not wired to
//! the identity provider yet: submitting always reports
//! [`LoginError::NotImplemented`]. No credential checks are made here.

use crate::registration::Role;
use secrecy::SecretString;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub role: Role,
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("Login is not available yet")]
    NotImplemented,
}

impl LoginForm {
    /// # Errors
    /// Always returns [`LoginError::NotImplemented`].
    pub fn submit(&self) -> Result<(), LoginError> {
        debug!(role = %self.role, "login submitted");
        Err(LoginError::NotImplemented)
    }
}
