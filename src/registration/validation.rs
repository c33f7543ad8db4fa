//! Ordered sign-up checks.
//!
//! Rules run in a fixed order and the first violation is the only one
//! reported: email domain, password length, password confirmation, then the
//! student department. A passing input is turned into a
//! [`ValidatedRegistration`], whose [`Applicant`] cannot carry a department
//! for a teacher.

use super::{department::Department, role::Role};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::debug;

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Raw form values for a single sign-up attempt.
#[derive(Debug, Clone, Default)]
pub struct RegistrationInput {
    pub role: Role,
    pub name: String,
    pub department: Option<String>,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", domain_message(.0))]
    DomainMismatch(Role),
    #[error("Password must be at least 6 characters.")]
    PasswordTooShort,
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("Please select a department.")]
    DepartmentMissing,
}

const fn domain_message(role: &Role) -> &'static str {
    match role {
        Role::Student => "Students must use @student.ku.edu.np email address.",
        Role::Teacher => "Teachers must use @teacher.ku.edu.np or @ku.edu.np email address.",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicant {
    Student { department: Department },
    Teacher,
}

impl Applicant {
    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::Student { .. } => Role::Student,
            Self::Teacher => Role::Teacher,
        }
    }

    #[must_use]
    pub const fn department(&self) -> Option<Department> {
        match self {
            Self::Student { department } => Some(*department),
            Self::Teacher => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidatedRegistration {
    pub applicant: Applicant,
    pub name: String,
    /// Trimmed and lowercased.
    pub email: String,
    pub password: SecretString,
}

#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Run every rule in order, stopping at the first violation.
///
/// # Errors
/// Returns the first [`ValidationError`] hit.
pub fn validate(input: &RegistrationInput) -> Result<ValidatedRegistration, ValidationError> {
    let email = check_email_domain(input.role, &input.email)?;
    check_password_length(&input.password)?;
    check_password_match(&input.password, &input.confirm_password)?;
    let applicant = check_department(input.role, input.department.as_deref())?;

    debug!(role = %input.role, "registration input passed validation");

    Ok(ValidatedRegistration {
        applicant,
        name: input.name.clone(),
        email,
        password: input.password.clone(),
    })
}

fn check_email_domain(role: Role, email: &str) -> Result<String, ValidationError> {
    let normalized = normalize_email(email);
    if role.accepts_email(&normalized) {
        Ok(normalized)
    } else {
        Err(ValidationError::DomainMismatch(role))
    }
}

fn check_password_length(password: &SecretString) -> Result<(), ValidationError> {
    if password.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

fn check_password_match(
    password: &SecretString,
    confirm_password: &SecretString,
) -> Result<(), ValidationError> {
    if password.expose_secret() != confirm_password.expose_secret() {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

fn check_department(role: Role, department: Option<&str>) -> Result<Applicant, ValidationError> {
    match role {
        // Teachers never carry a department, whatever the form held.
        Role::Teacher => Ok(Applicant::Teacher),
        Role::Student => department
            .filter(|value| !value.is_empty())
            .and_then(|value| value.parse::<Department>().ok())
            .map(|department| Applicant::Student { department })
            .ok_or(ValidationError::DepartmentMissing),
    }
}
