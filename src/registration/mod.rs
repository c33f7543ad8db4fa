//! Student and teacher sign-up.
//!
//! ## Rules
//!
//! Submissions are checked in a fixed order and only the first failure is
//! reported:
//!
//! 1. **Email domain.** Students need `@student.ku.edu.np`; teachers need
//!    `@teacher.ku.edu.np` or `@ku.edu.np` and may never use the student domain.
//!    The address is trimmed and lowercased first.
//! 2. **Password length.** At least six characters.
//! 3. **Password confirmation.** Exact, case-sensitive match.
//! 4. **Department.** Students must pick one of the listed departments.
//!
//! ## Provider hand-off
//!
//! A valid submission gets role-tagged metadata (`student_id` or `teacher_id`,
//! plus `department` for students) and is passed to the identity provider
//! together with the `<app>/verify` redirect link. Nothing is retried.

mod department;
mod form;
mod metadata;
mod role;
mod service;
mod validation;

pub use department::{Department, UnknownDepartment};
pub use form::{FormState, RegistrationForm};
pub use metadata::{ExternalId, UserMetadata};
pub use role::Role;
pub use service::{
    Registered, RegistrationConfig, RegistrationError, RegistrationService,
    VERIFICATION_SENT_MESSAGE,
};
pub use validation::{
    Applicant, MIN_PASSWORD_LENGTH, RegistrationInput, ValidatedRegistration, ValidationError,
    normalize_email, validate,
};
