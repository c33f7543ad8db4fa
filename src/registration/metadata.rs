//! Role-tagged attributes attached to a new account.

use super::{
    department::Department,
    role::Role,
    validation::{Applicant, ValidatedRegistration},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference identifier stored alongside the account, keyed by role.
///
/// The id is a display/reference value handed to the identity provider, not
/// a credential.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalId {
    #[serde(rename = "student_id")]
    Student(Uuid),
    #[serde(rename = "teacher_id")]
    Teacher(Uuid),
}

impl ExternalId {
    /// Generate a fresh id for the given role.
    #[must_use]
    pub fn generate(role: Role) -> Self {
        let id = Uuid::new_v4();
        match role {
            Role::Student => Self::Student(id),
            Role::Teacher => Self::Teacher(id),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserMetadata {
    pub role: Role,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
    #[serde(flatten)]
    pub external_id: ExternalId,
}

impl UserMetadata {
    #[must_use]
    pub fn for_registration(registration: &ValidatedRegistration) -> Self {
        Self::new(&registration.applicant, registration.name.clone())
    }

    #[must_use]
    pub fn new(applicant: &Applicant, name: String) -> Self {
        let role = applicant.role();
        Self {
            role,
            name,
            department: applicant.department(),
            external_id: ExternalId::generate(role),
        }
    }
}
