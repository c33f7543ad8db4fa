//! Account roles and the university email domains tied to them.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

pub const STUDENT_DOMAIN: &str = "@student.ku.edu.np";
pub const TEACHER_DOMAIN: &str = "@teacher.ku.edu.np";
pub const STAFF_DOMAIN: &str = "@ku.edu.np";

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Teacher,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
        }
    }

    /// Whether an already-normalized email belongs to a domain this role may
    /// register with.
    #[must_use]
    pub fn accepts_email(self, email_normalized: &str) -> bool {
        match self {
            Self::Student => email_normalized.ends_with(STUDENT_DOMAIN),
            Self::Teacher => {
                if email_normalized.ends_with(STUDENT_DOMAIN) {
                    return false;
                }
                email_normalized.ends_with(TEACHER_DOMAIN)
                    || email_normalized.ends_with(STAFF_DOMAIN)
            }
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
