use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

/// Departments a student can enrol under, in the order the sign-up form lists them.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Department {
    #[serde(rename = "Engineering")]
    Engineering,
    #[serde(rename = "Medical Sciences")]
    MedicalSciences,
    #[serde(rename = "Business Administration")]
    BusinessAdministration,
    #[serde(rename = "Arts & Humanities")]
    ArtsAndHumanities,
    #[serde(rename = "Natural Sciences")]
    NaturalSciences,
    #[serde(rename = "Law")]
    Law,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Computer Science")]
    ComputerScience,
}

impl Department {
    pub const ALL: [Self; 8] = [
        Self::Engineering,
        Self::MedicalSciences,
        Self::BusinessAdministration,
        Self::ArtsAndHumanities,
        Self::NaturalSciences,
        Self::Law,
        Self::Education,
        Self::ComputerScience,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Engineering => "Engineering",
            Self::MedicalSciences => "Medical Sciences",
            Self::BusinessAdministration => "Business Administration",
            Self::ArtsAndHumanities => "Arts & Humanities",
            Self::NaturalSciences => "Natural Sciences",
            Self::Law => "Law",
            Self::Education => "Education",
            Self::ComputerScience => "Computer Science",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown department: {0:?}")]
pub struct UnknownDepartment(pub String);

impl FromStr for Department {
    type Err = UnknownDepartment;

    // Matches the option values of the select exactly; no case folding.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|department| department.as_str() == value)
            .ok_or_else(|| UnknownDepartment(value.to_string()))
    }
}
