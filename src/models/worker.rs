//! Worker roster records.

use crate::error::ParseError;
use std::str::FromStr;

/// External worker identifier.
pub type WorkerId = u64;

/// Job role. Drives eligibility rules only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Role {
    /// Ward lead.
    HeadNurse,
    /// Regular staff.
    #[default]
    StaffNurse,
    /// Recently hired; must be paired with a senior on shift.
    NewNurse,
    /// Training and education duties.
    EducationCoordinator,
}

impl FromStr for Role {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "head_nurse" | "head" => Ok(Role::HeadNurse),
            "staff_nurse" | "staff" => Ok(Role::StaffNurse),
            "new_nurse" | "new" => Ok(Role::NewNurse),
            "education_coordinator" | "educator" => Ok(Role::EducationCoordinator),
            _ => Err(ParseError::new("role", s)),
        }
    }
}

/// Contract type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EmploymentType {
    /// Full-time contract.
    #[default]
    FullTime,
    /// Part-time contract; never eligible for night shifts.
    PartTime,
}

impl FromStr for EmploymentType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full_time" | "fulltime" => Ok(EmploymentType::FullTime),
            "part_time" | "parttime" => Ok(EmploymentType::PartTime),
            _ => Err(ParseError::new("employment type", s)),
        }
    }
}

/// Self-reported skill tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SkillLevel {
    /// Entry level.
    #[default]
    Beginner,
    /// Mid level.
    Intermediate,
    /// Senior level.
    Advanced,
}

/// One member of the roster. Immutable for the whole run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Worker {
    /// External identifier.
    pub id: WorkerId,
    /// Job role.
    pub role: Role,
    /// Contract type.
    pub employment_type: EmploymentType,
    /// Years of experience.
    pub years_experience: u32,
    /// Skill tier.
    pub skill_level: SkillLevel,
}

impl Worker {
    /// Creates a full-time staff nurse with the given experience.
    pub fn new(id: WorkerId, years_experience: u32) -> Self {
        Self {
            id,
            role: Role::StaffNurse,
            employment_type: EmploymentType::FullTime,
            years_experience,
            skill_level: SkillLevel::default(),
        }
    }

    /// Sets the role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Sets the employment type.
    pub fn with_employment(mut self, employment_type: EmploymentType) -> Self {
        self.employment_type = employment_type;
        self
    }

    /// Sets the skill level.
    pub fn with_skill(mut self, skill_level: SkillLevel) -> Self {
        self.skill_level = skill_level;
        self
    }

    #[inline]
    pub fn is_part_time(&self) -> bool {
        self.employment_type == EmploymentType::PartTime
    }

    /// New workers need a senior on the same shift.
    #[inline]
    pub fn is_new(&self) -> bool {
        self.years_experience <= 1 || self.role == Role::NewNurse
    }

    /// At least three years of experience and not new.
    #[inline]
    pub fn is_senior(&self) -> bool {
        !self.is_new() && self.years_experience >= 3
    }
}
