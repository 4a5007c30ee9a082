//! Constraint configuration and the preprocessed constraint set.

use crate::models::{Role, ShiftKind, WorkerId};
use std::collections::{BTreeMap, HashMap};

/// Required head count for each working shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequiredStaff {
    pub day: usize,
    pub evening: usize,
    pub night: usize,
}

impl Default for RequiredStaff {
    fn default() -> Self {
        Self::new(3, 2, 1)
    }
}

impl RequiredStaff {
    pub fn new(day: usize, evening: usize, night: usize) -> Self {
        Self {
            day,
            evening,
            night,
        }
    }

    /// Required count for `kind`; 0 for [`ShiftKind::Off`].
    #[inline]
    pub fn get(&self, kind: ShiftKind) -> usize {
        match kind {
            ShiftKind::Day => self.day,
            ShiftKind::Evening => self.evening,
            ShiftKind::Night => self.night,
            ShiftKind::Off => 0,
        }
    }

    /// Head count needed per day across all shifts.
    pub fn total(&self) -> usize {
        self.day + self.evening + self.night
    }
}

/// Caller-supplied required-staff mapping. Missing shifts default to 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RequiredStaffConfig {
    pub day: Option<usize>,
    pub evening: Option<usize>,
    pub night: Option<usize>,
}

impl RequiredStaffConfig {
    pub(crate) fn resolve(&self) -> RequiredStaff {
        RequiredStaff::new(
            self.day.unwrap_or(1),
            self.evening.unwrap_or(1),
            self.night.unwrap_or(1),
        )
    }
}

/// Optional constraint overrides. Every `None` falls back to a default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConstraintConfig {
    /// `None` means `{Day: 3, Evening: 2, Night: 1}`.
    pub required_staff: Option<RequiredStaffConfig>,
    /// Default 5.
    pub max_consecutive_work_days: Option<usize>,
    /// Default 3.
    pub max_consecutive_night_shifts: Option<usize>,
    /// Default 1.
    pub min_weekly_off_days: Option<usize>,
}

impl ConstraintConfig {
    pub fn with_required_staff(mut self, day: usize, evening: usize, night: usize) -> Self {
        self.required_staff = Some(RequiredStaffConfig {
            day: Some(day),
            evening: Some(evening),
            night: Some(night),
        });
        self
    }

    pub fn with_max_consecutive_work_days(mut self, n: usize) -> Self {
        self.max_consecutive_work_days = Some(n);
        self
    }

    pub fn with_max_consecutive_night_shifts(mut self, n: usize) -> Self {
        self.max_consecutive_night_shifts = Some(n);
        self
    }

    pub fn with_min_weekly_off_days(mut self, n: usize) -> Self {
        self.min_weekly_off_days = Some(n);
        self
    }
}

/// Experience band derived from years of experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ExperienceBand {
    /// ≤ 1 year.
    Junior,
    /// ≤ 3 years.
    Intermediate,
    /// ≤ 7 years.
    Senior,
    /// More than 7 years.
    Expert,
}

impl ExperienceBand {
    pub fn from_years(years: u32) -> Self {
        match years {
            0..=1 => ExperienceBand::Junior,
            2..=3 => ExperienceBand::Intermediate,
            4..=7 => ExperienceBand::Senior,
            _ => ExperienceBand::Expert,
        }
    }
}

/// Per-worker annotations computed once before search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkerProfile {
    pub id: WorkerId,
    pub role: Role,
    pub is_new: bool,
    pub is_senior: bool,
    pub is_part_time: bool,
    pub years_experience: u32,
    pub band: ExperienceBand,
}

/// The normalized, read-only constraint set used by every phase.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintSet {
    pub required_staff: RequiredStaff,
    pub max_consecutive_work_days: usize,
    pub max_consecutive_night_shifts: usize,
    pub min_weekly_off_days: usize,
    /// New worker id → ids of every senior.
    pub junior_senior_pairs: BTreeMap<WorkerId, Vec<WorkerId>>,
    /// One profile per roster position.
    pub profiles: Vec<WorkerProfile>,
    /// Roster indices of pairing candidates, per roster position.
    /// Empty for workers that are not new.
    pub pairing_candidates: Vec<Vec<usize>>,
}

impl ConstraintSet {
    /// Number of workers per role.
    pub fn role_distribution(&self) -> HashMap<Role, usize> {
        let mut counts = HashMap::new();
        for p in &self.profiles {
            *counts.entry(p.role).or_insert(0) += 1;
        }
        counts
    }

    /// Number of workers per experience band.
    pub fn experience_distribution(&self) -> BTreeMap<ExperienceBand, usize> {
        let mut counts = BTreeMap::new();
        for p in &self.profiles {
            *counts.entry(p.band).or_insert(0) += 1;
        }
        counts
    }

    /// Roster indices of new workers.
    pub fn new_workers(&self) -> impl Iterator<Item = usize> + '_ {
        self.profiles
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_new)
            .map(|(i, _)| i)
    }
}
