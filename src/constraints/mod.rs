//! Constraint preprocessing.
//!
//! Normalizes a caller's optional overrides into a typed, read-only
//! [`ConstraintSet`] and annotates the roster with the role and experience
//! information the evaluator needs:
//!
//! - required staff per shift (defaults `{Day: 3, Evening: 2, Night: 1}`)
//! - consecutive-work, consecutive-night, and weekly-rest limits
//! - new-worker ↔ senior pairing candidates
//!
//! Preprocessing never fails; missing fields fall back to defaults.

mod types;

pub use types::{
    ConstraintConfig, ConstraintSet, ExperienceBand, RequiredStaff, RequiredStaffConfig,
    WorkerProfile,
};

use crate::models::{Worker, WorkerId};
use std::collections::BTreeMap;

/// Builds the [`ConstraintSet`] for a roster.
///
/// Every new worker (≤1 year or [`Role::NewNurse`](crate::models::Role::NewNurse))
/// receives the full list of senior ids (≥3 years, not new) as pairing
/// candidates. Whether a pairing actually holds is checked per shift at
/// evaluation time.
pub fn preprocess(config: &ConstraintConfig, workers: &[Worker]) -> ConstraintSet {
    let required_staff = match &config.required_staff {
        None => RequiredStaff::default(),
        Some(partial) => partial.resolve(),
    };

    let seniors: Vec<WorkerId> = workers
        .iter()
        .filter(|w| w.is_senior())
        .map(|w| w.id)
        .collect();
    let senior_indices: Vec<usize> = workers
        .iter()
        .enumerate()
        .filter(|(_, w)| w.is_senior())
        .map(|(i, _)| i)
        .collect();

    let mut junior_senior_pairs = BTreeMap::new();
    let mut profiles = Vec::with_capacity(workers.len());
    for w in workers {
        let is_new = w.is_new();
        if is_new {
            junior_senior_pairs.insert(w.id, seniors.clone());
        }
        profiles.push(WorkerProfile {
            id: w.id,
            role: w.role,
            is_new,
            is_senior: w.is_senior(),
            is_part_time: w.is_part_time(),
            years_experience: w.years_experience,
            band: ExperienceBand::from_years(w.years_experience),
        });
    }

    let pairing_candidates = profiles
        .iter()
        .map(|p| {
            if p.is_new {
                senior_indices.clone()
            } else {
                Vec::new()
            }
        })
        .collect();

    ConstraintSet {
        required_staff,
        max_consecutive_work_days: config.max_consecutive_work_days.unwrap_or(5),
        max_consecutive_night_shifts: config.max_consecutive_night_shifts.unwrap_or(3),
        min_weekly_off_days: config.min_weekly_off_days.unwrap_or(1),
        junior_senior_pairs,
        profiles,
        pairing_candidates,
    }
}
