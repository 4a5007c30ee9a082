//! Roster feasibility pre-check.
//!
//! Inspects the roster, constraint set, and resolved requests before any
//! search runs and reports problems that make a good schedule unlikely.
//! Findings never stop the run: the orchestrator attaches the report to
//! its result and leaves the decision to the caller.
//!
//! Detects:
//! - a roster smaller than the per-day head count (error)
//! - a roster exactly equal to it (warning)
//! - a missing head nurse, or more than one
//! - new workers above 30% of the roster
//! - workers with six or more years below 30% of the roster
//! - too few full-time workers to cover nights
//! - workers on leave for more than 30% of the horizon
//! - total leave above 20% of all worker-days

use crate::constraints::ConstraintSet;
use crate::models::{RequestKind, ResolvedRequests, Role, Worker, WorkerId};
use std::collections::BTreeMap;

/// Share of the roster above which new workers are flagged.
const NEW_WORKER_RATIO: f64 = 0.3;
/// Share of the roster below which experienced workers are flagged.
const EXPERIENCED_RATIO: f64 = 0.3;
/// Years of experience counted as experienced.
const EXPERIENCED_YEARS: u32 = 6;
/// Share of the horizon one worker may spend on leave.
const WORKER_LEAVE_RATIO: f64 = 0.3;
/// Share of all worker-days that may be leave.
const TOTAL_LEAVE_RATIO: f64 = 0.2;
/// Roster size below which more hiring is recommended.
const RECOMMENDED_ROSTER: usize = 8;

/// What a finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FindingKind {
    /// Head count against required staff.
    MinimumStaff,
    /// Role mix.
    RoleDistribution,
    /// Experience mix.
    ExperienceDistribution,
    /// Part-time workers against night coverage.
    NightCoverage,
    /// Leave volume.
    LeaveRequests,
}

/// One pre-check finding.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Finding {
    pub kind: FindingKind,
    pub message: String,
}

impl Finding {
    fn new(kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Roster statistics gathered during the pre-check.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaffAnalysis {
    pub roster_size: usize,
    pub required_per_day: usize,
    pub full_time: usize,
    pub part_time: usize,
    pub new_workers: usize,
    pub new_worker_ratio: f64,
    pub experienced_workers: usize,
    pub head_nurses: usize,
    pub leave_days: usize,
    pub leave_ratio: f64,
}

/// Result of [`precheck`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrecheckReport {
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub recommendations: Vec<String>,
    pub analysis: StaffAnalysis,
}

impl PrecheckReport {
    /// True when no error-level finding was raised.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, kind: FindingKind, message: String) {
        tracing::warn!(event = "precheck_error", ?kind, %message);
        self.errors.push(Finding::new(kind, message));
    }

    fn warning(&mut self, kind: FindingKind, message: String) {
        tracing::warn!(event = "precheck_warning", ?kind, %message);
        self.warnings.push(Finding::new(kind, message));
    }
}

/// Checks a roster against its constraints and requests.
pub fn precheck(
    workers: &[Worker],
    constraints: &ConstraintSet,
    requests: &ResolvedRequests,
    days: usize,
) -> PrecheckReport {
    let mut report = PrecheckReport::default();
    let size = workers.len();
    let required = constraints.required_staff.total();
    let night_required = constraints.required_staff.night;

    let part_time = workers.iter().filter(|w| w.is_part_time()).count();
    let full_time = size - part_time;
    let new_workers = workers.iter().filter(|w| w.is_new()).count();
    let experienced = workers
        .iter()
        .filter(|w| w.years_experience >= EXPERIENCED_YEARS)
        .count();
    let head_nurses = workers.iter().filter(|w| w.role == Role::HeadNurse).count();

    if size < required {
        report.error(
            FindingKind::MinimumStaff,
            format!("roster of {size} is below the {required} workers required per day"),
        );
    } else if size == required {
        report.warning(
            FindingKind::MinimumStaff,
            format!("roster of {size} exactly matches the per-day requirement; any leave causes shortfalls"),
        );
    }

    match head_nurses {
        0 => report.warning(
            FindingKind::RoleDistribution,
            "no head nurse on the roster".to_string(),
        ),
        1 => {}
        n => report.warning(
            FindingKind::RoleDistribution,
            format!("{n} head nurses on the roster; one is typical"),
        ),
    }

    let ratio = |n: usize| if size == 0 { 0.0 } else { n as f64 / size as f64 };
    let new_ratio = ratio(new_workers);
    if new_ratio > NEW_WORKER_RATIO {
        report.warning(
            FindingKind::RoleDistribution,
            format!(
                "new workers are {:.1}% of the roster; pairing with seniors may fail",
                new_ratio * 100.0
            ),
        );
    }

    if size > 0 && ratio(experienced) < EXPERIENCED_RATIO {
        report.warning(
            FindingKind::ExperienceDistribution,
            format!(
                "workers with {EXPERIENCED_YEARS}+ years are only {:.1}% of the roster",
                ratio(experienced) * 100.0
            ),
        );
    }

    if part_time > 0 && full_time < night_required {
        report.warning(
            FindingKind::NightCoverage,
            format!(
                "{full_time} full-time workers cannot cover the {night_required} required night slots"
            ),
        );
    }

    let mut leave_per_worker: BTreeMap<usize, usize> = BTreeMap::new();
    for r in requests
        .requests
        .iter()
        .filter(|r| r.kind == RequestKind::Leave)
    {
        *leave_per_worker.entry(r.worker).or_insert(0) += 1;
    }
    let heavy: Vec<(WorkerId, usize)> = leave_per_worker
        .iter()
        .filter(|&(_, &n)| n as f64 > days as f64 * WORKER_LEAVE_RATIO)
        .map(|(&w, &n)| (workers[w].id, n))
        .collect();
    if !heavy.is_empty() {
        let list: Vec<String> = heavy
            .iter()
            .map(|(id, n)| format!("{id} ({n} days)"))
            .collect();
        report.warning(
            FindingKind::LeaveRequests,
            format!("heavy leave requested by: {}", list.join(", ")),
        );
    }

    let leave_days: usize = leave_per_worker.values().sum();
    let worker_days = size * days;
    let leave_ratio = if worker_days == 0 {
        0.0
    } else {
        leave_days as f64 / worker_days as f64
    };
    if leave_ratio > TOTAL_LEAVE_RATIO {
        report.warning(
            FindingKind::LeaveRequests,
            format!(
                "{:.1}% of all worker-days are on leave",
                leave_ratio * 100.0
            ),
        );
    }

    if size < RECOMMENDED_ROSTER {
        report.recommendations.push(format!(
            "a roster of at least {RECOMMENDED_ROSTER} keeps the schedule stable (currently {size})"
        ));
    }
    if new_ratio > NEW_WORKER_RATIO {
        report
            .recommendations
            .push("set up mentoring for the large share of new workers".to_string());
    }

    report.analysis = StaffAnalysis {
        roster_size: size,
        required_per_day: required,
        full_time,
        part_time,
        new_workers,
        new_worker_ratio: new_ratio,
        experienced_workers: experienced,
        head_nurses,
        leave_days,
        leave_ratio,
    };
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{preprocess, ConstraintConfig};
    use crate::models::{EmploymentType, ShiftKind, ShiftRequest};

    fn set(workers: &[Worker], day: usize, evening: usize, night: usize) -> ConstraintSet {
        preprocess(
            &ConstraintConfig::default().with_required_staff(day, evening, night),
            workers,
        )
    }

    fn balanced(n: usize) -> Vec<Worker> {
        let mut workers: Vec<Worker> = (0..n as u64).map(|i| Worker::new(i, 8)).collect();
        workers[0].role = Role::HeadNurse;
        workers
    }

    #[test]
    fn test_clean_roster() {
        let workers = balanced(10);
        let report = precheck(&workers, &set(&workers, 3, 2, 1), &ResolvedRequests::default(), 28);
        assert!(report.is_valid());
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert!(report.recommendations.is_empty());
        assert_eq!(report.analysis.roster_size, 10);
        assert_eq!(report.analysis.required_per_day, 6);
    }

    #[test]
    fn test_undersized_roster_is_error() {
        let workers = balanced(5);
        let report = precheck(&workers, &set(&workers, 3, 2, 1), &ResolvedRequests::default(), 28);
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].kind, FindingKind::MinimumStaff);
    }

    #[test]
    fn test_exact_roster_is_warning() {
        let workers = balanced(6);
        let report = precheck(&workers, &set(&workers, 3, 2, 1), &ResolvedRequests::default(), 28);
        assert!(report.is_valid());
        assert!(report
            .warnings
            .iter()
            .any(|f| f.kind == FindingKind::MinimumStaff));
    }

    #[test]
    fn test_role_and_experience_mix() {
        let workers: Vec<Worker> = (0..10).map(|i| Worker::new(i, 1)).collect();
        let report = precheck(&workers, &set(&workers, 3, 2, 1), &ResolvedRequests::default(), 28);
        let kinds: Vec<FindingKind> = report.warnings.iter().map(|f| f.kind).collect();
        // No head nurse, too many new workers.
        assert_eq!(
            kinds
                .iter()
                .filter(|&&k| k == FindingKind::RoleDistribution)
                .count(),
            2
        );
        assert!(kinds.contains(&FindingKind::ExperienceDistribution));
        assert_eq!(report.recommendations.len(), 1);
    }

    #[test]
    fn test_part_time_night_coverage() {
        let mut workers = balanced(8);
        for w in workers.iter_mut().skip(1) {
            w.employment_type = EmploymentType::PartTime;
        }
        let report = precheck(&workers, &set(&workers, 2, 2, 2), &ResolvedRequests::default(), 28);
        assert!(report
            .warnings
            .iter()
            .any(|f| f.kind == FindingKind::NightCoverage));
    }

    #[test]
    fn test_heavy_leave() {
        let workers = balanced(10);
        let requests: Vec<ShiftRequest> = (0..5)
            .map(|d| ShiftRequest::new(3, d, ShiftKind::Off, RequestKind::Leave))
            .collect();
        let resolved = ResolvedRequests::resolve(&requests, &workers, 10);
        let report = precheck(&workers, &set(&workers, 3, 2, 1), &resolved, 10);
        let leave: Vec<&Finding> = report
            .warnings
            .iter()
            .filter(|f| f.kind == FindingKind::LeaveRequests)
            .collect();
        assert_eq!(leave.len(), 1);
        assert!(leave[0].message.contains("3 (5 days)"));
        assert_eq!(report.analysis.leave_days, 5);
    }
}
