//! Human-readable violation scan.
//!
//! Mirrors the legal, safety and role fitness terms but emits one record
//! per offending instance instead of a penalty. Meant for audit display of
//! a finished schedule.
//!
//! The advisory pattern group flags fatiguing sequences:
//!
//! | Pattern                        | Penalty | Severity                   |
//! |--------------------------------|--------:|----------------------------|
//! | Day followed by Night          | −30     | high                       |
//! | Night run longer than 3        | −30     | medium, high beyond 4      |
//! | Any work the day after a Night | −25     | medium                     |
//!
//! Each worker gets a pattern score of `max(0, 100 + Σ penalty)` and one
//! recommendation per pattern kind found.

use crate::constraints::ConstraintSet;
use crate::fitness::terms::{is_paired, weekly_off_counts};
use crate::models::{ScheduleGrid, ShiftKind, WorkerId};

/// Violation group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ViolationCategory {
    Legal,
    Safety,
    Role,
    Pattern,
}

/// How urgently a violation needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Fatiguing shift sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PatternKind {
    DayToNight,
    ExcessiveNights,
    NoRestAfterNight,
}

impl PatternKind {
    pub const ALL: [PatternKind; 3] = [
        PatternKind::DayToNight,
        PatternKind::ExcessiveNights,
        PatternKind::NoRestAfterNight,
    ];

    /// Deduction from the worker's pattern score.
    pub fn penalty(self) -> i32 {
        match self {
            PatternKind::DayToNight | PatternKind::ExcessiveNights => -30,
            PatternKind::NoRestAfterNight => -25,
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            PatternKind::DayToNight => {
                "leave at least one rest day between a day shift and a night shift"
            }
            PatternKind::ExcessiveNights => {
                "limit night runs to three and follow them with rest days"
            }
            PatternKind::NoRestAfterNight => "follow a night shift with a rest day",
        }
    }
}

/// Night runs longer than this are flagged.
const NIGHT_RUN_LIMIT: usize = 3;
/// Night runs longer than this are high severity.
const NIGHT_RUN_HIGH: usize = 4;
/// Pattern score of a worker with no findings.
const PATTERN_SCORE_MAX: i32 = 100;

/// A single violation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Violation {
    pub category: ViolationCategory,
    pub severity: Severity,
    /// Set for pattern findings only.
    pub pattern: Option<PatternKind>,
    /// Offending worker, absent for shift-level violations.
    pub worker_id: Option<WorkerId>,
    /// First day concerned.
    pub day: Option<usize>,
    pub shift: Option<ShiftKind>,
    pub message: String,
}

impl Violation {
    fn worker(
        category: ViolationCategory,
        worker_id: WorkerId,
        day: usize,
        shift: Option<ShiftKind>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            severity: Severity::High,
            pattern: None,
            worker_id: Some(worker_id),
            day: Some(day),
            shift,
            message: message.into(),
        }
    }

    fn pattern(
        kind: PatternKind,
        severity: Severity,
        worker_id: WorkerId,
        day: usize,
        shift: ShiftKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category: ViolationCategory::Pattern,
            severity,
            pattern: Some(kind),
            worker_id: Some(worker_id),
            day: Some(day),
            shift: Some(shift),
            message: message.into(),
        }
    }

    fn shift(day: usize, shift: ShiftKind, message: impl Into<String>) -> Self {
        Self {
            category: ViolationCategory::Safety,
            severity: Severity::High,
            pattern: None,
            worker_id: None,
            day: Some(day),
            shift: Some(shift),
            message: message.into(),
        }
    }
}

/// Pattern audit of one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkerPattern {
    pub worker_id: WorkerId,
    /// Sum of pattern penalties, 0 or negative.
    pub penalty: i32,
    /// `max(0, 100 + penalty)`.
    pub score: u32,
    /// One entry per pattern kind found, in [`PatternKind::ALL`] order.
    pub recommendations: Vec<String>,
}

impl WorkerPattern {
    fn new(worker_id: WorkerId, findings: &[Violation]) -> Self {
        let penalty: i32 = findings
            .iter()
            .filter_map(|v| v.pattern)
            .map(PatternKind::penalty)
            .sum();
        let recommendations = PatternKind::ALL
            .into_iter()
            .filter(|&k| findings.iter().any(|v| v.pattern == Some(k)))
            .map(|k| k.recommendation().to_string())
            .collect();
        Self {
            worker_id,
            penalty,
            score: (PATTERN_SCORE_MAX + penalty).max(0) as u32,
            recommendations,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.penalty == 0
    }
}

/// Violations grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViolationReport {
    pub legal: Vec<Violation>,
    pub safety: Vec<Violation>,
    pub role: Vec<Violation>,
    pub pattern: Vec<Violation>,
    /// Pattern audit per worker, in roster order.
    pub worker_patterns: Vec<WorkerPattern>,
}

impl ViolationReport {
    /// Legal, safety and role violations. Pattern findings are advisory
    /// and not counted.
    pub fn hard_count(&self) -> usize {
        self.legal.len() + self.safety.len() + self.role.len()
    }

    pub fn is_clean(&self) -> bool {
        self.hard_count() == 0
    }

    /// Every record, grouped in category order.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.legal
            .iter()
            .chain(&self.safety)
            .chain(&self.role)
            .chain(&self.pattern)
    }

    /// Mean of the per-worker pattern scores; 100 for an empty roster.
    pub fn pattern_score(&self) -> f64 {
        if self.worker_patterns.is_empty() {
            return f64::from(PATTERN_SCORE_MAX);
        }
        let sum: u32 = self.worker_patterns.iter().map(|p| p.score).sum();
        f64::from(sum) / self.worker_patterns.len() as f64
    }

    /// Distinct pattern recommendations across all workers.
    pub fn pattern_recommendations(&self) -> Vec<&str> {
        PatternKind::ALL
            .into_iter()
            .filter(|&k| self.pattern.iter().any(|v| v.pattern == Some(k)))
            .map(PatternKind::recommendation)
            .collect()
    }
}

/// `(length, start)` of the first longest run matching `pred`.
fn longest_span(grid: &ScheduleGrid, w: usize, pred: impl Fn(ShiftKind) -> bool) -> (usize, usize) {
    let mut best = (0, 0);
    let mut run = 0;
    for (day, kind) in grid.worker_column(w).enumerate() {
        if pred(kind) {
            run += 1;
            if run > best.0 {
                best = (run, day + 1 - run);
            }
        } else {
            run = 0;
        }
    }
    best
}

/// Appends the pattern findings of worker `w`.
fn scan_patterns(grid: &ScheduleGrid, w: usize, worker_id: WorkerId, out: &mut Vec<Violation>) {
    for day in 1..grid.days() {
        let prev = grid.get(day - 1, w);
        let cur = grid.get(day, w);
        if prev == ShiftKind::Day && cur == ShiftKind::Night {
            out.push(Violation::pattern(
                PatternKind::DayToNight,
                Severity::High,
                worker_id,
                day,
                cur,
                "night shift directly after a day shift",
            ));
        }
        if prev == ShiftKind::Night && cur.is_working() {
            out.push(Violation::pattern(
                PatternKind::NoRestAfterNight,
                Severity::Medium,
                worker_id,
                day,
                cur,
                format!("{cur} shift directly after a night shift"),
            ));
        }
    }

    let mut run = 0;
    for day in 0..=grid.days() {
        let night = day < grid.days() && grid.get(day, w) == ShiftKind::Night;
        if night {
            run += 1;
            continue;
        }
        if run > NIGHT_RUN_LIMIT {
            let severity = if run > NIGHT_RUN_HIGH {
                Severity::High
            } else {
                Severity::Medium
            };
            out.push(Violation::pattern(
                PatternKind::ExcessiveNights,
                severity,
                worker_id,
                day - run,
                ShiftKind::Night,
                format!("{run} night shifts in a row"),
            ));
        }
        run = 0;
    }
}

/// Scans `grid` for violations.
pub fn scan(grid: &ScheduleGrid, constraints: &ConstraintSet) -> ViolationReport {
    let mut report = ViolationReport::default();
    let id = |w: usize| constraints.profiles[w].id;

    for w in 0..grid.workers() {
        let (work, start) = longest_span(grid, w, ShiftKind::is_working);
        if work > constraints.max_consecutive_work_days {
            report.legal.push(Violation::worker(
                ViolationCategory::Legal,
                id(w),
                start,
                None,
                format!(
                    "{work} consecutive work days (max {})",
                    constraints.max_consecutive_work_days
                ),
            ));
        }

        let (nights, start) = longest_span(grid, w, |k| k == ShiftKind::Night);
        if nights > constraints.max_consecutive_night_shifts {
            report.legal.push(Violation::worker(
                ViolationCategory::Legal,
                id(w),
                start,
                Some(ShiftKind::Night),
                format!(
                    "{nights} consecutive night shifts (max {})",
                    constraints.max_consecutive_night_shifts
                ),
            ));
        }

        for (block, offs) in weekly_off_counts(grid, w).into_iter().enumerate() {
            if offs < constraints.min_weekly_off_days {
                report.legal.push(Violation::worker(
                    ViolationCategory::Legal,
                    id(w),
                    block * 7,
                    Some(ShiftKind::Off),
                    format!(
                        "{offs} off days in week {} (min {})",
                        block + 1,
                        constraints.min_weekly_off_days
                    ),
                ));
            }
        }
    }

    for day in 0..grid.days() {
        for kind in ShiftKind::WORKING {
            let required = constraints.required_staff.get(kind);
            let count = grid.count_on_day(day, kind);
            if count < required {
                report.safety.push(Violation::shift(
                    day,
                    kind,
                    format!("{kind} shift on day {day}: {count} of {required} staffed"),
                ));
            }
        }
    }

    for day in 0..grid.days() {
        for w in constraints.new_workers() {
            let kind = grid.get(day, w);
            if kind.is_working() && !is_paired(grid, constraints, day, w) {
                report.role.push(Violation::worker(
                    ViolationCategory::Role,
                    id(w),
                    day,
                    Some(kind),
                    format!("new worker on {kind} shift without a senior"),
                ));
            }
        }
        for (w, profile) in constraints.profiles.iter().enumerate() {
            if profile.is_part_time && grid.get(day, w) == ShiftKind::Night {
                report.role.push(Violation::worker(
                    ViolationCategory::Role,
                    profile.id,
                    day,
                    Some(ShiftKind::Night),
                    "part-time worker on night shift",
                ));
            }
        }
    }

    for w in 0..grid.workers() {
        let start = report.pattern.len();
        scan_patterns(grid, w, id(w), &mut report.pattern);
        report
            .worker_patterns
            .push(WorkerPattern::new(id(w), &report.pattern[start..]));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{preprocess, ConstraintConfig};
    use crate::models::{EmploymentType, Role, Worker};
    use ShiftKind::*;

    fn workers() -> Vec<Worker> {
        vec![
            Worker::new(10, 7).with_role(Role::HeadNurse),
            Worker::new(11, 1).with_role(Role::NewNurse),
            Worker::new(12, 4).with_employment(EmploymentType::PartTime),
        ]
    }

    fn grid(cols: [[ShiftKind; 8]; 3]) -> ScheduleGrid {
        let rows = (0..8).map(|d| cols.iter().map(|c| c[d]).collect()).collect();
        ScheduleGrid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_scan_groups() {
        let ws = workers();
        let c = preprocess(
            &ConstraintConfig::default().with_required_staff(1, 1, 1),
            &ws,
        );
        let g = grid([
            [Night, Night, Night, Night, Day, Day, Off, Off],
            [Off, Evening, Off, Off, Off, Day, Off, Off],
            [Day, Off, Off, Off, Off, Night, Off, Off],
        ]);
        let report = scan(&g, &c);

        // Head nurse: 6 straight work days and 4 straight nights.
        assert_eq!(report.legal.len(), 2);
        assert_eq!(report.legal[0].worker_id, Some(10));
        assert_eq!(report.legal[0].day, Some(0));
        assert_eq!(report.legal[1].shift, Some(Night));

        // Evening is short on every day but day 1; Day short on day 1,2,3,6,7;
        // Night short on days 4,6,7.
        assert_eq!(report.safety.len(), 7 + 5 + 3);
        assert!(report.safety.iter().all(|v| v.worker_id.is_none()));

        // New worker alone on day 1; part-time night on day 5.
        assert_eq!(report.role.len(), 2);
        assert_eq!(report.role[0].day, Some(1));
        assert_eq!(report.role[1].worker_id, Some(12));

        // Head nurse works the day after each of four nights, and the run
        // of four nights is one too long.
        assert_eq!(report.pattern.len(), 5);
        assert!(report.pattern[..4]
            .iter()
            .all(|v| v.pattern == Some(PatternKind::NoRestAfterNight)));
        assert_eq!(report.pattern[3].shift, Some(Day));
        assert_eq!(report.pattern[4].pattern, Some(PatternKind::ExcessiveNights));
        assert_eq!(report.pattern[4].severity, Severity::Medium);
        assert_eq!(report.hard_count(), 2 + 15 + 2);
        assert_eq!(report.iter().count(), report.hard_count() + 5);

        let scores: Vec<u32> = report.worker_patterns.iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![0, 100, 100]);
        assert_eq!(report.worker_patterns[0].penalty, -130);
        assert_eq!(report.worker_patterns[0].recommendations.len(), 2);
        assert!(report.worker_patterns[1].is_clean());
    }

    #[test]
    fn test_pattern_findings() {
        let ws = workers();
        let c = preprocess(&ConstraintConfig::default(), &ws);
        let g = grid([
            [Day, Night, Off, Off, Day, Off, Off, Off],
            [Night, Night, Night, Night, Night, Off, Off, Off],
            [Evening, Day, Evening, Off, Off, Day, Off, Off],
        ]);
        let report = scan(&g, &c);

        let head = &report.worker_patterns[0];
        assert_eq!(head.penalty, PatternKind::DayToNight.penalty());
        assert_eq!(head.score, 70);
        assert_eq!(
            head.recommendations,
            vec![PatternKind::DayToNight.recommendation().to_string()]
        );
        let day_to_night = &report.pattern[0];
        assert_eq!(day_to_night.severity, Severity::High);
        assert_eq!(day_to_night.day, Some(1));
        assert_eq!(day_to_night.worker_id, Some(10));

        // Five nights: four night-to-work transitions and one long run.
        let new = &report.worker_patterns[1];
        assert_eq!(new.penalty, 4 * -25 - 30);
        assert_eq!(new.score, 0);
        let run = report
            .pattern
            .iter()
            .find(|v| v.pattern == Some(PatternKind::ExcessiveNights))
            .unwrap();
        assert_eq!(run.severity, Severity::High);
        assert_eq!(run.day, Some(0));

        assert!(report.worker_patterns[2].is_clean());
        assert_eq!(report.worker_patterns[2].score, 100);
        assert!((report.pattern_score() - (70.0 + 0.0 + 100.0) / 3.0).abs() < 1e-12);
        assert_eq!(report.pattern_recommendations().len(), 3);
    }

    #[test]
    fn test_empty_roster_pattern_score() {
        let c = preprocess(&ConstraintConfig::default(), &[]);
        let report = scan(&ScheduleGrid::new(7, 0), &c);
        assert!(report.worker_patterns.is_empty());
        assert_eq!(report.pattern_score(), 100.0);
        assert!(report.pattern_recommendations().is_empty());
    }

    #[test]
    fn test_paired_new_worker_is_clean() {
        let ws = workers();
        let c = preprocess(
            &ConstraintConfig::default().with_required_staff(2, 0, 0),
            &ws,
        );
        let g = grid([
            [Day, Day, Off, Day, Day, Off, Day, Off],
            [Day, Day, Off, Day, Day, Off, Day, Off],
            [Off; 8],
        ]);
        let report = scan(&g, &c);
        assert!(report.role.is_empty());
        assert!(report.legal.is_empty());
        assert_eq!(report.safety.len(), 3);
        assert!(!report.is_clean());
    }
}
