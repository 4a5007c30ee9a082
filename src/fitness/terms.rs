//! The seven raw fitness terms.
//!
//! Each term is an independent pure function of the grid and the
//! preprocessed inputs. Terms return raw values; weighting happens in
//! [`Evaluator`](super::Evaluator).

use crate::config::ConstraintWeights;
use crate::constraints::ConstraintSet;
use crate::models::{RequestKind, ResolvedRequests, ScheduleGrid, ShiftKind};

/// Longest run of consecutive days in `column` matching `pred`.
pub(crate) fn longest_run<I, F>(column: I, pred: F) -> usize
where
    I: IntoIterator<Item = ShiftKind>,
    F: Fn(ShiftKind) -> bool,
{
    let mut best = 0;
    let mut run = 0;
    for kind in column {
        if pred(kind) {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }
    best
}

/// Off-day counts per 7-day block starting at day 0. The last block may be
/// shorter than seven days.
pub(crate) fn weekly_off_counts(grid: &ScheduleGrid, worker: usize) -> Vec<usize> {
    (0..grid.days())
        .step_by(7)
        .map(|start| {
            (start..(start + 7).min(grid.days()))
                .filter(|&d| grid.get(d, worker) == ShiftKind::Off)
                .count()
        })
        .collect()
}

/// Consecutive-work, consecutive-night and weekly-rest penalties.
///
/// Per worker: `−100 × excess` over the work-day limit, `−150 × excess`
/// over the night limit, and `−200` per week block short of the required
/// off days.
pub fn legal_compliance(grid: &ScheduleGrid, constraints: &ConstraintSet) -> f64 {
    let mut score = 0.0;
    for w in 0..grid.workers() {
        let work_run = longest_run(grid.worker_column(w), ShiftKind::is_working);
        if work_run > constraints.max_consecutive_work_days {
            score -= 100.0 * (work_run - constraints.max_consecutive_work_days) as f64;
        }

        let night_run = longest_run(grid.worker_column(w), |k| k == ShiftKind::Night);
        if night_run > constraints.max_consecutive_night_shifts {
            score -= 150.0 * (night_run - constraints.max_consecutive_night_shifts) as f64;
        }

        let short_weeks = weekly_off_counts(grid, w)
            .into_iter()
            .filter(|&offs| offs < constraints.min_weekly_off_days)
            .count();
        score -= 200.0 * short_weeks as f64;
    }
    score
}

/// `−100 × shortage` per understaffed (day, shift), `+10` when met.
pub fn staffing_safety(grid: &ScheduleGrid, constraints: &ConstraintSet) -> f64 {
    let mut score = 0.0;
    for day in 0..grid.days() {
        for kind in ShiftKind::WORKING {
            let required = constraints.required_staff.get(kind);
            let count = grid.count_on_day(day, kind);
            if count < required {
                score -= 100.0 * (required - count) as f64;
            } else {
                score += 10.0;
            }
        }
    }
    score
}

/// Whether new worker `w` shares its shift on `day` with a senior.
pub(crate) fn is_paired(
    grid: &ScheduleGrid,
    constraints: &ConstraintSet,
    day: usize,
    w: usize,
) -> bool {
    let kind = grid.get(day, w);
    constraints.pairing_candidates[w]
        .iter()
        .any(|&c| c != w && grid.get(day, c) == kind)
}

/// New-worker pairing (`+10` paired, `−50` alone) and `−25` per part-time
/// night.
pub fn role_compliance(grid: &ScheduleGrid, constraints: &ConstraintSet) -> f64 {
    let mut score = 0.0;
    for day in 0..grid.days() {
        for w in constraints.new_workers() {
            if !grid.get(day, w).is_working() {
                continue;
            }
            if is_paired(grid, constraints, day, w) {
                score += 10.0;
            } else {
                score -= 50.0;
            }
        }
    }

    for (w, profile) in constraints.profiles.iter().enumerate() {
        if profile.is_part_time {
            let nights = grid.worker_counts(w)[ShiftKind::Night.index()];
            score -= 25.0 * nights as f64;
        }
    }
    score
}

/// Day-to-day transition scores.
pub fn pattern_quality(grid: &ScheduleGrid) -> f64 {
    let mut score = 0.0;
    for w in 0..grid.workers() {
        for day in 1..grid.days() {
            let prev = grid.get(day - 1, w);
            let cur = grid.get(day, w);
            score += match (prev, cur) {
                (ShiftKind::Night, ShiftKind::Day) => -50.0,
                (ShiftKind::Night, ShiftKind::Evening) => -20.0,
                (ShiftKind::Night, ShiftKind::Off) => 10.0,
                _ => 0.0,
            };
            if prev == cur && cur.is_working() {
                score += 5.0;
            }
        }
    }
    score
}

/// Prefer and avoid requests. Leave requests score nothing here.
pub fn preference(
    grid: &ScheduleGrid,
    requests: &ResolvedRequests,
    weights: &ConstraintWeights,
) -> f64 {
    let mut score = 0.0;
    for r in &requests.requests {
        let assigned = grid.get(r.day, r.worker);
        match r.kind {
            RequestKind::Prefer if assigned == r.shift => score += weights.preference_bonus,
            RequestKind::Prefer => score -= weights.preference_penalty,
            RequestKind::Avoid if assigned != r.shift => score += weights.preference_bonus * 0.8,
            RequestKind::Avoid => score -= weights.preference_penalty * 1.5,
            RequestKind::Leave => {}
        }
    }
    score
}

/// Satisfied and total counts of scored requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreferenceStats {
    pub prefer_satisfied: usize,
    pub prefer_total: usize,
    pub avoid_satisfied: usize,
    pub avoid_total: usize,
}

impl PreferenceStats {
    pub fn satisfied(&self) -> usize {
        self.prefer_satisfied + self.avoid_satisfied
    }

    pub fn total(&self) -> usize {
        self.prefer_total + self.avoid_total
    }

    /// Satisfied share in `[0, 1]`; 1 when nothing was requested.
    pub fn rate(&self) -> f64 {
        match self.total() {
            0 => 1.0,
            n => self.satisfied() as f64 / n as f64,
        }
    }
}

/// Counts how many prefer and avoid requests `grid` honors. Leave requests
/// are not counted.
pub fn preference_stats(grid: &ScheduleGrid, requests: &ResolvedRequests) -> PreferenceStats {
    let mut stats = PreferenceStats::default();
    for r in &requests.requests {
        let assigned = grid.get(r.day, r.worker);
        match r.kind {
            RequestKind::Prefer => {
                stats.prefer_total += 1;
                if assigned == r.shift {
                    stats.prefer_satisfied += 1;
                }
            }
            RequestKind::Avoid => {
                stats.avoid_total += 1;
                if assigned != r.shift {
                    stats.avoid_satisfied += 1;
                }
            }
            RequestKind::Leave => {}
        }
    }
    stats
}

/// Population variance. 0 for an empty slice.
pub(crate) fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}

/// Spread of nights, work days and off days across workers.
pub fn fairness(grid: &ScheduleGrid) -> f64 {
    if grid.workers() == 0 {
        return 0.0;
    }
    let mut nights = Vec::with_capacity(grid.workers());
    let mut work = Vec::with_capacity(grid.workers());
    let mut off = Vec::with_capacity(grid.workers());
    for w in 0..grid.workers() {
        let counts = grid.worker_counts(w);
        let off_days = counts[ShiftKind::Off.index()];
        nights.push(counts[ShiftKind::Night.index()] as f64);
        work.push((grid.days() - off_days) as f64);
        off.push(off_days as f64);
    }
    -10.0 * variance(&nights) - 5.0 * variance(&work) - 3.0 * variance(&off)
}

/// `+10 + 2 × surplus` per (day, shift) that meets its requirement.
pub fn coverage(grid: &ScheduleGrid, constraints: &ConstraintSet) -> f64 {
    let mut score = 0.0;
    for day in 0..grid.days() {
        for kind in ShiftKind::WORKING {
            let required = constraints.required_staff.get(kind);
            let count = grid.count_on_day(day, kind);
            if count >= required {
                score += 10.0 + 2.0 * (count - required) as f64;
            }
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{preprocess, ConstraintConfig};
    use crate::models::{Role, ShiftRequest, Worker};
    use ShiftKind::*;

    fn columns(cols: Vec<Vec<ShiftKind>>) -> ScheduleGrid {
        let days = cols[0].len();
        let rows = (0..days)
            .map(|d| cols.iter().map(|c| c[d]).collect())
            .collect();
        ScheduleGrid::from_rows(rows).unwrap()
    }

    fn constraints(workers: &[Worker]) -> ConstraintSet {
        preprocess(&ConstraintConfig::default(), workers)
    }

    #[test]
    fn test_longest_run() {
        let col = [Day, Day, Off, Night, Night, Night, Evening];
        assert_eq!(longest_run(col, ShiftKind::is_working), 4);
        assert_eq!(longest_run(col, |k| k == Night), 3);
        assert_eq!(longest_run(Vec::new(), ShiftKind::is_working), 0);
    }

    #[test]
    fn test_legal_runs() {
        let workers = vec![Worker::new(1, 5)];
        let c = constraints(&workers);
        // 7 days worked straight, 4 nights in a row, no off day in the week.
        let grid = columns(vec![vec![Day, Day, Day, Night, Night, Night, Night]]);
        // -100*2 - 150*1 - 200
        assert_eq!(legal_compliance(&grid, &c), -550.0);
    }

    #[test]
    fn test_legal_weeks_are_blocks_from_day_zero() {
        let workers = vec![Worker::new(1, 5)];
        let c = constraints(&workers);
        let mut col = vec![Off; 9];
        for d in [1, 2, 3, 5, 6, 7, 8] {
            col[d] = Day;
        }
        // Block [0,7) has offs at 0 and 4; block [7,9) has none.
        let grid = columns(vec![col]);
        assert_eq!(weekly_off_counts(&grid, 0), vec![2, 0]);
        assert_eq!(legal_compliance(&grid, &c), -200.0);
    }

    #[test]
    fn test_staffing_and_coverage() {
        let workers: Vec<Worker> = (0..4).map(|i| Worker::new(i, 5)).collect();
        let c = preprocess(
            &ConstraintConfig::default().with_required_staff(2, 1, 1),
            &workers,
        );
        // Day 2/2, Evening 0/1, Night 2/1.
        let grid = ScheduleGrid::from_rows(vec![vec![Day, Day, Night, Night]]).unwrap();
        assert_eq!(staffing_safety(&grid, &c), 10.0 - 100.0 + 10.0);
        assert_eq!(coverage(&grid, &c), 10.0 + 12.0);
    }

    #[test]
    fn test_role_pairing() {
        let workers = vec![
            Worker::new(1, 7).with_role(Role::HeadNurse),
            Worker::new(2, 0).with_role(Role::NewNurse),
            Worker::new(3, 2),
        ];
        let c = constraints(&workers);
        // Day 0: new worker with the senior. Day 1: with a 2-year worker only.
        let grid = ScheduleGrid::from_rows(vec![vec![Day, Day, Night], vec![Off, Evening, Evening]])
            .unwrap();
        assert_eq!(role_compliance(&grid, &c), 10.0 - 50.0);
    }

    #[test]
    fn test_part_time_nights() {
        let workers = vec![Worker::new(1, 5).with_employment(crate::models::EmploymentType::PartTime)];
        let c = constraints(&workers);
        let grid = columns(vec![vec![Night, Off, Night]]);
        assert_eq!(role_compliance(&grid, &c), -50.0);
    }

    #[test]
    fn test_patterns() {
        let grid = columns(vec![vec![Night, Day, Day, Night, Evening, Night, Off]]);
        // N->D -50, D->D +5, D->N 0, N->E -20, E->N 0, N->Off +10
        assert_eq!(pattern_quality(&grid), -55.0);
        let grid = columns(vec![vec![Night, Night]]);
        assert_eq!(pattern_quality(&grid), 5.0);
    }

    #[test]
    fn test_preferences() {
        let workers = vec![Worker::new(1, 5), Worker::new(2, 5)];
        let grid = ScheduleGrid::from_rows(vec![vec![Day, Night]]).unwrap();
        let requests = ResolvedRequests::resolve(
            &[
                ShiftRequest::new(1, 0, Day, RequestKind::Prefer),
                ShiftRequest::new(2, 0, Day, RequestKind::Prefer),
                ShiftRequest::new(1, 0, Night, RequestKind::Avoid),
                ShiftRequest::new(2, 0, Night, RequestKind::Avoid),
                ShiftRequest::new(2, 0, Off, RequestKind::Leave),
            ],
            &workers,
            1,
        );
        let w = ConstraintWeights::default();
        assert_eq!(preference(&grid, &requests, &w), 20.0 - 10.0 + 16.0 - 15.0);

        let stats = preference_stats(&grid, &requests);
        assert_eq!((stats.prefer_satisfied, stats.prefer_total), (1, 2));
        assert_eq!((stats.avoid_satisfied, stats.avoid_total), (1, 2));
        assert_eq!(stats.rate(), 0.5);
    }

    #[test]
    fn test_fairness() {
        let even = columns(vec![vec![Night, Off], vec![Night, Off]]);
        assert_eq!(fairness(&even), 0.0);
        // nights [2, 0]: var 1; work [2, 0]: var 1; off [0, 2]: var 1
        let skewed = columns(vec![vec![Night, Night], vec![Off, Off]]);
        assert_eq!(fairness(&skewed), -18.0);
        assert_eq!(fairness(&ScheduleGrid::new(5, 0)), 0.0);
    }

    #[test]
    fn test_variance_is_population() {
        assert_eq!(variance(&[1.0, 3.0]), 1.0);
        assert_eq!(variance(&[]), 0.0);
    }
}
