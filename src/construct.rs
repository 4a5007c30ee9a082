//! Greedy initial construction.
//!
//! Builds the starting grid day by day without backtracking. Each day:
//!
//! 1. every worker starts Off
//! 2. leave requests for the day remove the worker from the pool
//! 3. for Day, Evening, Night in that order, the remaining pool is walked
//!    in roster order and eligible workers are assigned until the shift's
//!    requirement is met
//!
//! A worker is eligible for a shift unless one of these holds:
//!
//! - the shift is Night and the worker is part-time
//! - the shift is worked and the worker's previous four days were all worked
//! - the shift is Day and the worker's previous day was Night
//!
//! Days that cannot be fully staffed are left short; the evaluator
//! penalizes the shortfall later.

use crate::constraints::ConstraintSet;
use crate::models::{ResolvedRequests, ScheduleGrid, ShiftKind};

/// Prior worked days that block a fifth consecutive one.
const WORK_STREAK_LIMIT: usize = 4;

/// Builds the initial grid.
pub fn construct(
    constraints: &ConstraintSet,
    requests: &ResolvedRequests,
    days: usize,
) -> ScheduleGrid {
    let workers = constraints.profiles.len();
    let mut grid = ScheduleGrid::new(days, workers);
    let mut available = vec![true; workers];

    for day in 0..days {
        available.fill(true);
        for leave in requests.leave_on(day) {
            available[leave.worker] = false;
        }

        for kind in ShiftKind::WORKING {
            let required = constraints.required_staff.get(kind);
            let mut assigned = 0;
            for w in 0..workers {
                if assigned >= required {
                    break;
                }
                if available[w] && is_eligible(&grid, constraints, day, w, kind) {
                    grid.set(day, w, kind);
                    available[w] = false;
                    assigned += 1;
                }
            }
            if assigned < required {
                tracing::debug!(day, shift = %kind, assigned, required, "construction left shift short");
            }
        }
    }
    grid
}

fn is_eligible(
    grid: &ScheduleGrid,
    constraints: &ConstraintSet,
    day: usize,
    w: usize,
    kind: ShiftKind,
) -> bool {
    if kind == ShiftKind::Night && constraints.profiles[w].is_part_time {
        return false;
    }
    if day >= WORK_STREAK_LIMIT
        && (day - WORK_STREAK_LIMIT..day).all(|d| grid.get(d, w).is_working())
    {
        return false;
    }
    !(kind == ShiftKind::Day && day > 0 && grid.get(day - 1, w) == ShiftKind::Night)
}
