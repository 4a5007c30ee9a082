//! Move values and their application to a grid.

use crate::models::{ScheduleGrid, ShiftKind};
use std::fmt;

/// The four neighborhood families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MoveFamily {
    SingleSwap,
    ShiftRotation,
    BlockMove,
    EmployeeSwap,
}

impl MoveFamily {
    /// All families, in the fixed order local search tries them.
    pub const ALL: [MoveFamily; 4] = [
        MoveFamily::SingleSwap,
        MoveFamily::ShiftRotation,
        MoveFamily::BlockMove,
        MoveFamily::EmployeeSwap,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MoveFamily::SingleSwap => "single_swap",
            MoveFamily::ShiftRotation => "shift_rotation",
            MoveFamily::BlockMove => "block_move",
            MoveFamily::EmployeeSwap => "employee_swap",
        }
    }
}

impl fmt::Display for MoveFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single mutation of a [`ScheduleGrid`].
///
/// Moves are plain values: equal moves describe the same mutation, which
/// is what the tabu list keys on. Applying a move never changes the grid's
/// dimensions, and every index a generator produces is in bounds for the
/// grid it was generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Move {
    /// Overwrite one cell.
    SingleSwap {
        day: usize,
        worker: usize,
        new_shift: ShiftKind,
    },
    /// Rotate the cells of `workers[..len]` on one day by one position:
    /// `workers[i]` receives the old value of `workers[i - 1 mod len]`.
    /// Slots past `len` are zero.
    ShiftRotation {
        day: usize,
        workers: [usize; 3],
        len: usize,
    },
    /// Set `block_size` consecutive cells of one worker to `new_shift`.
    BlockMove {
        worker: usize,
        start_day: usize,
        block_size: usize,
        new_shift: ShiftKind,
    },
    /// Exchange two workers' cells over a window of days.
    EmployeeSwap {
        worker_a: usize,
        worker_b: usize,
        start_day: usize,
        window_len: usize,
    },
}

impl Move {
    pub fn family(&self) -> MoveFamily {
        match self {
            Move::SingleSwap { .. } => MoveFamily::SingleSwap,
            Move::ShiftRotation { .. } => MoveFamily::ShiftRotation,
            Move::BlockMove { .. } => MoveFamily::BlockMove,
            Move::EmployeeSwap { .. } => MoveFamily::EmployeeSwap,
        }
    }

    /// Applies the move in place.
    pub fn apply(&self, grid: &mut ScheduleGrid) {
        match *self {
            Move::SingleSwap {
                day,
                worker,
                new_shift,
            } => grid.set(day, worker, new_shift),
            Move::ShiftRotation { day, workers, len } => {
                let mut values = [ShiftKind::Off; 3];
                for (slot, &w) in values.iter_mut().zip(&workers[..len]) {
                    *slot = grid.get(day, w);
                }
                values[..len].rotate_right(1);
                for (&w, &kind) in workers[..len].iter().zip(&values[..len]) {
                    grid.set(day, w, kind);
                }
            }
            Move::BlockMove {
                worker,
                start_day,
                block_size,
                new_shift,
            } => {
                for day in start_day..start_day + block_size {
                    grid.set(day, worker, new_shift);
                }
            }
            Move::EmployeeSwap {
                worker_a,
                worker_b,
                start_day,
                window_len,
            } => {
                for day in start_day..start_day + window_len {
                    grid.swap_workers(day, worker_a, worker_b);
                }
            }
        }
    }

    /// Returns a clone of `grid` with the move applied.
    pub fn applied_to(&self, grid: &ScheduleGrid) -> ScheduleGrid {
        let mut next = grid.clone();
        self.apply(&mut next);
        next
    }
}
