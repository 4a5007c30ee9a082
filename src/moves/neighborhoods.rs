//! Random move generators, one per family.

use super::types::{Move, MoveFamily};
use crate::models::{ScheduleGrid, ShiftKind};
use crate::random::distinct_indices;
use rand::Rng;

/// A strategy that draws one random move for a grid.
///
/// Returns `None` only when the family cannot be formed on the grid at all
/// (no cells, or fewer workers than the family needs). A returned move is
/// always in bounds for `grid`.
pub trait Neighborhood {
    fn generate<R: Rng>(&self, grid: &ScheduleGrid, rng: &mut R) -> Option<Move>;
}

fn random_shift<R: Rng>(rng: &mut R) -> ShiftKind {
    ShiftKind::ALL[rng.random_range(0..ShiftKind::ALL.len())]
}

/// One cell set to a uniformly drawn shift (the current value included).
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleSwap;

impl Neighborhood for SingleSwap {
    fn generate<R: Rng>(&self, grid: &ScheduleGrid, rng: &mut R) -> Option<Move> {
        if grid.is_empty() {
            return None;
        }
        Some(Move::SingleSwap {
            day: rng.random_range(0..grid.days()),
            worker: rng.random_range(0..grid.workers()),
            new_shift: random_shift(rng),
        })
    }
}

/// Rotation among `min(3, workers)` distinct workers on one day.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShiftRotation;

impl Neighborhood for ShiftRotation {
    fn generate<R: Rng>(&self, grid: &ScheduleGrid, rng: &mut R) -> Option<Move> {
        if grid.is_empty() {
            return None;
        }
        let day = rng.random_range(0..grid.days());
        let len = grid.workers().min(3);
        let mut workers = [0usize; 3];
        for (slot, w) in workers
            .iter_mut()
            .zip(distinct_indices(rng, grid.workers(), len))
        {
            *slot = w;
        }
        Some(Move::ShiftRotation { day, workers, len })
    }
}

/// A run of identical cells for one worker.
///
/// Length is drawn from `[2, min(5, days / 2)]`, or is 1 on horizons
/// shorter than four days.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockMove;

impl Neighborhood for BlockMove {
    fn generate<R: Rng>(&self, grid: &ScheduleGrid, rng: &mut R) -> Option<Move> {
        if grid.is_empty() {
            return None;
        }
        let days = grid.days();
        let max_len = (days / 2).min(5);
        let block_size = if max_len < 2 {
            1
        } else {
            rng.random_range(2..=max_len)
        };
        Some(Move::BlockMove {
            worker: rng.random_range(0..grid.workers()),
            start_day: rng.random_range(0..=days - block_size),
            block_size,
            new_shift: random_shift(rng),
        })
    }
}

/// Two workers exchange a window of `[3, min(7, days)]` days, or the whole
/// horizon when it is shorter than three days.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmployeeSwap;

impl Neighborhood for EmployeeSwap {
    fn generate<R: Rng>(&self, grid: &ScheduleGrid, rng: &mut R) -> Option<Move> {
        let days = grid.days();
        if days == 0 || grid.workers() < 2 {
            return None;
        }
        let pair = distinct_indices(rng, grid.workers(), 2);
        let window_len = if days < 3 {
            days
        } else {
            rng.random_range(3..=days.min(7))
        };
        Some(Move::EmployeeSwap {
            worker_a: pair[0],
            worker_b: pair[1],
            start_day: rng.random_range(0..=days - window_len),
            window_len,
        })
    }
}

impl Neighborhood for MoveFamily {
    fn generate<R: Rng>(&self, grid: &ScheduleGrid, rng: &mut R) -> Option<Move> {
        match self {
            MoveFamily::SingleSwap => SingleSwap.generate(grid, rng),
            MoveFamily::ShiftRotation => ShiftRotation.generate(grid, rng),
            MoveFamily::BlockMove => BlockMove.generate(grid, rng),
            MoveFamily::EmployeeSwap => EmployeeSwap.generate(grid, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_empty_grid_yields_nothing() {
        let mut rng = create_rng(1);
        for grid in [ScheduleGrid::new(0, 5), ScheduleGrid::new(7, 0)] {
            for family in MoveFamily::ALL {
                assert!(family.generate(&grid, &mut rng).is_none());
            }
        }
    }

    #[test]
    fn test_employee_swap_needs_two_workers() {
        let mut rng = create_rng(1);
        let grid = ScheduleGrid::new(10, 1);
        assert!(EmployeeSwap.generate(&grid, &mut rng).is_none());
        assert!(SingleSwap.generate(&grid, &mut rng).is_some());
    }

    #[test]
    fn test_rotation_length_tracks_roster() {
        let mut rng = create_rng(2);
        let grid = ScheduleGrid::new(4, 2);
        match ShiftRotation.generate(&grid, &mut rng) {
            Some(Move::ShiftRotation { workers, len, .. }) => {
                assert_eq!(len, 2);
                assert_ne!(workers[0], workers[1]);
                assert_eq!(workers[2], 0);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_block_bounds() {
        let mut rng = create_rng(3);
        let grid = ScheduleGrid::new(30, 4);
        for _ in 0..500 {
            match BlockMove.generate(&grid, &mut rng) {
                Some(Move::BlockMove {
                    start_day,
                    block_size,
                    ..
                }) => {
                    assert!((2..=5).contains(&block_size));
                    assert!(start_day + block_size <= 30);
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_short_horizons() {
        let mut rng = create_rng(4);
        let grid = ScheduleGrid::new(2, 3);
        for _ in 0..100 {
            if let Some(Move::BlockMove { block_size, .. }) = BlockMove.generate(&grid, &mut rng) {
                assert_eq!(block_size, 1);
            }
            match EmployeeSwap.generate(&grid, &mut rng) {
                Some(Move::EmployeeSwap {
                    start_day,
                    window_len,
                    worker_a,
                    worker_b,
                }) => {
                    assert_eq!((start_day, window_len), (0, 2));
                    assert_ne!(worker_a, worker_b);
                }
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_swap_window_bounds() {
        let mut rng = create_rng(5);
        let grid = ScheduleGrid::new(10, 6);
        for _ in 0..500 {
            if let Some(Move::EmployeeSwap {
                start_day,
                window_len,
                ..
            }) = EmployeeSwap.generate(&grid, &mut rng)
            {
                assert!((3..=7).contains(&window_len));
                assert!(start_day + window_len <= 10);
            }
        }
    }
}
