//! The schedule grid: `days × workers` cells of [`ShiftKind`].

use super::shift::ShiftKind;
use crate::error::GridShapeError;

/// Unchecked wire form of [`ScheduleGrid`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGrid {
    days: usize,
    workers: usize,
    cells: Vec<ShiftKind>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGrid> for ScheduleGrid {
    type Error = GridShapeError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        Self::from_cells(raw.days, raw.workers, raw.cells)
    }
}

/// Dense day-major grid of shift assignments.
///
/// Dimensions are fixed at construction. Every cell always holds a valid
/// [`ShiftKind`]; there is no "unassigned" state. Cloning is a single
/// allocation, which the search phases rely on for their current/best
/// copies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGrid"))]
pub struct ScheduleGrid {
    days: usize,
    workers: usize,
    cells: Vec<ShiftKind>,
}

impl ScheduleGrid {
    /// Creates a grid with every cell set to [`ShiftKind::Off`].
    pub fn new(days: usize, workers: usize) -> Self {
        Self::filled(days, workers, ShiftKind::Off)
    }

    /// Creates a grid with every cell set to `kind`.
    pub fn filled(days: usize, workers: usize, kind: ShiftKind) -> Self {
        Self {
            days,
            workers,
            cells: vec![kind; days * workers],
        }
    }

    /// Builds a grid from day-major cells, checking that there are exactly
    /// `days × workers` of them.
    pub fn from_cells(
        days: usize,
        workers: usize,
        cells: Vec<ShiftKind>,
    ) -> Result<Self, GridShapeError> {
        let expected = days.checked_mul(workers);
        if expected != Some(cells.len()) {
            return Err(GridShapeError {
                days,
                workers,
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self {
            days,
            workers,
            cells,
        })
    }

    /// Builds a grid from day rows. Returns `None` when rows differ in length.
    pub fn from_rows(rows: Vec<Vec<ShiftKind>>) -> Option<Self> {
        let days = rows.len();
        let workers = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != workers) {
            return None;
        }
        let cells = rows.into_iter().flatten().collect();
        Some(Self {
            days,
            workers,
            cells,
        })
    }

    #[inline]
    pub fn days(&self) -> usize {
        self.days
    }

    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// True when the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell value.
    ///
    /// # Panics
    /// Panics if `day` or `worker` is out of range.
    #[inline]
    pub fn get(&self, day: usize, worker: usize) -> ShiftKind {
        debug_assert!(worker < self.workers);
        self.cells[day * self.workers + worker]
    }

    /// Overwrites a cell.
    ///
    /// # Panics
    /// Panics if `day` or `worker` is out of range.
    #[inline]
    pub fn set(&mut self, day: usize, worker: usize, kind: ShiftKind) {
        debug_assert!(worker < self.workers);
        self.cells[day * self.workers + worker] = kind;
    }

    /// Swaps the cells of two workers on one day.
    #[inline]
    pub fn swap_workers(&mut self, day: usize, a: usize, b: usize) {
        let base = day * self.workers;
        self.cells.swap(base + a, base + b);
    }

    /// All assignments of one day, in roster order.
    #[inline]
    pub fn day(&self, day: usize) -> &[ShiftKind] {
        let start = day * self.workers;
        &self.cells[start..start + self.workers]
    }

    /// Mutable access to one day.
    #[inline]
    pub fn day_mut(&mut self, day: usize) -> &mut [ShiftKind] {
        let start = day * self.workers;
        &mut self.cells[start..start + self.workers]
    }

    /// Iterates one worker's assignments in day order.
    pub fn worker_column(&self, worker: usize) -> impl Iterator<Item = ShiftKind> + '_ {
        (0..self.days).map(move |d| self.get(d, worker))
    }

    /// Number of workers assigned `kind` on `day`.
    pub fn count_on_day(&self, day: usize, kind: ShiftKind) -> usize {
        self.day(day).iter().filter(|&&k| k == kind).count()
    }

    /// Per-kind counts for one worker, indexed by [`ShiftKind::index`].
    pub fn worker_counts(&self, worker: usize) -> [usize; 4] {
        let mut counts = [0usize; 4];
        for kind in self.worker_column(worker) {
            counts[kind.index()] += 1;
        }
        counts
    }

    /// Day rows as nested vectors.
    pub fn to_rows(&self) -> Vec<Vec<ShiftKind>> {
        (0..self.days).map(|d| self.day(d).to_vec()).collect()
    }
}
