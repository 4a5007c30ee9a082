//! Orchestrator inputs and outputs.

use crate::constraints::ConstraintConfig;
use crate::fitness::ScoreBreakdown;
use crate::models::{ScheduleGrid, ShiftKind, ShiftRequest, Worker, WorkerId};
use crate::precheck::PrecheckReport;
use crate::violations::ViolationReport;
use std::fmt;

/// Input container for one scheduling run.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleInput {
    /// Roster; grid columns follow this order.
    pub workers: Vec<Worker>,
    /// Constraint overrides.
    pub constraints: ConstraintConfig,
    /// Requests with day indices already resolved by the caller.
    pub requests: Vec<ShiftRequest>,
    /// Planning horizon in days.
    pub days: usize,
}

impl ScheduleInput {
    /// Creates an input with default constraints and no requests.
    pub fn new(workers: Vec<Worker>, days: usize) -> Self {
        Self {
            workers,
            days,
            ..Self::default()
        }
    }

    /// Sets constraint overrides.
    pub fn with_constraints(mut self, constraints: ConstraintConfig) -> Self {
        self.constraints = constraints;
        self
    }

    /// Sets shift requests.
    pub fn with_requests(mut self, requests: Vec<ShiftRequest>) -> Self {
        self.requests = requests;
        self
    }
}

/// Pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Phase {
    Construction,
    SimulatedAnnealing,
    TabuSearch,
    LocalSearch,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Construction => "construction",
            Phase::SimulatedAnnealing => "simulated_annealing",
            Phase::TabuSearch => "tabu_search",
            Phase::LocalSearch => "local_search",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one pipeline stage.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseReport {
    pub phase: Phase,
    /// Iterations (SA, tabu) or passes (local search). 0 for construction.
    pub iterations: usize,
    /// Score of the grid the stage handed on.
    pub score: f64,
    /// Best-score samples recorded by the stage.
    pub history: Vec<f64>,
}

/// Simulated annealing counters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaStats {
    pub reheats: usize,
    pub accepted_moves: usize,
    pub improving_moves: usize,
    pub final_temperature: f64,
}

/// Shift-type totals for one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkerShiftCounts {
    pub worker_id: WorkerId,
    pub day: usize,
    pub evening: usize,
    pub night: usize,
    pub off: usize,
}

impl WorkerShiftCounts {
    pub(crate) fn from_grid(grid: &ScheduleGrid, worker: usize, worker_id: WorkerId) -> Self {
        let counts = grid.worker_counts(worker);
        Self {
            worker_id,
            day: counts[ShiftKind::Day.index()],
            evening: counts[ShiftKind::Evening.index()],
            night: counts[ShiftKind::Night.index()],
            off: counts[ShiftKind::Off.index()],
        }
    }

    /// Days on any working shift.
    pub fn worked(&self) -> usize {
        self.day + self.evening + self.night
    }
}

/// Final output of a scheduling run. Immutable once returned.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleResult {
    /// Final grid, columns in roster order.
    pub grid: ScheduleGrid,
    pub total_score: f64,
    pub breakdown: ScoreBreakdown,
    pub violations: ViolationReport,
    /// One entry per worker, in roster order.
    pub shift_counts: Vec<WorkerShiftCounts>,
    /// Construction, SA, tabu and local search, in order. Empty when there
    /// was nothing to schedule.
    pub phases: Vec<PhaseReport>,
    pub sa_stats: SaStats,
    /// Seed that reproduces this run.
    pub seed: u64,
    /// Requests dropped for naming an unknown worker or a day outside the
    /// horizon.
    pub skipped_requests: usize,
    pub precheck: PrecheckReport,
}

impl ScheduleResult {
    /// Shift counts for `worker_id`.
    pub fn counts_for(&self, worker_id: WorkerId) -> Option<&WorkerShiftCounts> {
        self.shift_counts.iter().find(|c| c.worker_id == worker_id)
    }

    /// Report of one phase.
    pub fn phase(&self, phase: Phase) -> Option<&PhaseReport> {
        self.phases.iter().find(|p| p.phase == phase)
    }
}
