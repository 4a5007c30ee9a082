//! Rostering orchestrator.
//!
//! [`Scheduler`] wires the components into one deterministic pipeline:
//! pre-check, greedy construction, Simulated Annealing, Tabu Search and
//! local search, then scores and audits the final grid.
//!
//! Inputs are bundled in [`ScheduleInput`]; the run returns a
//! [`ScheduleResult`] carrying the grid, score breakdown, violations,
//! per-worker shift counts and per-phase reports.

mod runner;
mod types;

pub use runner::Scheduler;
pub use types::{
    Phase, PhaseReport, SaStats, ScheduleInput, ScheduleResult, WorkerShiftCounts,
};
