//! Hybrid metaheuristic shift rostering.
//!
//! Produces a `days × workers` grid of Day / Evening / Night / Off shifts
//! that satisfies labor rules, staffing minimums, role pairing and worker
//! requests as well as possible. The search is a fixed pipeline:
//!
//! - **Pre-check**: flags rosters that cannot be staffed well before any
//!   search runs.
//! - **Greedy construction**: a non-backtracking day-by-day seed that
//!   respects the cheapest hard rules.
//! - **Simulated Annealing (SA)**: Metropolis acceptance with geometric
//!   cooling, stagnation reheats and a temperature-banded neighborhood mix.
//! - **Tabu Search (TS)**: best-of-batch moves with a structural tabu list
//!   and aspiration.
//! - **Local search**: first-improvement hill climbing over all four move
//!   families.
//!
//! The grid is scored by a seven-term weighted [`fitness::Evaluator`];
//! [`violations::scan`] lists the individual rule breaches of the result.
//!
//! # Architecture
//!
//! Components are plain functions and stateless runners over explicit
//! values. Randomness is threaded through every phase from one seeded
//! rng, so a fixed seed reproduces a [`scheduler::ScheduleResult`]
//! exactly. The library emits `tracing` events and never installs a
//! subscriber.

pub mod config;
pub mod constraints;
pub mod construct;
pub mod error;
pub mod fitness;
pub mod local;
pub mod models;
pub mod moves;
pub mod precheck;
pub mod random;
pub mod sa;
pub mod scheduler;
pub mod tabu;
pub mod violations;

pub use config::{Aspiration, ConstraintWeights, NeighborhoodWeights, SchedulingParams};
pub use error::{GridShapeError, ParamsError, ParseError};
pub use models::{ScheduleGrid, ShiftKind, ShiftRequest, Worker};
pub use scheduler::{ScheduleInput, ScheduleResult, Scheduler};
