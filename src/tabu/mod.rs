//! Tabu Search (TS).
//!
//! The second search phase. Keeps a short-term memory of recently applied
//! moves and forbids repeating them, so the search keeps moving away from
//! local optima instead of cycling back. Moves are compared structurally:
//! two candidates are the same move when they touch the same cells the
//! same way.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod memory;
mod runner;

pub use memory::TabuList;
pub use runner::{select_candidate, AppliedMove, Candidate, TabuResult, TabuRunner};
