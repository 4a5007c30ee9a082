//! Simulated Annealing (SA).
//!
//! The first search phase. Accepts worsening moves with a probability that
//! decreases as the temperature cools, reheats after prolonged stagnation,
//! and draws moves from a neighborhood table that narrows from large
//! block moves to single-cell edits as the run cools.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod runner;

pub use runner::{SaResult, SaRunner};
