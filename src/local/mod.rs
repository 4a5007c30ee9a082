//! Multi-neighborhood local search.
//!
//! The final polishing phase: first-improvement hill climbing over all
//! four move families, each tried with its static weight as probability.

mod runner;

pub use runner::{LocalResult, LocalSearchRunner};
