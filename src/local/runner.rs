//! Multi-neighborhood local search engine.
//!
//! # Algorithm (first improvement)
//!
//! 1. Start from the grid handed over by the previous phase
//! 2. Each pass walks the families in fixed order. A family is tried with
//!    probability equal to its static weight; a tried family draws one
//!    candidate, which is accepted if it raises the current score
//! 3. The first acceptance ends the pass
//! 4. A pass without an acceptance, or the pass limit, ends the phase
//!
//! The current score rises strictly with every acceptance, so the current
//! grid is also the best one seen.

use crate::config::SchedulingParams;
use crate::fitness::Evaluator;
use crate::models::ScheduleGrid;
use crate::moves::{MoveFamily, Neighborhood};
use rand::Rng;

/// Result of a local search run.
#[derive(Debug, Clone)]
pub struct LocalResult {
    /// Final grid.
    pub best: ScheduleGrid,
    /// Score of the final grid.
    pub best_score: f64,
    /// Passes executed, including the final unsuccessful one.
    pub passes: usize,
    /// Moves accepted.
    pub accepted_moves: usize,
    /// Score after each pass.
    pub score_history: Vec<f64>,
}

/// Local search runner.
pub struct LocalSearchRunner;

impl LocalSearchRunner {
    /// Climbs from `initial` until a pass finds nothing.
    pub fn run<R: Rng>(
        evaluator: &Evaluator<'_>,
        initial: ScheduleGrid,
        params: &SchedulingParams,
        rng: &mut R,
    ) -> LocalResult {
        let weights = params.neighborhood_weights;
        let mut current_score = evaluator.evaluate(&initial);
        let mut current = initial;
        let mut passes = 0;
        let mut accepted_moves = 0;
        let mut score_history = Vec::new();

        while passes < params.local_search_max_passes {
            passes += 1;
            let mut improved = false;

            for family in MoveFamily::ALL {
                if rng.random::<f64>() >= weights.get(family) {
                    continue;
                }
                let Some(mv) = family.generate(&current, rng) else {
                    continue;
                };
                let candidate = mv.applied_to(&current);
                let score = evaluator.evaluate(&candidate);
                if score > current_score {
                    current = candidate;
                    current_score = score;
                    accepted_moves += 1;
                    improved = true;
                    break;
                }
            }

            score_history.push(current_score);
            if !improved {
                break;
            }
        }

        LocalResult {
            best: current,
            best_score: current_score,
            passes,
            accepted_moves,
            score_history,
        }
    }
}
