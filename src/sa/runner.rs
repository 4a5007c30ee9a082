//! SA execution loop.

use crate::config::SchedulingParams;
use crate::fitness::Evaluator;
use crate::models::ScheduleGrid;
use crate::moves::NeighborhoodTable;
use rand::Rng;

/// Iterations between score-history samples.
const HISTORY_INTERVAL: usize = 100;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult {
    /// The best grid found.
    pub best: ScheduleGrid,

    /// Score of the best grid.
    pub best_score: f64,

    /// Total number of iterations (neighbor evaluations).
    pub iterations: usize,

    /// Number of stagnation reheats.
    pub reheats: usize,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of moves that raised the current score.
    pub improving_moves: usize,

    /// Temperature when the loop stopped.
    pub final_temperature: f64,

    /// Best score sampled every 100 iterations, plus the final value.
    pub score_history: Vec<f64>,
}

/// Executes the Simulated Annealing phase.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA from `initial` and returns the best grid seen.
    ///
    /// Each iteration draws one move from the temperature-banded table,
    /// applies it to a clone of the current grid, and accepts it by the
    /// Metropolis rule: always when the score rises, otherwise with
    /// probability `exp(Δ / T)`. After `reheat_threshold` iterations
    /// without a new best the temperature is multiplied by
    /// `reheat_factor`. The temperature is cooled after every iteration.
    ///
    /// Stops once `max_iterations` is reached or the temperature falls
    /// below `final_temp`.
    pub fn run<R: Rng>(
        evaluator: &Evaluator<'_>,
        initial: ScheduleGrid,
        params: &SchedulingParams,
        rng: &mut R,
    ) -> SaResult {
        let mut current_score = evaluator.evaluate(&initial);
        let mut current = initial;
        let mut best = current.clone();
        let mut best_score = current_score;

        let mut temperature = params.initial_temp;
        let mut iterations = 0usize;
        let mut stagnation = 0usize;
        let mut reheats = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;

        let mut score_history = vec![best_score];

        while iterations < params.max_iterations && temperature >= params.final_temp {
            let table = NeighborhoodTable::for_temperature(temperature, params.initial_temp);

            match table.generate(&current, rng) {
                Some(mv) => {
                    let neighbor = mv.applied_to(&current);
                    let neighbor_score = evaluator.evaluate(&neighbor);
                    let delta = neighbor_score - current_score;

                    // Metropolis acceptance criterion (maximizing)
                    let accept = if delta > 0.0 {
                        improving_moves += 1;
                        true
                    } else if temperature > 0.0 {
                        rng.random::<f64>() < (delta / temperature).exp()
                    } else {
                        false
                    };

                    if accept {
                        current = neighbor;
                        current_score = neighbor_score;
                        accepted_moves += 1;

                        if current_score > best_score {
                            best = current.clone();
                            best_score = current_score;
                            stagnation = 0;
                        } else {
                            stagnation += 1;
                        }
                    } else {
                        stagnation += 1;
                    }
                }
                None => stagnation += 1,
            }

            iterations += 1;

            if stagnation >= params.reheat_threshold {
                temperature *= params.reheat_factor;
                stagnation = 0;
                reheats += 1;
                tracing::debug!(
                    event = "sa_reheat",
                    iteration = iterations,
                    temperature,
                    best_score
                );
            }

            temperature *= params.cooling_rate;

            if iterations.is_multiple_of(HISTORY_INTERVAL) {
                score_history.push(best_score);
            }
        }

        if score_history
            .last()
            .is_none_or(|&last| (last - best_score).abs() > 1e-15)
        {
            score_history.push(best_score);
        }

        SaResult {
            best,
            best_score,
            iterations,
            reheats,
            accepted_moves,
            improving_moves,
            final_temperature: temperature,
            score_history,
        }
    }
}
