//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Start from the grid handed over by the previous phase
//! 2. At each iteration:
//!    a. Draw a batch of candidate moves, each from a uniformly chosen family
//!    b. Evaluate every candidate (in parallel with the `parallel` feature)
//!    c. Select the highest-scoring candidate that is not tabu, or whose
//!    score satisfies the aspiration rule; ties go to the earliest drawn
//!    d. Apply it, push the move onto the tabu list, update the global best
//! 3. Terminate after the iteration cap or `tabu_max_no_improve`
//!    iterations without a new best
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.

use super::memory::TabuList;
use crate::config::{Aspiration, SchedulingParams};
use crate::fitness::Evaluator;
use crate::models::ScheduleGrid;
use crate::moves::{Move, NeighborhoodTable};
use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
pub struct TabuResult {
    /// Best grid found.
    pub best: ScheduleGrid,
    /// Score of the best grid.
    pub best_score: f64,
    /// Total iterations executed.
    pub iterations: usize,
    /// Iteration at which the best grid was found (0 if never improved).
    pub best_iteration: usize,
    /// Tabu candidates taken through the aspiration rule.
    pub aspiration_overrides: usize,
    /// Best score after each iteration.
    pub score_history: Vec<f64>,
    /// Every move applied to the current grid, in order.
    pub applied: Vec<AppliedMove>,
}

/// One move taken by the search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedMove {
    /// 1-based iteration that applied the move.
    pub iteration: usize,
    pub mv: Move,
    /// Score of the grid after the move.
    pub score: f64,
    /// The move was tabu and taken through aspiration.
    pub aspiration: bool,
}

/// A move and the score of the grid it produces.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub mv: Move,
    pub grid: ScheduleGrid,
    pub score: f64,
}

/// Index of the candidate to apply, if any is admissible.
///
/// A candidate is admissible when its move is not tabu, or when
/// `aspiration` admits its score against `best_score`. Among admissible
/// candidates the highest score wins; the earliest wins ties.
pub fn select_candidate(
    candidates: &[Candidate],
    tabu: &TabuList,
    aspiration: &Aspiration,
    best_score: f64,
) -> Option<usize> {
    let mut chosen: Option<usize> = None;
    for (i, c) in candidates.iter().enumerate() {
        if tabu.contains(&c.mv) && !aspiration.admits(c.score, best_score) {
            continue;
        }
        if chosen.is_none_or(|j| c.score > candidates[j].score) {
            chosen = Some(i);
        }
    }
    chosen
}

fn evaluate_batch(
    evaluator: &Evaluator<'_>,
    current: &ScheduleGrid,
    moves: Vec<Move>,
) -> Vec<Candidate> {
    let build = |mv: Move| {
        let grid = mv.applied_to(current);
        let score = evaluator.evaluate(&grid);
        Candidate { mv, grid, score }
    };

    #[cfg(feature = "parallel")]
    let candidates: Vec<Candidate> = moves.into_par_iter().map(build).collect();
    #[cfg(not(feature = "parallel"))]
    let candidates: Vec<Candidate> = moves.into_iter().map(build).collect();
    candidates
}

/// Tabu Search runner.
pub struct TabuRunner;

impl TabuRunner {
    /// Runs Tabu Search from `initial` and returns the best grid seen.
    pub fn run<R: Rng>(
        evaluator: &Evaluator<'_>,
        initial: ScheduleGrid,
        params: &SchedulingParams,
        rng: &mut R,
    ) -> TabuResult {
        let table = NeighborhoodTable::uniform();
        let max_iterations = params.tabu_iteration_cap();

        let mut best_score = evaluator.evaluate(&initial);
        let mut best = initial.clone();
        let mut current = initial;
        let mut best_iteration = 0;
        let mut aspiration_overrides = 0;

        let mut tabu = TabuList::new(params.tabu_list_capacity);
        let mut score_history = Vec::with_capacity(max_iterations);
        let mut applied = Vec::new();
        let mut no_improve_count = 0;
        let mut iterations = 0;

        while iterations < max_iterations && no_improve_count < params.tabu_max_no_improve {
            iterations += 1;

            // Moves are drawn sequentially so the rng stream is independent
            // of evaluation order.
            let moves: Vec<Move> = (0..params.tabu_batch_size)
                .filter_map(|_| table.generate(&current, rng))
                .collect();
            let mut candidates = evaluate_batch(evaluator, &current, moves);

            match select_candidate(&candidates, &tabu, &params.aspiration, best_score) {
                Some(i) => {
                    let chosen = candidates.swap_remove(i);
                    let aspiration = tabu.contains(&chosen.mv);
                    if aspiration {
                        aspiration_overrides += 1;
                    }
                    applied.push(AppliedMove {
                        iteration: iterations,
                        mv: chosen.mv,
                        score: chosen.score,
                        aspiration,
                    });
                    tabu.push(chosen.mv);
                    current = chosen.grid;

                    if chosen.score > best_score {
                        best = current.clone();
                        best_score = chosen.score;
                        best_iteration = iterations;
                        no_improve_count = 0;
                    } else {
                        no_improve_count += 1;
                    }
                }
                None => no_improve_count += 1,
            }

            score_history.push(best_score);
        }

        TabuResult {
            best,
            best_score,
            iterations,
            best_iteration,
            aspiration_overrides,
            score_history,
            applied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConstraintWeights;
    use crate::constraints::{preprocess, ConstraintConfig, ConstraintSet};
    use crate::construct::construct;
    use crate::models::{ResolvedRequests, ShiftKind, Worker};
    use crate::random::create_rng;

    fn instance() -> (ConstraintSet, ResolvedRequests, ConstraintWeights) {
        let workers: Vec<Worker> = (0..7).map(|i| Worker::new(i, 1 + i as u32)).collect();
        let c = preprocess(
            &ConstraintConfig::default().with_required_staff(2, 1, 1),
            &workers,
        );
        (c, ResolvedRequests::default(), ConstraintWeights::default())
    }

    fn cand(day: usize, score: f64) -> Candidate {
        Candidate {
            mv: Move::SingleSwap {
                day,
                worker: 0,
                new_shift: ShiftKind::Day,
            },
            grid: ScheduleGrid::new(1, 1),
            score,
        }
    }

    #[test]
    fn test_select_skips_tabu_without_aspiration() {
        let mut tabu = TabuList::new(5);
        tabu.push(cand(0, 0.0).mv);
        let batch = vec![cand(0, 90.0), cand(1, 50.0), cand(2, 70.0)];
        // best 100: 90 ≤ 95, so the tabu move stays forbidden.
        let pick = select_candidate(&batch, &tabu, &Aspiration::Ratio(0.95), 100.0);
        assert_eq!(pick, Some(2));
    }

    #[test]
    fn test_select_aspiration_overrides() {
        let mut tabu = TabuList::new(5);
        tabu.push(cand(0, 0.0).mv);
        let batch = vec![cand(0, 98.0), cand(1, 50.0)];
        let pick = select_candidate(&batch, &tabu, &Aspiration::Ratio(0.95), 100.0);
        assert_eq!(pick, Some(0));
        let pick = select_candidate(&batch, &tabu, &Aspiration::Margin(1.0), 100.0);
        assert_eq!(pick, Some(1));
    }

    #[test]
    fn test_select_first_wins_ties_and_none_when_all_tabu() {
        let tabu = TabuList::new(5);
        let batch = vec![cand(0, 10.0), cand(1, 10.0)];
        assert_eq!(
            select_candidate(&batch, &tabu, &Aspiration::default(), 0.0),
            Some(0)
        );

        let mut tabu = TabuList::new(5);
        tabu.push(cand(0, 0.0).mv);
        let batch = vec![cand(0, 10.0)];
        assert_eq!(
            select_candidate(&batch, &tabu, &Aspiration::Margin(0.0), 20.0),
            None
        );
        assert_eq!(select_candidate(&[], &tabu, &Aspiration::default(), 0.0), None);
    }

    #[test]
    fn test_history_non_decreasing_and_best_consistent() {
        let (c, r, w) = instance();
        let eval = Evaluator::new(&c, &r, &w);
        let initial = construct(&c, &r, 14);
        let initial_score = eval.evaluate(&initial);
        let params = SchedulingParams::default().with_max_iterations(200);

        let result = TabuRunner::run(&eval, initial, &params, &mut create_rng(42));

        assert!(result.iterations <= 100);
        assert!(result.best_score >= initial_score);
        assert_eq!(result.best_score, eval.evaluate(&result.best));
        assert!(result.best_iteration <= result.iterations);
        assert_eq!(result.score_history.len(), result.iterations);
        for pair in result.score_history.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn test_stagnation_stops_early() {
        let (c, r, w) = instance();
        let eval = Evaluator::new(&c, &r, &w);
        let params = SchedulingParams::default()
            .with_max_iterations(2000)
            .with_tabu_max_no_improve(5);
        let result = TabuRunner::run(&eval, construct(&c, &r, 7), &params, &mut create_rng(7));
        assert!(result.iterations < 1000);
        assert!(result.iterations >= result.best_iteration + 5);
    }

    #[test]
    fn test_deterministic() {
        let (c, r, w) = instance();
        let eval = Evaluator::new(&c, &r, &w);
        let params = SchedulingParams::default().with_max_iterations(100);
        let a = TabuRunner::run(&eval, construct(&c, &r, 7), &params, &mut create_rng(9));
        let b = TabuRunner::run(&eval, construct(&c, &r, 7), &params, &mut create_rng(9));
        assert_eq!(a.best, b.best);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn test_run_never_repeats_tabu_move_without_improvement() {
        let workers = vec![Worker::new(1, 4)];
        let c = preprocess(&ConstraintConfig::default(), &workers);
        let r = ResolvedRequests::default();
        let w = ConstraintWeights::default();
        let eval = Evaluator::new(&c, &r, &w);
        let initial = ScheduleGrid::new(1, 1);
        let params = SchedulingParams::default()
            .with_max_iterations(400)
            .with_tabu_batch_size(1)
            .with_tabu_list_capacity(3)
            .with_tabu_max_no_improve(50)
            .with_aspiration(Aspiration::Margin(0.0));

        for seed in 0..5 {
            let result = TabuRunner::run(&eval, initial.clone(), &params, &mut create_rng(seed));
            assert!(!result.applied.is_empty());

            let mut replay = TabuList::new(3);
            let mut best = eval.evaluate(&initial);
            let mut overrides = 0;
            let mut last_iteration = 0;
            for step in &result.applied {
                assert!(step.iteration > last_iteration);
                last_iteration = step.iteration;
                let was_tabu = replay.contains(&step.mv);
                assert_eq!(was_tabu, step.aspiration);
                if was_tabu {
                    // Only a strict new best may lift the tabu status.
                    assert!(step.score > best, "seed {seed}: {step:?} at best {best}");
                    overrides += 1;
                }
                replay.push(step.mv);
                best = best.max(step.score);
            }
            assert_eq!(overrides, result.aspiration_overrides);
            assert_eq!(best, result.best_score);
        }
    }

    #[test]
    fn test_single_worker_grid() {
        let workers = vec![Worker::new(1, 4)];
        let c = preprocess(&ConstraintConfig::default(), &workers);
        let r = ResolvedRequests::default();
        let w = ConstraintWeights::default();
        let eval = Evaluator::new(&c, &r, &w);
        let params = SchedulingParams::default().with_max_iterations(60);
        let result = TabuRunner::run(&eval, ScheduleGrid::new(1, 1), &params, &mut create_rng(1));
        assert_eq!((result.best.days(), result.best.workers()), (1, 1));
    }
}
