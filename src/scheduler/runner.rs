//! Hybrid pipeline orchestrator.
//!
//! # Pipeline
//!
//! 1. Preprocess constraints and resolve requests against the roster
//! 2. Run the roster pre-check (findings are reported, never fatal)
//! 3. Greedy construction
//! 4. Simulated Annealing from the constructed grid
//! 5. Tabu Search from the SA best
//! 6. Local search from the tabu best
//! 7. Final breakdown, violation scan and per-worker shift counts
//!
//! One seeded rng is threaded through every phase, so a fixed seed
//! reproduces the whole result.

use super::types::{
    Phase, PhaseReport, SaStats, ScheduleInput, ScheduleResult, WorkerShiftCounts,
};
use crate::config::SchedulingParams;
use crate::constraints::preprocess;
use crate::construct::construct;
use crate::error::ParamsError;
use crate::fitness::Evaluator;
use crate::local::LocalSearchRunner;
use crate::models::{ResolvedRequests, ScheduleGrid};
use crate::precheck::precheck;
use crate::random::create_rng;
use crate::sa::SaRunner;
use crate::tabu::TabuRunner;
use crate::violations;
use tracing::{debug, info};

/// Runs the full rostering pipeline with validated parameters.
///
/// # Examples
///
/// ```
/// use u_roster::config::SchedulingParams;
/// use u_roster::models::Worker;
/// use u_roster::scheduler::{ScheduleInput, Scheduler};
///
/// let workers: Vec<Worker> = (1..=8).map(|id| Worker::new(id, 4)).collect();
/// let params = SchedulingParams::default().with_max_iterations(200).with_seed(7);
/// let scheduler = Scheduler::new(params).unwrap();
///
/// let result = scheduler.schedule(&ScheduleInput::new(workers, 7));
/// assert_eq!(result.grid.days(), 7);
/// assert_eq!(result.grid.workers(), 8);
/// assert_eq!(result.seed, 7);
/// ```
#[derive(Debug, Clone)]
pub struct Scheduler {
    params: SchedulingParams,
}

impl Scheduler {
    /// Validates `params` and builds a scheduler.
    pub fn new(params: SchedulingParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &SchedulingParams {
        &self.params
    }

    /// Produces a roster for `input`.
    ///
    /// Never fails. An empty roster or a zero-day horizon yields an empty
    /// grid of the requested shape with a zero score and no phase reports.
    pub fn schedule(&self, input: &ScheduleInput) -> ScheduleResult {
        let params = &self.params;
        let seed = params.seed.unwrap_or_else(rand::random::<u64>);
        let mut rng = create_rng(seed);
        let days = input.days;

        let constraints = preprocess(&input.constraints, &input.workers);
        let requests = ResolvedRequests::resolve(&input.requests, &input.workers, days);
        if requests.skipped > 0 {
            debug!(event = "requests_skipped", skipped = requests.skipped);
        }
        let precheck = precheck(&input.workers, &constraints, &requests, days);
        let evaluator = Evaluator::new(&constraints, &requests, &params.constraint_weights);

        if input.workers.is_empty() || days == 0 {
            let grid = ScheduleGrid::new(days, input.workers.len());
            return ScheduleResult {
                violations: violations::scan(&grid, &constraints),
                shift_counts: shift_counts(&grid, input),
                grid,
                total_score: 0.0,
                breakdown: evaluator.empty_breakdown(),
                phases: Vec::new(),
                sa_stats: SaStats::default(),
                seed,
                skipped_requests: requests.skipped,
                precheck,
            };
        }

        let mut phases = Vec::with_capacity(4);

        info!(event = "phase_start", phase = %Phase::Construction, days, workers = input.workers.len());
        let initial = construct(&constraints, &requests, days);
        let initial_score = evaluator.evaluate(&initial);
        info!(event = "phase_end", phase = %Phase::Construction, iterations = 0, score = initial_score);
        phases.push(PhaseReport {
            phase: Phase::Construction,
            iterations: 0,
            score: initial_score,
            history: vec![initial_score],
        });

        info!(event = "phase_start", phase = %Phase::SimulatedAnnealing, temperature = params.initial_temp);
        let sa = SaRunner::run(&evaluator, initial, params, &mut rng);
        info!(
            event = "phase_end",
            phase = %Phase::SimulatedAnnealing,
            iterations = sa.iterations,
            score = sa.best_score,
            reheats = sa.reheats
        );
        phases.push(PhaseReport {
            phase: Phase::SimulatedAnnealing,
            iterations: sa.iterations,
            score: sa.best_score,
            history: sa.score_history,
        });
        let sa_stats = SaStats {
            reheats: sa.reheats,
            accepted_moves: sa.accepted_moves,
            improving_moves: sa.improving_moves,
            final_temperature: sa.final_temperature,
        };

        info!(event = "phase_start", phase = %Phase::TabuSearch, cap = params.tabu_iteration_cap());
        let tabu = TabuRunner::run(&evaluator, sa.best, params, &mut rng);
        info!(
            event = "phase_end",
            phase = %Phase::TabuSearch,
            iterations = tabu.iterations,
            score = tabu.best_score,
            aspiration_overrides = tabu.aspiration_overrides
        );
        phases.push(PhaseReport {
            phase: Phase::TabuSearch,
            iterations: tabu.iterations,
            score: tabu.best_score,
            history: tabu.score_history,
        });

        info!(event = "phase_start", phase = %Phase::LocalSearch);
        let local = LocalSearchRunner::run(&evaluator, tabu.best, params, &mut rng);
        info!(
            event = "phase_end",
            phase = %Phase::LocalSearch,
            iterations = local.passes,
            score = local.best_score
        );
        phases.push(PhaseReport {
            phase: Phase::LocalSearch,
            iterations: local.passes,
            score: local.best_score,
            history: local.score_history,
        });

        let grid = local.best;
        let breakdown = evaluator.breakdown(&grid);
        ScheduleResult {
            violations: violations::scan(&grid, &constraints),
            shift_counts: shift_counts(&grid, input),
            total_score: breakdown.total,
            breakdown,
            grid,
            phases,
            sa_stats,
            seed,
            skipped_requests: requests.skipped,
            precheck,
        }
    }
}

fn shift_counts(grid: &ScheduleGrid, input: &ScheduleInput) -> Vec<WorkerShiftCounts> {
    input
        .workers
        .iter()
        .enumerate()
        .map(|(i, w)| WorkerShiftCounts::from_grid(grid, i, w.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::ConstraintConfig;
    use crate::models::{EmploymentType, RequestKind, Role, ShiftKind, ShiftRequest, Worker};

    fn small_params(seed: u64) -> SchedulingParams {
        SchedulingParams::default()
            .with_max_iterations(300)
            .with_local_search_max_passes(50)
            .with_seed(seed)
    }

    fn roster() -> Vec<Worker> {
        vec![
            Worker::new(1, 7).with_role(Role::HeadNurse),
            Worker::new(2, 1).with_role(Role::NewNurse),
            Worker::new(3, 5),
            Worker::new(4, 3),
            Worker::new(5, 2).with_employment(EmploymentType::PartTime),
        ]
    }

    #[test]
    fn test_new_rejects_invalid_params() {
        let params = SchedulingParams::default().with_cooling_rate(1.5);
        assert_eq!(
            Scheduler::new(params).unwrap_err(),
            ParamsError::CoolingRate(1.5)
        );
    }

    #[test]
    fn test_phases_in_order_and_score_matches_grid() {
        let input = ScheduleInput::new(roster(), 10)
            .with_constraints(ConstraintConfig::default().with_required_staff(2, 1, 1));
        let scheduler = Scheduler::new(small_params(11)).unwrap();
        let result = scheduler.schedule(&input);

        let order: Vec<Phase> = result.phases.iter().map(|p| p.phase).collect();
        assert_eq!(
            order,
            vec![
                Phase::Construction,
                Phase::SimulatedAnnealing,
                Phase::TabuSearch,
                Phase::LocalSearch
            ]
        );
        for pair in result.phases.windows(2) {
            assert!(pair[1].score >= pair[0].score);
        }
        assert_eq!(result.phases[3].score, result.total_score);
        assert_eq!(result.breakdown.total, result.total_score);
        assert_eq!(result.seed, 11);
    }

    #[test]
    fn test_shift_counts_cover_horizon() {
        let input = ScheduleInput::new(roster(), 10);
        let result = Scheduler::new(small_params(3)).unwrap().schedule(&input);
        assert_eq!(result.shift_counts.len(), 5);
        for counts in &result.shift_counts {
            assert_eq!(counts.worked() + counts.off, 10);
        }
        assert_eq!(result.counts_for(5).map(|c| c.worker_id), Some(5));
        assert!(result.counts_for(99).is_none());
    }

    #[test]
    fn test_skipped_requests_reported() {
        let requests = vec![
            ShiftRequest::new(2, 4, ShiftKind::Night, RequestKind::Avoid),
            ShiftRequest::new(42, 1, ShiftKind::Day, RequestKind::Prefer),
            ShiftRequest::new(1, 30, ShiftKind::Day, RequestKind::Prefer),
        ];
        let input = ScheduleInput::new(roster(), 10).with_requests(requests);
        let result = Scheduler::new(small_params(5)).unwrap().schedule(&input);
        assert_eq!(result.skipped_requests, 2);
    }

    #[test]
    fn test_empty_roster_is_trivial() {
        let result = Scheduler::new(small_params(1))
            .unwrap()
            .schedule(&ScheduleInput::new(Vec::new(), 7));
        assert_eq!((result.grid.days(), result.grid.workers()), (7, 0));
        assert_eq!(result.total_score, 0.0);
        assert!(result.phases.is_empty());
        assert!(result.shift_counts.is_empty());
        assert!(!result.precheck.is_valid());
    }

    #[test]
    fn test_zero_days_is_trivial() {
        let result = Scheduler::new(small_params(1))
            .unwrap()
            .schedule(&ScheduleInput::new(roster(), 0));
        assert_eq!(result.grid.days(), 0);
        assert_eq!(result.total_score, 0.0);
        assert!(result.shift_counts.iter().all(|c| c.worked() + c.off == 0));
    }

    #[test]
    fn test_drawn_seed_replays() {
        let input = ScheduleInput::new(roster(), 7);
        let params = SchedulingParams::default().with_max_iterations(200);
        let first = Scheduler::new(params.clone()).unwrap().schedule(&input);
        let replay = Scheduler::new(params.with_seed(first.seed))
            .unwrap()
            .schedule(&input);
        assert_eq!(first, replay);
    }
}
