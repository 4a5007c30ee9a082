//! Algorithm parameters.
//!
//! [`SchedulingParams`] is an explicit value handed to every phase. Nothing
//! here is global, so concurrent runs with different parameters never
//! interfere.

use crate::error::ParamsError;
use crate::moves::MoveFamily;

/// Relative selection weights of the four neighborhood families.
///
/// Used as roulette weights when drawing a family and as independent
/// success probabilities by the local search phase.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NeighborhoodWeights {
    pub single_swap: f64,
    pub shift_rotation: f64,
    pub block_move: f64,
    pub employee_swap: f64,
}

impl Default for NeighborhoodWeights {
    fn default() -> Self {
        Self {
            single_swap: 0.4,
            shift_rotation: 0.25,
            block_move: 0.2,
            employee_swap: 0.15,
        }
    }
}

impl NeighborhoodWeights {
    /// Weight of one family.
    pub fn get(&self, family: MoveFamily) -> f64 {
        match family {
            MoveFamily::SingleSwap => self.single_swap,
            MoveFamily::ShiftRotation => self.shift_rotation,
            MoveFamily::BlockMove => self.block_move,
            MoveFamily::EmployeeSwap => self.employee_swap,
        }
    }

    /// `(family, weight)` pairs in [`MoveFamily::ALL`] order.
    pub fn entries(&self) -> [(MoveFamily, f64); 4] {
        MoveFamily::ALL.map(|f| (f, self.get(f)))
    }
}

/// Multipliers applied to each raw fitness term.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintWeights {
    /// Consecutive-run and weekly-rest rules.
    pub legal_compliance: f64,
    /// Per-shift staffing shortfalls.
    pub staffing_safety: f64,
    /// New-worker pairing and part-time night rules.
    pub role_compliance: f64,
    /// Shift transition patterns.
    pub pattern_penalty: f64,
    /// Reward unit for a satisfied request.
    pub preference_bonus: f64,
    /// Penalty unit for an unsatisfied request.
    pub preference_penalty: f64,
    /// Coverage bonus multiplier.
    pub compliance_bonus: f64,
}

impl Default for ConstraintWeights {
    fn default() -> Self {
        Self {
            legal_compliance: 1000.0,
            staffing_safety: 500.0,
            role_compliance: 50.0,
            pattern_penalty: 30.0,
            preference_bonus: 20.0,
            preference_penalty: 10.0,
            compliance_bonus: 100.0,
        }
    }
}

impl ConstraintWeights {
    fn named(&self) -> [(&'static str, f64); 7] {
        [
            ("legal_compliance", self.legal_compliance),
            ("staffing_safety", self.staffing_safety),
            ("role_compliance", self.role_compliance),
            ("pattern_penalty", self.pattern_penalty),
            ("preference_bonus", self.preference_bonus),
            ("preference_penalty", self.preference_penalty),
            ("compliance_bonus", self.compliance_bonus),
        ]
    }
}

/// When a tabu candidate may be taken anyway.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Aspiration {
    /// `score > best × ratio`. With a positive best this admits candidates
    /// up to `1 − ratio` worse than the best; with a negative best it
    /// demands an improvement of `1 − ratio` over it.
    Ratio(f64),
    /// `score > best − margin`, sign independent.
    Margin(f64),
}

impl Default for Aspiration {
    fn default() -> Self {
        Aspiration::Ratio(0.95)
    }
}

impl Aspiration {
    /// Whether a candidate scoring `score` overrides its tabu status.
    #[inline]
    pub fn admits(&self, score: f64, best_score: f64) -> bool {
        match *self {
            Aspiration::Ratio(ratio) => score > best_score * ratio,
            Aspiration::Margin(margin) => score > best_score - margin,
        }
    }
}

/// Parameters for one optimization run.
///
/// # Examples
///
/// ```
/// use u_roster::config::SchedulingParams;
///
/// let params = SchedulingParams::default()
///     .with_max_iterations(2000)
///     .with_seed(7);
/// assert_eq!(params.tabu_iteration_cap(), 1000);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SchedulingParams {
    /// Starting SA temperature.
    pub initial_temp: f64,
    /// SA stops once the temperature falls below this.
    pub final_temp: f64,
    /// Geometric cooling factor applied after every SA iteration.
    pub cooling_rate: f64,
    /// Hard SA iteration budget; also bounds the tabu phase.
    pub max_iterations: usize,
    /// Non-improving SA iterations before a reheat.
    pub reheat_threshold: usize,
    /// Temperature multiplier on reheat.
    pub reheat_factor: f64,
    /// Tabu queue capacity.
    pub tabu_list_capacity: usize,
    /// Candidates generated per tabu iteration.
    pub tabu_batch_size: usize,
    /// Consecutive non-improving tabu iterations before stopping.
    pub tabu_max_no_improve: usize,
    /// Tabu aspiration rule.
    pub aspiration: Aspiration,
    /// Maximum passes of the local search phase.
    pub local_search_max_passes: usize,
    /// Static neighborhood weights.
    pub neighborhood_weights: NeighborhoodWeights,
    /// Fitness term weights.
    pub constraint_weights: ConstraintWeights,
    /// Random seed. `None` draws one and reports it in the result.
    pub seed: Option<u64>,
}

impl Default for SchedulingParams {
    fn default() -> Self {
        Self {
            initial_temp: 1000.0,
            final_temp: 0.01,
            cooling_rate: 0.985,
            max_iterations: 5000,
            reheat_threshold: 100,
            reheat_factor: 2.0,
            tabu_list_capacity: 50,
            tabu_batch_size: 20,
            tabu_max_no_improve: 100,
            aspiration: Aspiration::default(),
            local_search_max_passes: 500,
            neighborhood_weights: NeighborhoodWeights::default(),
            constraint_weights: ConstraintWeights::default(),
            seed: None,
        }
    }
}

impl SchedulingParams {
    /// Tabu iteration budget: `min(1000, max_iterations / 2)`.
    pub fn tabu_iteration_cap(&self) -> usize {
        (self.max_iterations / 2).min(1000)
    }

    pub fn with_initial_temp(mut self, t: f64) -> Self {
        self.initial_temp = t;
        self
    }

    pub fn with_final_temp(mut self, t: f64) -> Self {
        self.final_temp = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_reheat(mut self, threshold: usize, factor: f64) -> Self {
        self.reheat_threshold = threshold;
        self.reheat_factor = factor;
        self
    }

    pub fn with_tabu_list_capacity(mut self, n: usize) -> Self {
        self.tabu_list_capacity = n;
        self
    }

    pub fn with_tabu_batch_size(mut self, n: usize) -> Self {
        self.tabu_batch_size = n;
        self
    }

    pub fn with_tabu_max_no_improve(mut self, n: usize) -> Self {
        self.tabu_max_no_improve = n;
        self
    }

    pub fn with_aspiration(mut self, aspiration: Aspiration) -> Self {
        self.aspiration = aspiration;
        self
    }

    pub fn with_local_search_max_passes(mut self, n: usize) -> Self {
        self.local_search_max_passes = n;
        self
    }

    pub fn with_neighborhood_weights(mut self, weights: NeighborhoodWeights) -> Self {
        self.neighborhood_weights = weights;
        self
    }

    pub fn with_constraint_weights(mut self, weights: ConstraintWeights) -> Self {
        self.constraint_weights = weights;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the parameters.
    pub fn validate(&self) -> Result<(), ParamsError> {
        for (name, value) in [("initial_temp", self.initial_temp), ("final_temp", self.final_temp)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ParamsError::NonPositiveTemperature { name, value });
            }
        }
        if self.final_temp >= self.initial_temp {
            return Err(ParamsError::TemperatureOrder {
                initial_temp: self.initial_temp,
                final_temp: self.final_temp,
            });
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(ParamsError::CoolingRate(self.cooling_rate));
        }
        if !(self.reheat_factor.is_finite() && self.reheat_factor > 1.0) {
            return Err(ParamsError::ReheatFactor(self.reheat_factor));
        }
        if self.reheat_threshold == 0 {
            return Err(ParamsError::ZeroCount("reheat_threshold"));
        }
        if self.tabu_list_capacity == 0 {
            return Err(ParamsError::ZeroCount("tabu_list_capacity"));
        }
        if self.tabu_batch_size == 0 {
            return Err(ParamsError::ZeroCount("tabu_batch_size"));
        }

        let weights = self.neighborhood_weights.entries();
        let valid = weights.iter().all(|&(_, w)| w.is_finite() && w >= 0.0);
        let sum: f64 = weights.iter().map(|&(_, w)| w).sum();
        if !valid || sum <= 0.0 {
            return Err(ParamsError::NeighborhoodWeights);
        }

        for (name, value) in self.constraint_weights.named() {
            if !value.is_finite() {
                return Err(ParamsError::ConstraintWeight { name, value });
            }
        }

        match self.aspiration {
            Aspiration::Ratio(r) if !(r > 0.0 && r <= 1.0) => Err(ParamsError::Aspiration(
                format!("ratio must be in (0, 1], got {r}"),
            )),
            Aspiration::Margin(m) if !(m.is_finite() && m >= 0.0) => Err(
                ParamsError::Aspiration(format!("margin must be non-negative, got {m}")),
            ),
            _ => Ok(()),
        }
    }
}
