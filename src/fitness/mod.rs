//! Fitness evaluation.
//!
//! The score of a grid is the sum of seven weighted terms, higher is
//! better:
//!
//! | Category          | Raw term                          | Weight              |
//! |-------------------|-----------------------------------|---------------------|
//! | Legal compliance  | [`terms::legal_compliance`]       | `legal_compliance`  |
//! | Staffing safety   | [`terms::staffing_safety`]        | `staffing_safety`   |
//! | Role compliance   | [`terms::role_compliance`]        | `role_compliance`   |
//! | Pattern quality   | [`terms::pattern_quality`]        | `pattern_penalty`   |
//! | Preference        | [`terms::preference`]             | 1                   |
//! | Fairness          | [`terms::fairness`]               | 1                   |
//! | Coverage          | [`terms::coverage`]               | `compliance_bonus`  |
//!
//! Evaluation is pure and always sums the terms in the order above, so a
//! given grid scores bit-identically on every call.
//!
//! [`ScoreBreakdown::suggestions`] turns weak categories into prioritized
//! actions; [`ScoreBreakdown::summary`] condenses the seven categories.

pub mod suggestions;
pub mod terms;

pub use suggestions::{BreakdownSummary, Priority, Suggestion};
pub use terms::PreferenceStats;

use crate::config::ConstraintWeights;
use crate::constraints::ConstraintSet;
use crate::models::{ResolvedRequests, ScheduleGrid};
use std::fmt;

/// Score categories in summation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScoreCategory {
    LegalCompliance,
    StaffingSafety,
    RoleCompliance,
    PatternQuality,
    Preference,
    Fairness,
    Coverage,
}

impl ScoreCategory {
    pub const ALL: [ScoreCategory; 7] = [
        ScoreCategory::LegalCompliance,
        ScoreCategory::StaffingSafety,
        ScoreCategory::RoleCompliance,
        ScoreCategory::PatternQuality,
        ScoreCategory::Preference,
        ScoreCategory::Fairness,
        ScoreCategory::Coverage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ScoreCategory::LegalCompliance => "legal_compliance",
            ScoreCategory::StaffingSafety => "staffing_safety",
            ScoreCategory::RoleCompliance => "role_compliance",
            ScoreCategory::PatternQuality => "pattern_quality",
            ScoreCategory::Preference => "preference",
            ScoreCategory::Fairness => "fairness",
            ScoreCategory::Coverage => "coverage",
        }
    }
}

impl fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One category's contribution.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryScore {
    pub category: ScoreCategory,
    /// Unweighted term value.
    pub raw: f64,
    pub weight: f64,
    /// `raw × weight`.
    pub weighted: f64,
}

/// Per-category scores and their total.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreBreakdown {
    /// In [`ScoreCategory::ALL`] order.
    pub categories: [CategoryScore; 7],
    pub total: f64,
    /// Prefer / avoid satisfaction behind the preference term.
    pub preferences: PreferenceStats,
}

impl ScoreBreakdown {
    pub fn get(&self, category: ScoreCategory) -> &CategoryScore {
        // `categories` is built in `ALL` order.
        &self.categories[category as usize]
    }

    /// Category with the highest weighted contribution.
    pub fn best_category(&self) -> ScoreCategory {
        self.categories
            .iter()
            .max_by(|a, b| a.weighted.total_cmp(&b.weighted))
            .map_or(ScoreCategory::LegalCompliance, |c| c.category)
    }

    /// Category with the lowest weighted contribution.
    pub fn worst_category(&self) -> ScoreCategory {
        self.categories
            .iter()
            .min_by(|a, b| a.weighted.total_cmp(&b.weighted))
            .map_or(ScoreCategory::LegalCompliance, |c| c.category)
    }
}

/// Scores grids against one problem instance.
///
/// Borrows the preprocessed inputs; construct once per run and share it
/// across phases.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    constraints: &'a ConstraintSet,
    requests: &'a ResolvedRequests,
    weights: &'a ConstraintWeights,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        constraints: &'a ConstraintSet,
        requests: &'a ResolvedRequests,
        weights: &'a ConstraintWeights,
    ) -> Self {
        Self {
            constraints,
            requests,
            weights,
        }
    }

    pub fn constraints(&self) -> &'a ConstraintSet {
        self.constraints
    }

    /// Total score of `grid`.
    pub fn evaluate(&self, grid: &ScheduleGrid) -> f64 {
        self.categories(self.raws(grid))
            .iter()
            .map(|c| c.weighted)
            .sum()
    }

    /// Every category's raw, weight and weighted value.
    pub fn breakdown(&self, grid: &ScheduleGrid) -> ScoreBreakdown {
        self.assemble(
            self.raws(grid),
            terms::preference_stats(grid, self.requests),
        )
    }

    fn raws(&self, grid: &ScheduleGrid) -> [f64; 7] {
        let c = self.constraints;
        [
            terms::legal_compliance(grid, c),
            terms::staffing_safety(grid, c),
            terms::role_compliance(grid, c),
            terms::pattern_quality(grid),
            terms::preference(grid, self.requests, self.weights),
            terms::fairness(grid),
            terms::coverage(grid, c),
        ]
    }

    /// A breakdown with every raw term at zero, for runs with nothing to
    /// schedule.
    pub fn empty_breakdown(&self) -> ScoreBreakdown {
        self.assemble([0.0; 7], PreferenceStats::default())
    }

    /// Weights per category, in [`ScoreCategory::ALL`] order.
    fn category_weights(&self) -> [f64; 7] {
        let w = self.weights;
        [
            w.legal_compliance,
            w.staffing_safety,
            w.role_compliance,
            w.pattern_penalty,
            1.0,
            1.0,
            w.compliance_bonus,
        ]
    }

    fn categories(&self, raws: [f64; 7]) -> [CategoryScore; 7] {
        let weights = self.category_weights();
        std::array::from_fn(|i| CategoryScore {
            category: ScoreCategory::ALL[i],
            raw: raws[i],
            weight: weights[i],
            weighted: raws[i] * weights[i],
        })
    }

    fn assemble(&self, raws: [f64; 7], preferences: PreferenceStats) -> ScoreBreakdown {
        let categories = self.categories(raws);
        let total: f64 = categories.iter().map(|c| c.weighted).sum();
        ScoreBreakdown {
            categories,
            total,
            preferences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{preprocess, ConstraintConfig};
    use crate::models::{Role, ShiftKind, Worker};

    fn setup() -> (Vec<Worker>, ConstraintSet) {
        let workers = vec![
            Worker::new(1, 7).with_role(Role::HeadNurse),
            Worker::new(2, 0).with_role(Role::NewNurse),
            Worker::new(3, 4),
            Worker::new(4, 2),
        ];
        let c = preprocess(
            &ConstraintConfig::default().with_required_staff(2, 1, 1),
            &workers,
        );
        (workers, c)
    }

    #[test]
    fn test_total_is_sum_of_weighted() {
        let (_, c) = setup();
        let requests = ResolvedRequests::default();
        let weights = ConstraintWeights::default();
        let eval = Evaluator::new(&c, &requests, &weights);
        let grid = ScheduleGrid::from_rows(vec![
            vec![ShiftKind::Day, ShiftKind::Day, ShiftKind::Evening, ShiftKind::Night],
            vec![ShiftKind::Off, ShiftKind::Off, ShiftKind::Day, ShiftKind::Night],
        ])
        .unwrap();

        let b = eval.breakdown(&grid);
        let sum: f64 = b.categories.iter().map(|c| c.weighted).sum();
        assert_eq!(b.total, sum);
        assert_eq!(eval.evaluate(&grid), b.total);
        for cat in ScoreCategory::ALL {
            assert_eq!(b.get(cat).category, cat);
        }
        // Day 1 is short one Day worker and one Evening worker.
        assert_eq!(b.get(ScoreCategory::StaffingSafety).raw, 30.0 - 200.0 + 10.0);
        assert_eq!(b.get(ScoreCategory::StaffingSafety).weighted, -160.0 * 500.0);
        // Workers 2 and 3 have no off day in their only week block.
        assert_eq!(b.get(ScoreCategory::LegalCompliance).raw, -400.0);
        assert_eq!(b.worst_category(), ScoreCategory::LegalCompliance);
        assert_eq!(b.best_category(), ScoreCategory::Coverage);
    }

    #[test]
    fn test_zero_weight_still_reports_raw() {
        let (_, c) = setup();
        let requests = ResolvedRequests::default();
        let weights = ConstraintWeights {
            pattern_penalty: 0.0,
            ..ConstraintWeights::default()
        };
        let eval = Evaluator::new(&c, &requests, &weights);
        let grid = ScheduleGrid::from_rows(vec![
            vec![ShiftKind::Night; 4],
            vec![ShiftKind::Day; 4],
        ])
        .unwrap();
        let p = *eval.breakdown(&grid).get(ScoreCategory::PatternQuality);
        assert_eq!(p.raw, -200.0);
        assert_eq!(p.weighted, 0.0);
    }

    #[test]
    fn test_empty_breakdown() {
        let (_, c) = setup();
        let requests = ResolvedRequests::default();
        let weights = ConstraintWeights::default();
        let b = Evaluator::new(&c, &requests, &weights).empty_breakdown();
        assert_eq!(b.total, 0.0);
        assert_eq!(b.get(ScoreCategory::Coverage).weight, 100.0);
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let (_, c) = setup();
        let requests = ResolvedRequests::default();
        let weights = ConstraintWeights::default();
        let eval = Evaluator::new(&c, &requests, &weights);
        let grid = ScheduleGrid::filled(9, 4, ShiftKind::Evening);
        assert_eq!(
            eval.evaluate(&grid).to_bits(),
            eval.evaluate(&grid).to_bits()
        );
    }
}
