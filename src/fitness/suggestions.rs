//! Improvement suggestions and summary statistics for a [`ScoreBreakdown`].
//!
//! A category draws a suggestion when its raw term signals trouble:
//!
//! | Category                       | Trigger                         | Priority                    |
//! |--------------------------------|---------------------------------|-----------------------------|
//! | Legal, staffing, role          | raw < 0                         | high                        |
//! | Pattern quality                | raw < 0                         | medium                      |
//! | Preference                     | satisfaction rate < 0.7         | high below 0.5, else medium |
//! | Fairness                       | raw < [`FAIRNESS_THRESHOLD`]    | medium                      |
//!
//! Coverage never triggers; its shortfalls already surface as staffing.

use super::{ScoreBreakdown, ScoreCategory};

/// Satisfaction rate under which preferences draw a suggestion.
pub const PREFERENCE_WEAK_RATE: f64 = 0.7;

/// Satisfaction rate under which the preference suggestion is high priority.
pub const PREFERENCE_POOR_RATE: f64 = 0.5;

/// Raw fairness below which workloads count as unbalanced.
pub const FAIRNESS_THRESHOLD: f64 = -20.0;

/// How urgently a suggestion should be acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Priority {
    Medium,
    High,
}

/// Concrete actions for one weak category.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Suggestion {
    pub category: ScoreCategory,
    pub priority: Priority,
    /// The raw term that triggered the suggestion.
    pub raw: f64,
    pub actions: &'static [&'static str],
    pub expected_improvement: &'static str,
}

/// Aggregate view over the seven categories.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BreakdownSummary {
    pub best: ScoreCategory,
    pub worst: ScoreCategory,
    /// Categories with a negative weighted contribution.
    pub penalized: usize,
    /// Categories with a positive weighted contribution.
    pub rewarded: usize,
    pub mean_weighted: f64,
    /// Share of prefer and avoid requests honored.
    pub preference_rate: f64,
}

fn actions(category: ScoreCategory) -> (&'static [&'static str], &'static str) {
    match category {
        ScoreCategory::LegalCompliance => (
            &[
                "Keep consecutive working days at or below the limit",
                "Keep consecutive night shifts at or below the limit",
                "Guarantee the weekly minimum of off days",
            ],
            "Removes labor-law exposure",
        ),
        ScoreCategory::StaffingSafety => (
            &[
                "Staff every shift to its required minimum",
                "Keep one or two spare workers for emergencies",
                "Put experienced workers on nights first",
            ],
            "Safer patient coverage",
        ),
        ScoreCategory::RoleCompliance => (
            &[
                "Pair every new nurse on nights with a senior",
                "Match assignments to experience level",
                "Schedule the head nurse on key day shifts",
            ],
            "Better supervision of junior staff",
        ),
        ScoreCategory::PatternQuality => (
            &[
                "Avoid Day to Night and Night to Day transitions",
                "Leave enough rest between shifts",
            ],
            "Less fatigue across the roster",
        ),
        ScoreCategory::Preference => (
            &[
                "Honor more leave and shift preference requests",
                "Move unwanted shifts to workers without avoid requests",
            ],
            "Higher staff satisfaction",
        ),
        ScoreCategory::Fairness => (
            &[
                "Spread night shifts evenly across workers",
                "Balance total working days per worker",
            ],
            "Perceived fairness across the team",
        ),
        ScoreCategory::Coverage => (
            &["Staff one worker above the minimum where possible"],
            "Headroom for unexpected absences",
        ),
    }
}

fn priority(breakdown: &ScoreBreakdown, category: ScoreCategory) -> Option<Priority> {
    let raw = breakdown.get(category).raw;
    match category {
        ScoreCategory::LegalCompliance
        | ScoreCategory::StaffingSafety
        | ScoreCategory::RoleCompliance => (raw < 0.0).then_some(Priority::High),
        ScoreCategory::PatternQuality => (raw < 0.0).then_some(Priority::Medium),
        ScoreCategory::Preference => {
            let rate = breakdown.preferences.rate();
            if rate < PREFERENCE_POOR_RATE {
                Some(Priority::High)
            } else if rate < PREFERENCE_WEAK_RATE {
                Some(Priority::Medium)
            } else {
                None
            }
        }
        ScoreCategory::Fairness => (raw < FAIRNESS_THRESHOLD).then_some(Priority::Medium),
        ScoreCategory::Coverage => None,
    }
}

impl ScoreBreakdown {
    /// Suggestions for weak categories, high priority first, otherwise in
    /// category order.
    pub fn suggestions(&self) -> Vec<Suggestion> {
        let mut out: Vec<Suggestion> = ScoreCategory::ALL
            .iter()
            .filter_map(|&category| {
                let priority = priority(self, category)?;
                let (actions, expected_improvement) = actions(category);
                Some(Suggestion {
                    category,
                    priority,
                    raw: self.get(category).raw,
                    actions,
                    expected_improvement,
                })
            })
            .collect();
        // Stable sort keeps category order within a priority.
        out.sort_by(|a, b| b.priority.cmp(&a.priority));
        out
    }

    pub fn summary(&self) -> BreakdownSummary {
        let weighted = self.categories.iter().map(|c| c.weighted);
        BreakdownSummary {
            best: self.best_category(),
            worst: self.worst_category(),
            penalized: weighted.clone().filter(|&w| w < 0.0).count(),
            rewarded: weighted.filter(|&w| w > 0.0).count(),
            mean_weighted: self.total / self.categories.len() as f64,
            preference_rate: self.preferences.rate(),
        }
    }
}
