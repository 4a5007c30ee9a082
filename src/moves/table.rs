//! Weighted choice among move families.

use super::neighborhoods::Neighborhood;
use super::types::{Move, MoveFamily};
use crate::config::NeighborhoodWeights;
use crate::models::ScheduleGrid;
use crate::random::roulette_select;
use rand::Rng;

/// A roulette table over move families.
///
/// Each search phase owns the table it draws from: SA rebuilds one per
/// temperature band, tabu uses [`uniform`](Self::uniform), and local
/// search walks the static weights directly.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborhoodTable {
    families: Vec<MoveFamily>,
    weights: Vec<f64>,
}

impl NeighborhoodTable {
    pub fn new(entries: &[(MoveFamily, f64)]) -> Self {
        let (families, weights) = entries.iter().copied().unzip();
        Self { families, weights }
    }

    /// Table built from the configured static weights.
    pub fn from_weights(weights: &NeighborhoodWeights) -> Self {
        Self::new(&weights.entries())
    }

    /// Every family with equal weight.
    pub fn uniform() -> Self {
        Self::new(&MoveFamily::ALL.map(|f| (f, 1.0)))
    }

    /// Temperature-banded table for simulated annealing.
    ///
    /// | band                    | SingleSwap | ShiftRotation | BlockMove | EmployeeSwap |
    /// |-------------------------|-----------:|--------------:|----------:|-------------:|
    /// | `temp > 0.7 × initial`  | 0.3        | 0.4           | 0.3       | -            |
    /// | `temp > 0.3 × initial`  | 0.4        | 0.4           | -         | 0.2          |
    /// | otherwise               | 0.6        | 0.4           | -         | -            |
    pub fn for_temperature(temperature: f64, initial_temp: f64) -> Self {
        if temperature > 0.7 * initial_temp {
            Self::new(&[
                (MoveFamily::SingleSwap, 0.3),
                (MoveFamily::ShiftRotation, 0.4),
                (MoveFamily::BlockMove, 0.3),
            ])
        } else if temperature > 0.3 * initial_temp {
            Self::new(&[
                (MoveFamily::SingleSwap, 0.4),
                (MoveFamily::ShiftRotation, 0.4),
                (MoveFamily::EmployeeSwap, 0.2),
            ])
        } else {
            Self::new(&[
                (MoveFamily::SingleSwap, 0.6),
                (MoveFamily::ShiftRotation, 0.4),
            ])
        }
    }

    pub fn families(&self) -> &[MoveFamily] {
        &self.families
    }

    /// Draws a family by weight.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> MoveFamily {
        let i = roulette_select(&self.weights, rng);
        self.families.get(i).copied().unwrap_or(MoveFamily::SingleSwap)
    }

    /// Draws a family, then a move from it.
    pub fn generate<R: Rng>(&self, grid: &ScheduleGrid, rng: &mut R) -> Option<Move> {
        self.pick(rng).generate(grid, rng)
    }
}
