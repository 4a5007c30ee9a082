//! Neighborhood moves.
//!
//! A [`Move`] is a value describing one mutation of a grid. Four
//! [`Neighborhood`] strategies draw random moves, and a
//! [`NeighborhoodTable`] picks among them by weight. Search phases always
//! apply moves to their own clone of the current grid.

mod neighborhoods;
mod table;
mod types;

pub use neighborhoods::{BlockMove, EmployeeSwap, Neighborhood, ShiftRotation, SingleSwap};
pub use table::NeighborhoodTable;
pub use types::{Move, MoveFamily};
