//! Domain types for shift rostering.
//!
//! - [`ShiftKind`]: the value of one cell (Day, Evening, Night, Off)
//! - [`Worker`]: immutable roster record (role, contract, experience)
//! - [`ScheduleGrid`]: the `days × workers` assignment matrix
//! - [`ShiftRequest`]: prefer/avoid/leave requests keyed by day index

mod grid;
mod request;
mod shift;
mod worker;

pub use grid::ScheduleGrid;
pub use request::{RequestKind, ResolvedRequest, ResolvedRequests, ShiftRequest};
pub use shift::ShiftKind;
pub use worker::{EmploymentType, Role, SkillLevel, Worker, WorkerId};
