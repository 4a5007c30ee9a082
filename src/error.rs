//! Error types.
//!
//! The engine itself is total over validated inputs. Errors only arise
//! when parameters are validated up front or when names are parsed from
//! strings supplied by a caller.

use thiserror::Error;

/// Invalid [`SchedulingParams`](crate::config::SchedulingParams).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    /// A temperature is zero, negative, or not finite.
    #[error("{name} must be positive and finite, got {value}")]
    NonPositiveTemperature {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// `final_temp` is not strictly below `initial_temp`.
    #[error("final_temp ({final_temp}) must be less than initial_temp ({initial_temp})")]
    TemperatureOrder {
        /// Starting temperature.
        initial_temp: f64,
        /// Stopping temperature.
        final_temp: f64,
    },

    /// Cooling rate outside the open interval (0, 1).
    #[error("cooling_rate must be in (0, 1), got {0}")]
    CoolingRate(f64),

    /// Reheat factor that would not raise the temperature.
    #[error("reheat_factor must be greater than 1, got {0}")]
    ReheatFactor(f64),

    /// A count that must be at least one is zero.
    #[error("{0} must be at least 1")]
    ZeroCount(&'static str),

    /// Neighborhood weights are negative, non-finite, or all zero.
    #[error("neighborhood weights must be non-negative with a positive sum")]
    NeighborhoodWeights,

    /// A constraint weight is not finite.
    #[error("constraint weight {name} must be finite, got {value}")]
    ConstraintWeight {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Aspiration parameter out of range.
    #[error("invalid aspiration rule: {0}")]
    Aspiration(String),
}

/// Grid cells that do not match the declared dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("grid of {days} x {workers} does not hold {actual} cells")]
pub struct GridShapeError {
    pub days: usize,
    pub workers: usize,
    /// `None` when `days × workers` overflows.
    pub expected: Option<usize>,
    pub actual: usize,
}

/// Failure to parse a domain name from a string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} name: {value:?}")]
pub struct ParseError {
    /// What was being parsed (e.g. "shift").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
