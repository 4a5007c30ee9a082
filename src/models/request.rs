//! Worker shift requests.

use super::shift::ShiftKind;
use super::worker::{Worker, WorkerId};
use crate::error::ParseError;
use std::collections::HashMap;
use std::str::FromStr;

/// What a worker asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RequestKind {
    /// Wants the requested shift. Scored by the evaluator.
    Prefer,
    /// Wants anything but the requested shift. Scored by the evaluator.
    Avoid,
    /// Must be off. Enforced during initial construction only.
    Leave,
}

impl FromStr for RequestKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prefer" | "request" => Ok(RequestKind::Prefer),
            "avoid" => Ok(RequestKind::Avoid),
            "leave" | "vacation" => Ok(RequestKind::Leave),
            _ => Err(ParseError::new("request kind", s)),
        }
    }
}

/// A request keyed by worker id and 0-based day index.
///
/// The day index is resolved from a calendar date by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShiftRequest {
    pub employee_id: WorkerId,
    pub day_index: usize,
    pub requested_shift: ShiftKind,
    pub kind: RequestKind,
}

impl ShiftRequest {
    pub fn new(
        employee_id: WorkerId,
        day_index: usize,
        requested_shift: ShiftKind,
        kind: RequestKind,
    ) -> Self {
        Self {
            employee_id,
            day_index,
            requested_shift,
            kind,
        }
    }

    /// Builds a request from string names, returning `None` if either name
    /// is unknown so that callers can skip malformed input.
    pub fn parse(employee_id: WorkerId, day_index: usize, shift: &str, kind: &str) -> Option<Self> {
        let requested_shift = shift.parse().ok()?;
        let kind = kind.parse().ok()?;
        Some(Self::new(employee_id, day_index, requested_shift, kind))
    }
}

/// A request bound to a roster position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRequest {
    /// Index into the roster.
    pub worker: usize,
    pub day: usize,
    pub shift: ShiftKind,
    pub kind: RequestKind,
}

/// Requests that survived resolution plus the number dropped.
#[derive(Debug, Clone, Default)]
pub struct ResolvedRequests {
    pub requests: Vec<ResolvedRequest>,
    pub skipped: usize,
}

impl ResolvedRequests {
    /// Binds requests to roster indices.
    ///
    /// Requests for unknown workers or for days outside `0..days` are
    /// dropped and counted, never reported as errors.
    pub fn resolve(requests: &[ShiftRequest], workers: &[Worker], days: usize) -> Self {
        let index: HashMap<WorkerId, usize> =
            workers.iter().enumerate().map(|(i, w)| (w.id, i)).collect();

        let mut resolved = Vec::with_capacity(requests.len());
        let mut skipped = 0;
        for req in requests {
            match index.get(&req.employee_id) {
                Some(&worker) if req.day_index < days => resolved.push(ResolvedRequest {
                    worker,
                    day: req.day_index,
                    shift: req.requested_shift,
                    kind: req.kind,
                }),
                _ => {
                    tracing::debug!(
                        employee_id = req.employee_id,
                        day_index = req.day_index,
                        "skipping request outside roster or horizon"
                    );
                    skipped += 1;
                }
            }
        }

        Self {
            requests: resolved,
            skipped,
        }
    }

    /// Leave requests for `day`.
    pub fn leave_on(&self, day: usize) -> impl Iterator<Item = &ResolvedRequest> + '_ {
        self.requests
            .iter()
            .filter(move |r| r.day == day && r.kind == RequestKind::Leave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_unknown_names() {
        assert!(ShiftRequest::parse(1, 0, "night", "avoid").is_some());
        assert!(ShiftRequest::parse(1, 0, "graveyard", "avoid").is_none());
        assert!(ShiftRequest::parse(1, 0, "night", "demand").is_none());
        assert_eq!(
            ShiftRequest::parse(7, 3, "day", "request"),
            Some(ShiftRequest::new(7, 3, ShiftKind::Day, RequestKind::Prefer))
        );
    }

    #[test]
    fn test_resolve_drops_out_of_range() {
        let workers = vec![Worker::new(10, 2), Worker::new(20, 5)];
        let requests = vec![
            ShiftRequest::new(20, 1, ShiftKind::Day, RequestKind::Prefer),
            ShiftRequest::new(20, 9, ShiftKind::Day, RequestKind::Prefer),
            ShiftRequest::new(99, 1, ShiftKind::Day, RequestKind::Prefer),
            ShiftRequest::new(10, 0, ShiftKind::Off, RequestKind::Leave),
        ];
        let resolved = ResolvedRequests::resolve(&requests, &workers, 5);
        assert_eq!(resolved.skipped, 2);
        assert_eq!(resolved.requests.len(), 2);
        assert_eq!(resolved.requests[0].worker, 1);
        assert_eq!(resolved.leave_on(0).count(), 1);
        assert_eq!(resolved.leave_on(1).count(), 0);
    }
}
