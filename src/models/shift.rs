//! Shift kinds.

use crate::error::ParseError;
use std::fmt;
use std::str::FromStr;

/// The value of one grid cell.
///
/// The declaration order (`Day < Evening < Night < Off`) is only a stable
/// index; it carries no scheduling meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ShiftKind {
    /// Day shift.
    Day,
    /// Evening shift.
    Evening,
    /// Night shift.
    Night,
    /// Not working.
    #[default]
    Off,
}

impl ShiftKind {
    /// All four kinds in index order.
    pub const ALL: [ShiftKind; 4] = [
        ShiftKind::Day,
        ShiftKind::Evening,
        ShiftKind::Night,
        ShiftKind::Off,
    ];

    /// The three staffed shifts, in the fixed order used by construction
    /// and staffing checks.
    pub const WORKING: [ShiftKind; 3] = [ShiftKind::Day, ShiftKind::Evening, ShiftKind::Night];

    /// Stable index in `0..4`.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`index`](Self::index). Returns `None` for `i >= 4`.
    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    /// Whether this cell counts as a worked day.
    #[inline]
    pub fn is_working(self) -> bool {
        self != ShiftKind::Off
    }

    /// Lower-case name, as used by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            ShiftKind::Day => "day",
            ShiftKind::Evening => "evening",
            ShiftKind::Night => "night",
            ShiftKind::Off => "off",
        }
    }
}

impl fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "d" => Ok(ShiftKind::Day),
            "evening" | "e" => Ok(ShiftKind::Evening),
            "night" | "n" => Ok(ShiftKind::Night),
            "off" | "o" => Ok(ShiftKind::Off),
            _ => Err(ParseError::new("shift", s)),
        }
    }
}
