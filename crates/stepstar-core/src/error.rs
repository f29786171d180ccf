//! The error type shared by the board and the stepping engine.

use std::fmt;

use crate::geom::Point;

/// Phase of the search state machine.
///
/// `NotStarted` is the only phase in which the board may be edited.
/// `GoalFound` and `Exhausted` are terminal until a reset or clear.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchState {
    #[default]
    NotStarted,
    Stepping,
    GoalFound,
    Exhausted,
}

impl SearchState {
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::GoalFound | Self::Exhausted)
    }
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotStarted => "not started",
            Self::Stepping => "stepping",
            Self::GoalFound => "goal found",
            Self::Exhausted => "exhausted",
        })
    }
}

/// Errors returned by board and engine calls.
///
/// None of these is fatal: a failing call leaves every cell untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Width or height below [`MIN_SIDE`](crate::MIN_SIDE).
    InvalidDimensions { width: i32, height: i32 },
    /// Out of bounds, or Start and End would coincide.
    InvalidCoordinate(Point),
    /// The board can only be edited before the first step.
    EditNotAllowed(SearchState),
    /// A path was requested before the goal was reached.
    NoPathAvailable,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => write!(
                f,
                "invalid board dimensions {width}x{height} (minimum {0}x{0})",
                crate::MIN_SIDE
            ),
            Self::InvalidCoordinate(p) => write!(f, "invalid coordinate {p}"),
            Self::EditNotAllowed(state) => {
                write!(f, "board cannot be edited while search is {state}")
            }
            Self::NoPathAvailable => f.write_str("no path available"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = Error::InvalidDimensions { width: 2, height: 9 };
        assert_eq!(e.to_string(), "invalid board dimensions 2x9 (minimum 3x3)");
        let e = Error::EditNotAllowed(SearchState::Stepping);
        assert_eq!(e.to_string(), "board cannot be edited while search is stepping");
        assert_eq!(
            Error::InvalidCoordinate(Point::new(-1, 4)).to_string(),
            "invalid coordinate (-1, 4)"
        );
    }

    #[test]
    fn terminal_states() {
        assert!(SearchState::GoalFound.is_terminal());
        assert!(SearchState::Exhausted.is_terminal());
        assert!(!SearchState::Stepping.is_terminal());
        assert!(!SearchState::NotStarted.is_terminal());
    }
}
